use crate::{
    plan::PlanId,
    quantity::{capacity::Amperes, currency::Yen, energy::KilowattHours},
};

/// Malformed or out-of-domain request.
///
/// Always a caller error: nothing is retried and nothing is silently clamped.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum InvalidInput {
    #[error("the {plan} plan does not offer {capacity} supply capacity")]
    UnknownCapacity { plan: PlanId, capacity: Amperes },

    #[error("household size {0} is not supported")]
    UnknownHouseholdSize(u8),

    #[error("usage profile must cover 12 months, got {0}")]
    ProfileLength(usize),

    #[error("usage in month #{month} must be finite and non-negative, got {usage:?}")]
    InvalidUsage { month: usize, usage: KilowattHours },

    #[error("monthly bill must be finite and positive, got {0:?}")]
    InvalidBill(Yen),

    #[error("the {plan} plan cost overflows for the usage profile")]
    CostOverflow { plan: PlanId },

    #[error("unknown plan `{0}`")]
    UnknownPlan(String),
}
