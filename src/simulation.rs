use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::{
    plan::{PlanId, PlanMap},
    profile::{N_MONTHS, UsageProfile},
    quantity::{capacity::Amperes, currency::Yen},
};

#[must_use]
#[derive(Clone, Debug, Builder, Serialize, Deserialize)]
pub struct SimulationInput {
    pub supply_capacity: Amperes,
    pub usage_profile: UsageProfile,

    /// Actual monthly bill of the household, replaces the modelled current plan total.
    pub override_monthly_bill: Option<Yen>,
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyCost {
    /// Rounded sum of the unrounded monthly costs.
    pub annual_total: Yen,

    pub monthly_average: Yen,

    /// Individually rounded monthly costs.
    pub monthly_costs: [Yen; N_MONTHS],
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Savings {
    /// The better of the two alternatives, negative when both cost more than the current plan.
    pub annual: Yen,

    pub monthly: Yen,
    pub vs_standard: Yen,
    pub vs_market: Yen,
}

/// How the current annual total splits between the savings and the recommended plan.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    pub savings: Yen,
    pub new_total: Yen,

    /// `savings / (savings + new_total)`, [`None`] when the denominator is not positive.
    pub savings_share: Option<f64>,
}

impl Breakdown {
    pub fn new(savings: Yen, new_total: Yen) -> Self {
        let whole = savings + new_total;
        let savings_share = (whole > Yen::ZERO).then(|| savings.0 / whole.0);
        Self { savings, new_total, savings_share }
    }
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub per_plan: PlanMap<YearlyCost>,
    pub savings: Savings,
    pub recommended_plan: PlanId,
    pub breakdown: Breakdown,
    pub usage_profile: UsageProfile,
    pub supply_capacity: Amperes,
}

impl SimulationResult {
    pub fn recommended(&self) -> &YearlyCost {
        &self.per_plan[self.recommended_plan]
    }

    /// Whether switching to the recommended plan actually saves money.
    pub fn is_beneficial(&self) -> bool {
        self.savings.annual > Yen::ZERO
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_breakdown() {
        let breakdown = Breakdown::new(Yen(20000.0), Yen(80000.0));
        assert_abs_diff_eq!(breakdown.savings_share.unwrap(), 0.2);
    }

    #[test]
    fn test_breakdown_negative_savings() {
        let breakdown = Breakdown::new(Yen(-5000.0), Yen(105_000.0));
        assert_abs_diff_eq!(breakdown.savings_share.unwrap(), -0.05);
    }

    #[test]
    fn test_breakdown_empty() {
        assert_eq!(Breakdown::new(Yen::ZERO, Yen::ZERO).savings_share, None);
        assert_eq!(Breakdown::new(Yen(-100.0), Yen(50.0)).savings_share, None);
    }
}
