use std::{fmt::Debug, fs, path::Path, str::FromStr};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    plan::{PlanId, PlanMap},
    prelude::*,
    quantity::{capacity::Amperes, energy::KilowattHours, rate::YenPerKilowattHour},
    tariff::{Pricing, RateTier, Tariff},
};

const EMBEDDED: &str = include_str!("reference.toml");

/// Static reference data the engine and the estimator work from.
#[must_use]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReferenceTables {
    pub plans: PlanMap<Tariff>,
    pub household: HouseholdTables,
}

#[must_use]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HouseholdTables {
    /// Month-by-month multipliers on the average usage, January first.
    pub seasonal_factors: [f64; 12],

    pub average_usage: Vec<AverageUsage>,

    /// Ascending thresholds on the average usage.
    pub capacity_thresholds: Vec<CapacityThreshold>,

    /// Capacity for an average usage above all the thresholds.
    pub fallback_capacity: Amperes,
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct AverageUsage {
    pub size: u8,
    pub usage: KilowattHours,
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct CapacityThreshold {
    pub below: KilowattHours,
    pub capacity: Amperes,
}

#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    #[error("failed to parse the reference tables")]
    Parse(#[from] toml::de::Error),

    #[error("the {plan} plan must offer at least one supply capacity")]
    NoCapacities { plan: PlanId },

    #[error("the {plan} plan lists {capacity} supply capacity more than once")]
    DuplicateCapacity { plan: PlanId, capacity: Amperes },

    #[error("the {plan} plan has an invalid {what}: {value}")]
    InvalidAmount { plan: PlanId, what: &'static str, value: f64 },

    #[error("tier #{index} of the {plan} plan starts at {actual}, expected {expected}")]
    TierGap { plan: PlanId, index: usize, expected: KilowattHours, actual: KilowattHours },

    #[error("tier #{index} of the {plan} plan is empty")]
    EmptyTier { plan: PlanId, index: usize },

    #[error("the {plan} plan must end with exactly one unbounded tier")]
    UnboundedTier { plan: PlanId },

    #[error("time-of-use weights of the {plan} plan must add up to 1, got {total}")]
    Weights { plan: PlanId, total: f64 },

    #[error("seasonal factor for month #{month} is invalid: {factor}")]
    SeasonalFactor { month: usize, factor: f64 },

    #[error("average usage for household size {size} is invalid: {usage}")]
    AverageUsage { size: u8, usage: KilowattHours },

    #[error("household size {size} is listed more than once")]
    DuplicateHouseholdSize { size: u8 },

    #[error("capacity thresholds must be strictly ascending")]
    UnorderedThresholds,
}

impl FromStr for ReferenceTables {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tables: Self = toml::from_str(s)?;
        tables.validate()?;
        Ok(tables)
    }
}

impl ReferenceTables {
    /// Tables compiled into the binary.
    pub fn embedded() -> Result<Self, ReferenceError> {
        EMBEDDED.parse()
    }

    #[instrument(name = "reading the reference tables…")]
    pub fn read_from<P: AsRef<Path> + Debug>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        Ok(contents.parse::<Self>()?)
    }

    pub fn validate(&self) -> Result<(), ReferenceError> {
        for (plan, tariff) in self.plans.iter() {
            validate_tariff(plan, tariff)?;
        }
        self.household.validate()
    }
}

impl HouseholdTables {
    fn validate(&self) -> Result<(), ReferenceError> {
        for (month, factor) in self.seasonal_factors.iter().copied().enumerate() {
            if !factor.is_finite() || factor < 0.0 {
                return Err(ReferenceError::SeasonalFactor { month: month + 1, factor });
            }
        }
        for average_usage in &self.average_usage {
            if !average_usage.usage.is_finite() || average_usage.usage < KilowattHours::ZERO {
                return Err(ReferenceError::AverageUsage {
                    size: average_usage.size,
                    usage: average_usage.usage,
                });
            }
        }
        if let Some(size) =
            self.average_usage.iter().map(|average_usage| average_usage.size).duplicates().next()
        {
            return Err(ReferenceError::DuplicateHouseholdSize { size });
        }
        if !self.capacity_thresholds.iter().tuple_windows().all(|(lhs, rhs)| lhs.below < rhs.below)
        {
            return Err(ReferenceError::UnorderedThresholds);
        }
        Ok(())
    }
}

fn validate_tariff(plan: PlanId, tariff: &Tariff) -> Result<(), ReferenceError> {
    if tariff.basic_charges.is_empty() {
        return Err(ReferenceError::NoCapacities { plan });
    }
    if let Some(capacity) = tariff.capacities().duplicates().next() {
        return Err(ReferenceError::DuplicateCapacity { plan, capacity });
    }
    for basic_charge in &tariff.basic_charges {
        check_amount(plan, "basic charge", basic_charge.charge.0)?;
    }
    check_amount(plan, "fuel adjustment", tariff.fuel_adjustment.0)?;
    check_amount(plan, "renewable levy", tariff.renewable_levy.0)?;

    match &tariff.pricing {
        Pricing::Tiered { tiers } => validate_tiers(plan, tiers),
        Pricing::MarketLinked { base_rate, peak_rate, off_peak_rate, weights } => {
            check_rate(plan, "base rate", *base_rate)?;
            check_rate(plan, "peak rate", *peak_rate)?;
            check_rate(plan, "off-peak rate", *off_peak_rate)?;
            check_amount(plan, "peak weight", weights.peak)?;
            check_amount(plan, "base weight", weights.base)?;
            check_amount(plan, "off-peak weight", weights.off_peak)?;
            let total = weights.total();
            if (total - 1.0).abs() > 1e-9 {
                return Err(ReferenceError::Weights { plan, total });
            }
            Ok(())
        }
    }
}

/// Tiers must cover `[0, ∞)` without gaps or overlaps, in ascending order.
fn validate_tiers(plan: PlanId, tiers: &[RateTier]) -> Result<(), ReferenceError> {
    let Some((top, bounded)) = tiers.split_last() else {
        return Err(ReferenceError::UnboundedTier { plan });
    };
    let mut expected = KilowattHours::ZERO;
    for (index, tier) in bounded.iter().enumerate() {
        check_rate(plan, "tier rate", tier.rate)?;
        if tier.from != expected {
            return Err(ReferenceError::TierGap { plan, index, expected, actual: tier.from });
        }
        let Some(to) = tier.to else {
            return Err(ReferenceError::UnboundedTier { plan });
        };
        if !to.is_finite() {
            return Err(ReferenceError::InvalidAmount { plan, what: "tier bound", value: to.0 });
        }
        if to <= tier.from {
            return Err(ReferenceError::EmptyTier { plan, index });
        }
        expected = to;
    }
    check_rate(plan, "tier rate", top.rate)?;
    if top.from != expected {
        return Err(ReferenceError::TierGap {
            plan,
            index: bounded.len(),
            expected,
            actual: top.from,
        });
    }
    if top.to.is_some() {
        return Err(ReferenceError::UnboundedTier { plan });
    }
    Ok(())
}

fn check_rate(
    plan: PlanId,
    what: &'static str,
    rate: YenPerKilowattHour,
) -> Result<(), ReferenceError> {
    check_amount(plan, what, rate.0)
}

fn check_amount(plan: PlanId, what: &'static str, value: f64) -> Result<(), ReferenceError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ReferenceError::InvalidAmount { plan, what, value })
    }
}
