use crate::{
    error::InvalidInput,
    prelude::*,
    profile::UsageProfile,
    quantity::{capacity::Amperes, currency::Yen, energy::KilowattHours},
    reference::HouseholdTables,
    simulation::SimulationInput,
};

/// Derives the simulation input from the household size and the reported bill,
/// for households that do not know their monthly usage.
#[derive(Copy, Clone)]
pub struct UsageEstimator<'a> {
    tables: &'a HouseholdTables,
}

impl<'a> UsageEstimator<'a> {
    pub const fn new(tables: &'a HouseholdTables) -> Self {
        Self { tables }
    }

    /// Build the simulation input for the household.
    ///
    /// The reported bill overrides the modelled current plan total, since the household's
    /// actual plan internals are unknown.
    #[instrument(skip(self))]
    pub fn estimate(
        &self,
        household_size: u8,
        reported_monthly_bill: Yen,
    ) -> Result<SimulationInput, InvalidInput> {
        if !reported_monthly_bill.is_finite() || reported_monthly_bill <= Yen::ZERO {
            return Err(InvalidInput::InvalidBill(reported_monthly_bill));
        }
        let average_usage = self.average_usage(household_size)?;
        let supply_capacity = self.infer_capacity(average_usage);
        let usage_profile = self.seasonal_profile(average_usage)?;
        info!(%average_usage, %supply_capacity, "estimated");
        Ok(SimulationInput::builder()
            .supply_capacity(supply_capacity)
            .usage_profile(usage_profile)
            .override_monthly_bill(reported_monthly_bill)
            .build())
    }

    pub fn average_usage(&self, household_size: u8) -> Result<KilowattHours, InvalidInput> {
        self.tables
            .average_usage
            .iter()
            .find(|average_usage| average_usage.size == household_size)
            .map(|average_usage| average_usage.usage)
            .ok_or(InvalidInput::UnknownHouseholdSize(household_size))
    }

    /// Spread the average usage over the year, rounding each month to a whole kilowatt-hour.
    pub fn seasonal_profile(
        &self,
        average_usage: KilowattHours,
    ) -> Result<UsageProfile, InvalidInput> {
        UsageProfile::try_new(
            self.tables.seasonal_factors.map(|factor| (average_usage * factor).round()),
        )
    }

    /// Guess the smallest supply capacity that should suffice for the average usage.
    ///
    /// This is a heuristic on the usage, not a measurement of the actual peak current.
    pub fn infer_capacity(&self, average_usage: KilowattHours) -> Amperes {
        self.tables
            .capacity_thresholds
            .iter()
            .find(|threshold| average_usage < threshold.below)
            .map_or(self.tables.fallback_capacity, |threshold| threshold.capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferenceTables;

    #[test]
    fn test_average_usage() {
        let tables = ReferenceTables::embedded().unwrap();
        let estimator = UsageEstimator::new(&tables.household);
        assert_eq!(estimator.average_usage(1), Ok(KilowattHours(240.0)));
        assert_eq!(estimator.average_usage(4), Ok(KilowattHours(520.0)));
        assert_eq!(estimator.average_usage(0), Err(InvalidInput::UnknownHouseholdSize(0)));
        assert_eq!(estimator.average_usage(5), Err(InvalidInput::UnknownHouseholdSize(5)));
    }

    #[test]
    fn test_infer_capacity() {
        let tables = ReferenceTables::embedded().unwrap();
        let estimator = UsageEstimator::new(&tables.household);
        assert_eq!(estimator.infer_capacity(KilowattHours(240.0)), Amperes(30));
        assert_eq!(estimator.infer_capacity(KilowattHours(249.9)), Amperes(30));
        assert_eq!(estimator.infer_capacity(KilowattHours(250.0)), Amperes(40));
        assert_eq!(estimator.infer_capacity(KilowattHours(350.0)), Amperes(50));
        assert_eq!(estimator.infer_capacity(KilowattHours(449.0)), Amperes(50));
        assert_eq!(estimator.infer_capacity(KilowattHours(450.0)), Amperes(60));
        assert_eq!(estimator.infer_capacity(KilowattHours(520.0)), Amperes(60));
    }

    #[test]
    fn test_seasonal_profile() {
        let tables = ReferenceTables::embedded().unwrap();
        let profile =
            UsageEstimator::new(&tables.household).seasonal_profile(KilowattHours(350.0)).unwrap();
        assert_eq!(
            profile.months().map(|usage| usage.0),
            [420.0, 385.0, 350.0, 315.0, 280.0, 315.0, 455.0, 490.0, 385.0, 315.0, 350.0, 420.0],
        );
    }

    #[test]
    fn test_seasonal_profile_rounds() {
        let tables = ReferenceTables::embedded().unwrap();
        let profile =
            UsageEstimator::new(&tables.household).seasonal_profile(KilowattHours(245.0)).unwrap();
        // 245 × 1.1 = 269.5, 245 × 0.9 = 220.5:
        assert_eq!(profile[1], KilowattHours(270.0));
        assert_eq!(profile[3], KilowattHours(221.0));
        assert_eq!(profile[2], KilowattHours(245.0));
    }

    #[test]
    fn test_estimate() {
        let tables = ReferenceTables::embedded().unwrap();
        let input = UsageEstimator::new(&tables.household).estimate(3, Yen(10000.0)).unwrap();
        assert_eq!(input.supply_capacity, Amperes(60));
        assert_eq!(input.usage_profile[0], KilowattHours(540.0));
        assert_eq!(input.usage_profile[7], KilowattHours(630.0));
        assert_eq!(input.override_monthly_bill, Some(Yen(10000.0)));
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let tables = ReferenceTables::embedded().unwrap();
        let estimator = UsageEstimator::new(&tables.household);
        assert_eq!(
            estimator.estimate(1, Yen(6000.0)).unwrap().usage_profile,
            estimator.estimate(1, Yen(9000.0)).unwrap().usage_profile,
        );
    }

    #[test]
    fn test_estimate_invalid() {
        let tables = ReferenceTables::embedded().unwrap();
        let estimator = UsageEstimator::new(&tables.household);
        assert!(matches!(
            estimator.estimate(7, Yen(10000.0)),
            Err(InvalidInput::UnknownHouseholdSize(7)),
        ));
        assert!(matches!(estimator.estimate(2, Yen(-1.0)), Err(InvalidInput::InvalidBill(_))));
        assert!(matches!(estimator.estimate(3, Yen(0.0)), Err(InvalidInput::InvalidBill(_))));
    }
}
