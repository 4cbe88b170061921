use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::{error::InvalidInput, quantity::energy::KilowattHours};

pub const N_MONTHS: usize = 12;

/// Usage upper bound the reference tables are calibrated for.
///
/// Larger values are still billed, they are just unusual for a household.
pub const EXPECTED_MAX_USAGE: KilowattHours = KilowattHours(2000.0);

/// Monthly usage over a year, index 0 being the first month.
///
/// Every value is finite and non-negative.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<KilowattHours>")]
pub struct UsageProfile([KilowattHours; N_MONTHS]);

impl UsageProfile {
    pub fn try_new(months: [KilowattHours; N_MONTHS]) -> Result<Self, InvalidInput> {
        for (month, usage) in months.iter().copied().enumerate() {
            if !usage.is_finite() || usage < KilowattHours::ZERO {
                return Err(InvalidInput::InvalidUsage { month: month + 1, usage });
            }
        }
        Ok(Self(months))
    }

    pub fn iter(&self) -> impl Iterator<Item = KilowattHours> {
        self.0.iter().copied()
    }

    pub const fn months(&self) -> [KilowattHours; N_MONTHS] {
        self.0
    }

    pub fn total(&self) -> KilowattHours {
        self.iter().sum()
    }

    pub fn is_all_zero(&self) -> bool {
        self.iter().all(|usage| usage == KilowattHours::ZERO)
    }

    /// Months, starting from 1, where the usage exceeds [`EXPECTED_MAX_USAGE`].
    pub fn unusual_months(&self) -> impl Iterator<Item = (usize, KilowattHours)> {
        self.iter()
            .enumerate()
            .filter(|(_, usage)| *usage > EXPECTED_MAX_USAGE)
            .map(|(index, usage)| (index + 1, usage))
    }
}

impl TryFrom<Vec<KilowattHours>> for UsageProfile {
    type Error = InvalidInput;

    fn try_from(months: Vec<KilowattHours>) -> Result<Self, Self::Error> {
        let n_months = months.len();
        let months: [KilowattHours; N_MONTHS] =
            months.try_into().map_err(|_| InvalidInput::ProfileLength(n_months))?;
        Self::try_new(months)
    }
}

impl TryFrom<&[f64]> for UsageProfile {
    type Error = InvalidInput;

    fn try_from(months: &[f64]) -> Result<Self, Self::Error> {
        months.iter().copied().map(KilowattHours).collect::<Vec<_>>().try_into()
    }
}

impl Index<usize> for UsageProfile {
    type Output = KilowattHours;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    #[test]
    fn test_valid() {
        let profile = UsageProfile::try_from([300.0; 12].as_slice()).unwrap();
        assert_eq!(profile.total(), KilowattHours(3600.0));
        assert!(!profile.is_all_zero());
    }

    #[test]
    fn test_wrong_length() {
        assert_eq!(
            UsageProfile::try_from([300.0; 11].as_slice()),
            Err(InvalidInput::ProfileLength(11)),
        );
        assert_eq!(
            UsageProfile::try_from([300.0; 13].as_slice()),
            Err(InvalidInput::ProfileLength(13)),
        );
    }

    #[test]
    fn test_negative_usage() {
        let mut months = [100.0; 12];
        months[4] = -1.0;
        assert_eq!(
            UsageProfile::try_from(months.as_slice()),
            Err(InvalidInput::InvalidUsage { month: 5, usage: KilowattHours(-1.0) }),
        );
    }

    #[test]
    fn test_non_finite_usage() {
        let mut months = [100.0; 12];
        months[11] = f64::INFINITY;
        assert!(matches!(
            UsageProfile::try_from(months.as_slice()),
            Err(InvalidInput::InvalidUsage { month: 12, .. }),
        ));
        months[11] = f64::NAN;
        assert!(matches!(
            UsageProfile::try_from(months.as_slice()),
            Err(InvalidInput::InvalidUsage { month: 12, .. }),
        ));
    }

    #[test]
    fn test_unusual_months() {
        let mut months = [100.0; 12];
        months[7] = 2500.0;
        let profile = UsageProfile::try_from(months.as_slice()).unwrap();
        assert_eq!(profile.unusual_months().collect_vec(), [(8, KilowattHours(2500.0))]);
    }

    #[test]
    fn test_deserialize_validates() {
        assert!(serde_json::from_str::<UsageProfile>("[1,2,3]").is_err());
        assert!(serde_json::from_str::<UsageProfile>("[1,2,3,4,5,6,7,8,9,10,11,-12]").is_err());
        let profile =
            serde_json::from_str::<UsageProfile>("[1,2,3,4,5,6,7,8,9,10,11,12]").unwrap();
        assert_eq!(profile[11], KilowattHours(12.0));
    }
}
