use std::{
    fmt::{Display, Formatter},
    ops::Index,
    str::FromStr,
};

use enumset::EnumSet;
use serde::{Deserialize, Serialize};

use crate::error::InvalidInput;

#[derive(Debug, Hash, Serialize, Deserialize, enumset::EnumSetType)]
#[serde(rename_all = "snake_case")]
pub enum PlanId {
    /// The plan the household is on today.
    Current,

    /// Flat basic charge with tiered energy pricing, cheaper than the current one.
    Standard,

    /// No basic charge, energy priced by a fixed peak/base/off-peak blend.
    Market,
}

impl PlanId {
    pub fn all() -> impl Iterator<Item = Self> {
        EnumSet::<Self>::all().iter()
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Standard => "standard",
            Self::Market => "market",
        }
    }
}

impl Display for PlanId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanId {
    type Err = InvalidInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .find(|plan_id| plan_id.as_str() == s)
            .ok_or_else(|| InvalidInput::UnknownPlan(s.to_owned()))
    }
}

/// One value per plan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanMap<T> {
    pub current: T,
    pub standard: T,
    pub market: T,
}

impl<T> PlanMap<T> {
    pub fn try_from_fn<E>(mut f: impl FnMut(PlanId) -> Result<T, E>) -> Result<Self, E> {
        Ok(Self {
            current: f(PlanId::Current)?,
            standard: f(PlanId::Standard)?,
            market: f(PlanId::Market)?,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlanId, &T)> {
        PlanId::all().map(move |plan_id| (plan_id, &self[plan_id]))
    }
}

impl<T> Index<PlanId> for PlanMap<T> {
    type Output = T;

    fn index(&self, plan_id: PlanId) -> &Self::Output {
        match plan_id {
            PlanId::Current => &self.current,
            PlanId::Standard => &self.standard,
            PlanId::Market => &self.market,
        }
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("market".parse::<PlanId>(), Ok(PlanId::Market));
        assert_eq!(
            "premium".parse::<PlanId>(),
            Err(InvalidInput::UnknownPlan("premium".to_owned())),
        );
    }

    #[test]
    fn test_iter_order() {
        let map = PlanMap { current: 1, standard: 2, market: 3 };
        assert_eq!(
            map.iter().collect_vec(),
            [(PlanId::Current, &1), (PlanId::Standard, &2), (PlanId::Market, &3)],
        );
    }
}
