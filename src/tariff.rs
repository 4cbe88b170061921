use serde::{Deserialize, Serialize};

use crate::quantity::{
    capacity::Amperes,
    currency::Yen,
    energy::KilowattHours,
    rate::YenPerKilowattHour,
};

/// Static definition of a single rate plan.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tariff {
    /// Human-readable plan name.
    pub name: String,

    /// Flat monthly charge per supply capacity.
    pub basic_charges: Vec<BasicCharge>,

    /// Per-unit surcharge on top of the energy price, not applied to market-linked pricing.
    #[serde(default = "YenPerKilowattHour::zero")]
    pub fuel_adjustment: YenPerKilowattHour,

    /// Per-unit levy on top of the energy price.
    #[serde(default = "YenPerKilowattHour::zero")]
    pub renewable_levy: YenPerKilowattHour,

    pub pricing: Pricing,
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct BasicCharge {
    pub capacity: Amperes,
    pub charge: Yen,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Pricing {
    /// Usage bands, each with its own per-unit price.
    Tiered { tiers: Vec<RateTier> },

    /// Fixed time-of-use blend, not measured time-of-use data.
    MarketLinked {
        base_rate: YenPerKilowattHour,
        peak_rate: YenPerKilowattHour,
        off_peak_rate: YenPerKilowattHour,
        weights: TimeOfUseWeights,
    },
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct RateTier {
    pub from: KilowattHours,

    /// Upper bound, [`None`] for the unbounded top tier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<KilowattHours>,

    pub rate: YenPerKilowattHour,
}

impl RateTier {
    pub fn width(&self) -> KilowattHours {
        self.to.map_or(KilowattHours::INFINITY, |to| to - self.from)
    }
}

/// Share of the monthly usage attributed to each time-of-use period.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct TimeOfUseWeights {
    pub peak: f64,
    pub base: f64,
    pub off_peak: f64,
}

impl TimeOfUseWeights {
    pub fn total(self) -> f64 {
        self.peak + self.base + self.off_peak
    }
}

impl YenPerKilowattHour {
    const fn zero() -> Self {
        Self::ZERO
    }
}

impl Tariff {
    pub fn basic_charge(&self, capacity: Amperes) -> Option<Yen> {
        self.basic_charges
            .iter()
            .find(|basic_charge| basic_charge.capacity == capacity)
            .map(|basic_charge| basic_charge.charge)
    }

    pub fn capacities(&self) -> impl Iterator<Item = Amperes> {
        self.basic_charges.iter().map(|basic_charge| basic_charge.capacity)
    }

    /// Unrounded monthly cost for the given usage on top of the already looked up basic charge.
    ///
    /// The terms are added one by one in billing order, so that the result does not depend
    /// on how the floating-point sum gets associated.
    pub fn monthly_cost(&self, basic_charge: Yen, usage: KilowattHours) -> Yen {
        match &self.pricing {
            Pricing::Tiered { tiers } => {
                let (cost, _) =
                    tiers.iter().fold((basic_charge, usage), |(cost, remaining), tier| {
                        if remaining <= KilowattHours::ZERO {
                            return (cost, remaining);
                        }
                        let consumed = remaining.min(tier.width()).max(KilowattHours::ZERO);
                        (cost + consumed * tier.rate, remaining - consumed)
                    });
                cost + usage * (self.fuel_adjustment + self.renewable_levy)
            }
            Pricing::MarketLinked { base_rate, peak_rate, off_peak_rate, weights } => {
                basic_charge
                    + usage * weights.peak * *peak_rate
                    + usage * weights.base * *base_rate
                    + usage * weights.off_peak * *off_peak_rate
                    + usage * self.renewable_levy
            }
        }
    }

    /// Per-unit energy price of the market-linked blend, without the levy.
    pub fn blended_rate(&self) -> Option<YenPerKilowattHour> {
        match &self.pricing {
            Pricing::Tiered { .. } => None,
            Pricing::MarketLinked { base_rate, peak_rate, off_peak_rate, weights } => Some(
                *peak_rate * weights.peak
                    + *base_rate * weights.base
                    + *off_peak_rate * weights.off_peak,
            ),
        }
    }
}
