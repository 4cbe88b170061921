use crate::{
    error::InvalidInput,
    plan::{PlanId, PlanMap},
    prelude::*,
    profile::UsageProfile,
    quantity::{capacity::Amperes, currency::Yen},
    simulation::{Breakdown, Savings, SimulationInput, SimulationResult, YearlyCost},
    tariff::Tariff,
};

/// Compares the plans against each other.
#[derive(Copy, Clone)]
pub struct PlanCostEngine<'a> {
    plans: &'a PlanMap<Tariff>,
}

impl<'a> PlanCostEngine<'a> {
    pub const fn new(plans: &'a PlanMap<Tariff>) -> Self {
        Self { plans }
    }

    /// Bill the usage profile month by month under the specified plan.
    ///
    /// Monthly costs are rounded individually, while the annual total is the rounded sum of the
    /// unrounded monthly costs. Thus, the annual total may differ by a few yen from the sum of
    /// the monthly costs.
    #[instrument(skip_all, fields(plan = %plan_id, capacity = %capacity))]
    pub fn compute_yearly_cost(
        &self,
        plan_id: PlanId,
        capacity: Amperes,
        usage_profile: &UsageProfile,
    ) -> Result<YearlyCost, InvalidInput> {
        let tariff = &self.plans[plan_id];
        let basic_charge = tariff
            .basic_charge(capacity)
            .ok_or(InvalidInput::UnknownCapacity { plan: plan_id, capacity })?;
        let unrounded =
            usage_profile.months().map(|usage| tariff.monthly_cost(basic_charge, usage));
        let annual_total = unrounded.iter().copied().sum::<Yen>().round();
        if !annual_total.is_finite() {
            return Err(InvalidInput::CostOverflow { plan: plan_id });
        }
        let yearly_cost = YearlyCost {
            annual_total,
            monthly_average: (annual_total / 12.0).round(),
            monthly_costs: unrounded.map(Yen::round),
        };
        debug!(%yearly_cost.annual_total, %yearly_cost.monthly_average, "billed");
        Ok(yearly_cost)
    }

    /// Bill the input under all the plans and recommend the best alternative to the current one.
    ///
    /// The recommendation is always one of the alternatives, even if it is more expensive
    /// than the current plan. In that case, the savings are negative.
    #[instrument(skip_all, fields(capacity = %input.supply_capacity))]
    pub fn simulate(&self, input: &SimulationInput) -> Result<SimulationResult, InvalidInput> {
        let mut per_plan = PlanMap::try_from_fn(|plan_id| {
            self.compute_yearly_cost(plan_id, input.supply_capacity, &input.usage_profile)
        })?;

        if let Some(bill) = input.override_monthly_bill {
            if !bill.is_finite() || bill <= Yen::ZERO {
                return Err(InvalidInput::InvalidBill(bill));
            }
            // Monthly costs are left as modelled, only the totals reflect the actual bill:
            per_plan.current.annual_total = bill * 12.0;
            per_plan.current.monthly_average = bill;
        }

        let vs_standard = per_plan.current.annual_total - per_plan.standard.annual_total;
        let vs_market = per_plan.current.annual_total - per_plan.market.annual_total;

        // Ties go to the market-linked plan:
        let (recommended_plan, best_savings) = if vs_standard > vs_market {
            (PlanId::Standard, vs_standard)
        } else {
            (PlanId::Market, vs_market)
        };
        let annual = best_savings.round();
        let savings = Savings {
            annual,
            monthly: (annual / 12.0).round(),
            vs_standard: vs_standard.round(),
            vs_market: vs_market.round(),
        };
        info!(%recommended_plan, %savings.annual, %savings.monthly, "simulated");

        Ok(SimulationResult {
            breakdown: Breakdown::new(savings.annual, per_plan[recommended_plan].annual_total),
            per_plan,
            savings,
            recommended_plan,
            usage_profile: input.usage_profile,
            supply_capacity: input.supply_capacity,
        })
    }
}
