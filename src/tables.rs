use chrono::Month;
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use itertools::Itertools;
use tanuki::{
    plan::{PlanId, PlanMap},
    quantity::currency::Yen,
    simulation::SimulationResult,
    tariff::{Pricing, Tariff},
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

fn savings_color(savings: Yen) -> Color {
    if savings > Yen::ZERO { Color::Green } else { Color::Red }
}

pub fn build_comparison_table(result: &SimulationResult) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Plan", "Monthly", "Annual", "Savings", ""]);
    for (plan_id, yearly_cost) in result.per_plan.iter() {
        let savings = match plan_id {
            PlanId::Current => None,
            PlanId::Standard => Some(result.savings.vs_standard),
            PlanId::Market => Some(result.savings.vs_market),
        };
        let is_recommended = plan_id == result.recommended_plan;
        table.add_row(vec![
            if is_recommended {
                Cell::new(plan_id).add_attribute(Attribute::Bold)
            } else {
                Cell::new(plan_id)
            },
            Cell::new(yearly_cost.monthly_average).set_alignment(CellAlignment::Right),
            Cell::new(yearly_cost.annual_total).set_alignment(CellAlignment::Right),
            savings.map_or_else(
                || Cell::new("").add_attribute(Attribute::Dim),
                |savings| {
                    Cell::new(savings)
                        .set_alignment(CellAlignment::Right)
                        .fg(savings_color(savings))
                },
            ),
            if is_recommended {
                Cell::new("recommended").fg(savings_color(result.savings.annual))
            } else {
                Cell::new("")
            },
        ]);
    }
    table
}

pub fn build_monthly_table(result: &SimulationResult) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Month", "Usage", "Current", "Standard", "Market"]);
    let current = &result.per_plan.current;
    for (index, usage) in result.usage_profile.iter().enumerate() {
        let month = u8::try_from(index + 1).ok().and_then(|month| Month::try_from(month).ok());
        let mut row = vec![
            Cell::new(month.map_or("?", |month| month.name())).add_attribute(Attribute::Dim),
            Cell::new(usage).set_alignment(CellAlignment::Right),
            Cell::new(current.monthly_costs[index]).set_alignment(CellAlignment::Right),
        ];
        for yearly_cost in [&result.per_plan.standard, &result.per_plan.market] {
            let cost = yearly_cost.monthly_costs[index];
            row.push(
                Cell::new(cost)
                    .set_alignment(CellAlignment::Right)
                    .fg(savings_color(current.monthly_costs[index] - cost)),
            );
        }
        table.add_row(row);
    }
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(result.usage_profile.total()).set_alignment(CellAlignment::Right),
        Cell::new(result.per_plan.current.annual_total).set_alignment(CellAlignment::Right),
        Cell::new(result.per_plan.standard.annual_total).set_alignment(CellAlignment::Right),
        Cell::new(result.per_plan.market.annual_total).set_alignment(CellAlignment::Right),
    ]);
    table
}

pub fn build_plans_table(plans: &PlanMap<Tariff>) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Plan", "Name", "Basic charge", "Energy", "Fuel", "Levy"]);
    for (plan_id, tariff) in plans.iter() {
        let basic_charges = tariff
            .basic_charges
            .iter()
            .map(|basic_charge| format!("{}: {}", basic_charge.capacity, basic_charge.charge))
            .join("\n");
        let energy = match &tariff.pricing {
            Pricing::Tiered { tiers } => tiers
                .iter()
                .map(|tier| match tier.to {
                    Some(to) => format!("{:.0}–{to}: {}", tier.from.0, tier.rate),
                    None => format!("{}+: {}", tier.from, tier.rate),
                })
                .join("\n"),
            Pricing::MarketLinked { base_rate, peak_rate, off_peak_rate, weights } => [
                ("peak", peak_rate, weights.peak),
                ("base", base_rate, weights.base),
                ("off-peak", off_peak_rate, weights.off_peak),
            ]
            .into_iter()
            .map(|(period, rate, weight)| format!("{period} {rate} × {:.0}%", weight * 100.0))
            .join("\n"),
        };
        table.add_row(vec![
            Cell::new(plan_id).add_attribute(Attribute::Bold),
            Cell::new(&tariff.name),
            Cell::new(basic_charges).set_alignment(CellAlignment::Right),
            Cell::new(energy).set_alignment(CellAlignment::Right),
            Cell::new(tariff.fuel_adjustment).set_alignment(CellAlignment::Right),
            Cell::new(tariff.renewable_levy).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// How the current annual total splits into the savings and the recommended plan total.
pub fn format_breakdown(result: &SimulationResult) -> String {
    let breakdown = &result.breakdown;
    let share = breakdown
        .savings_share
        .map_or_else(|| "n/a".to_owned(), |share| format!("{:.1}%", share * 100.0));
    format!(
        "Switching to the {} plan: {} saved ({share}) out of {} on the current plan, {} to pay.",
        result.recommended_plan,
        breakdown.savings,
        breakdown.savings + breakdown.new_total,
        breakdown.new_total,
    )
}

#[cfg(test)]
mod tests {
    use tanuki::{
        engine::PlanCostEngine,
        profile::UsageProfile,
        quantity::{capacity::Amperes, energy::KilowattHours},
        reference::ReferenceTables,
        simulation::SimulationInput,
    };

    use super::*;

    fn simulate() -> SimulationResult {
        let tables = ReferenceTables::embedded().unwrap();
        let input = SimulationInput::builder()
            .supply_capacity(Amperes(30))
            .usage_profile(UsageProfile::try_new([KilowattHours(300.0); 12]).unwrap())
            .build();
        PlanCostEngine::new(&tables.plans).simulate(&input).unwrap()
    }

    #[test]
    fn test_monthly_table() {
        let table = build_monthly_table(&simulate()).to_string();
        assert!(table.contains("January"));
        assert!(table.contains("December"));
        assert!(table.contains("3600 kWh"));
    }

    #[test]
    fn test_comparison_table() {
        let table = build_comparison_table(&simulate()).to_string();
        assert!(table.contains("recommended"));
        assert!(table.contains("standard"));
    }

    #[test]
    fn test_plans_table() {
        let tables = ReferenceTables::embedded().unwrap();
        let table = build_plans_table(&tables.plans).to_string();
        assert!(table.contains("Market-linked plan"));
        assert!(table.contains("0–120 kWh: 19.88 ¥/kWh"));
        assert!(table.contains("300 kWh+: 30.57 ¥/kWh"));
    }

    #[test]
    fn test_breakdown() {
        let breakdown = format_breakdown(&simulate());
        assert!(breakdown.starts_with("Switching to the "), "{breakdown}");
    }
}
