use clap::Parser;
use tanuki::{
    engine::PlanCostEngine,
    prelude::*,
    profile::{EXPECTED_MAX_USAGE, UsageProfile},
    quantity::{capacity::Amperes, energy::KilowattHours},
    reference::ReferenceTables,
    simulation::SimulationInput,
};

use crate::cli::Output;

#[derive(Parser)]
pub struct DetailedArgs {
    /// Supply capacity of the household connection in amperes.
    #[clap(long)]
    capacity: Amperes,

    /// Usage in kilowatt-hours for each month from January to December, at most 2000 each.
    #[clap(long, value_delimiter = ',', num_args = 1.., required = true)]
    usage: Vec<KilowattHours>,
}

impl DetailedArgs {
    #[instrument(skip_all, fields(capacity = %self.capacity))]
    pub fn run(self, tables: &ReferenceTables, output: Output) -> Result {
        let usage_profile = UsageProfile::try_from(self.usage)?;
        ensure!(!usage_profile.is_all_zero(), "enter the monthly usage, all the months are zero");
        if let Some((month, usage)) = usage_profile.unusual_months().next() {
            bail!("usage in month #{month} must be at most {EXPECTED_MAX_USAGE}, got {usage}");
        }
        let input = SimulationInput::builder()
            .supply_capacity(self.capacity)
            .usage_profile(usage_profile)
            .build();
        let result = PlanCostEngine::new(&tables.plans).simulate(&input)?;
        output.print_result(&result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(usage: [f64; 12]) -> Result {
        let tables = ReferenceTables::embedded()?;
        let usage = usage.map(KilowattHours).to_vec();
        DetailedArgs { capacity: Amperes(30), usage }.run(&tables, Output { json: true })
    }

    #[test]
    fn test_all_zero_usage() {
        assert!(run([0.0; 12]).is_err());
    }

    #[test]
    fn test_usage_above_expected_maximum() {
        let mut usage = [300.0; 12];
        usage[7] = 2000.5;
        let error = run(usage).unwrap_err();
        assert!(error.to_string().contains("month #8"), "{error}");
    }

    #[test]
    fn test_wrong_length() {
        let tables = ReferenceTables::embedded().unwrap();
        let args = DetailedArgs { capacity: Amperes(30), usage: vec![KilowattHours(300.0); 11] };
        assert!(args.run(&tables, Output { json: true }).is_err());
    }
}
