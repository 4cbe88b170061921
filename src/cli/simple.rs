use clap::Parser;
use tanuki::{
    engine::PlanCostEngine,
    estimator::UsageEstimator,
    prelude::*,
    quantity::currency::Yen,
    reference::ReferenceTables,
};

use crate::cli::Output;

/// Largest monthly bill accepted from the command line.
const MAX_BILL: Yen = Yen(100_000.0);

#[derive(Parser)]
pub struct SimpleArgs {
    /// Number of people living in the household.
    #[clap(long)]
    household_size: u8,

    /// Actual monthly electricity bill in yen, must be positive.
    #[clap(long)]
    bill: Yen,
}

impl SimpleArgs {
    #[instrument(skip_all, fields(household_size = self.household_size, bill = %self.bill))]
    pub fn run(self, tables: &ReferenceTables, output: Output) -> Result {
        ensure!(
            self.bill > Yen::ZERO && self.bill <= MAX_BILL,
            "monthly bill must be positive and at most {MAX_BILL}, got {}",
            self.bill,
        );
        let input =
            UsageEstimator::new(&tables.household).estimate(self.household_size, self.bill)?;
        let result = PlanCostEngine::new(&tables.plans).simulate(&input)?;
        output.print_result(&result)
    }
}
