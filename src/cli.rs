mod detailed;
mod plans;
mod reference;
mod simple;

use clap::{Parser, Subcommand};
use tanuki::{prelude::*, simulation::SimulationResult};

use crate::{
    cli::{detailed::DetailedArgs, plans::PlansArgs, reference::ReferenceArgs, simple::SimpleArgs},
    tables::{build_comparison_table, build_monthly_table, format_breakdown},
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[clap(flatten)]
    reference: ReferenceArgs,

    /// Print JSON instead of the tables.
    #[clap(long, env = "TANUKI_JSON", global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn run(self) -> Result {
        let tables = self.reference.load()?;
        let output = Output { json: self.json };
        match self.command {
            Command::Simple(args) => args.run(&tables, output),
            Command::Detailed(args) => args.run(&tables, output),
            Command::Plans(args) => args.run(&tables, output),
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Estimate the usage from the household size and compare the plans against the actual bill.
    Simple(SimpleArgs),

    /// Compare the plans for the known monthly usage.
    Detailed(DetailedArgs),

    /// Print the plans.
    Plans(PlansArgs),
}

#[derive(Copy, Clone)]
pub struct Output {
    json: bool,
}

impl Output {
    fn print_result(self, result: &SimulationResult) -> Result {
        if self.json {
            println!("{}", serde_json::to_string_pretty(result)?);
            return Ok(());
        }
        println!("{}", build_monthly_table(result));
        println!("{}", build_comparison_table(result));
        println!("{}", format_breakdown(result));
        if !result.is_beneficial() {
            warn!(
                plan = %result.recommended_plan,
                savings = %result.savings.annual,
                "switching would not save money",
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let args =
            Args::try_parse_from(["tanuki", "simple", "--household-size", "3", "--bill", "10000"])
                .unwrap();
        assert!(matches!(args.command, Command::Simple(_)));
    }

    #[test]
    fn test_parse_detailed() {
        let args = Args::try_parse_from([
            "tanuki",
            "detailed",
            "--capacity",
            "30",
            "--usage",
            "300,300,300,300,300,300,300,300,300,300,300,300",
            "--json",
        ])
        .unwrap();
        assert!(args.json);
        assert!(matches!(args.command, Command::Detailed(_)));
    }

    #[test]
    fn test_parse_rejects_malformed_numbers() {
        assert!(
            Args::try_parse_from(["tanuki", "simple", "--household-size", "3", "--bill", "lots"])
                .is_err()
        );
        assert!(
            Args::try_parse_from(["tanuki", "detailed", "--capacity", "30A", "--usage", "1"])
                .is_err()
        );
    }

    #[test]
    fn test_parse_requires_subcommand() {
        assert!(Args::try_parse_from(["tanuki"]).is_err());
    }
}
