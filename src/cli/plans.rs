use clap::Parser;
use tanuki::{prelude::*, reference::ReferenceTables};

use crate::{cli::Output, tables::build_plans_table};

#[derive(Parser)]
pub struct PlansArgs {}

impl PlansArgs {
    pub fn run(self, tables: &ReferenceTables, output: Output) -> Result {
        if output.json {
            println!("{}", serde_json::to_string_pretty(tables)?);
        } else {
            println!("{}", build_plans_table(&tables.plans));
        }
        Ok(())
    }
}
