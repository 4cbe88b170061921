use std::path::PathBuf;

use clap::Parser;
use tanuki::{prelude::*, reference::ReferenceTables};

#[derive(Parser)]
pub struct ReferenceArgs {
    /// TOML file with the reference tables to use instead of the built-in ones.
    #[clap(long = "reference", env = "TANUKI_REFERENCE", global = true)]
    path: Option<PathBuf>,
}

impl ReferenceArgs {
    pub fn load(&self) -> Result<ReferenceTables> {
        match &self.path {
            Some(path) => ReferenceTables::read_from(path),
            None => {
                ReferenceTables::embedded().context("the built-in reference tables are invalid")
            }
        }
    }
}
