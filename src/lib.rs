#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

pub mod engine;
pub mod error;
pub mod estimator;
pub mod plan;
pub mod prelude;
pub mod profile;
pub mod quantity;
pub mod reference;
pub mod simulation;
pub mod tariff;
