//! Core types and default configuration values shared across Haven crates.

pub mod defaults;

mod plan;

pub use plan::{Plan, PlanParseError};
