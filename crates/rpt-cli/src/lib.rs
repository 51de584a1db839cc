//! CLI library components for the report design generator.

pub mod logging;
pub mod pipeline;
pub mod types;
