//! Individual validation checks.

pub mod integration;
pub mod prolog;
pub mod sql;
pub mod structure;
