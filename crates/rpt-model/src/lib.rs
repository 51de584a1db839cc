//! Data model for report design generation.
//!
//! Inputs come from two external collaborators: the spreadsheet analyzer
//! ([`AnalysisResult`]) and the config producer ([`GeneratedConfig`]).
//! [`ValidationReport`] is the validator's output.

pub mod analysis;
pub mod config;
pub mod enums;
pub mod error;
pub mod job;
pub mod schema;
pub mod validation;

pub use analysis::{AnalysisResult, ChartInfo, TableInfo};
pub use config::{DEFAULT_DB_URL, DEFAULT_QUERY, DataSourceConfig, GeneratedConfig, ParameterSpec};
pub use enums::{ColumnType, ReportType};
pub use error::{ModelError, Result};
pub use job::ReportJob;
pub use validation::ValidationReport;
