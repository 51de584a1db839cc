//! Closed enumerations shared by the analyzer contract and the generator.
//!
//! Both enums accept the analyzer's lowercase/snake_case strings and fall
//! back to a safe default for anything unrecognized, so a newer analyzer
//! can never make deserialization fail.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse report classification suggested by the spreadsheet analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    /// A flat listing of rows.
    SimpleListing,
    /// A listing with more columns or detail sections.
    DetailedListing,
    /// Totals or grouped summaries were detected.
    SummaryReport,
    /// Charts were detected alongside tables.
    Dashboard,
    /// No usable structure detected. Also the target for unknown strings.
    #[default]
    #[serde(other)]
    Empty,
}

impl ReportType {
    /// All variants, fallback first.
    pub const ALL: [ReportType; 5] = [
        ReportType::Empty,
        ReportType::SimpleListing,
        ReportType::DetailedListing,
        ReportType::SummaryReport,
        ReportType::Dashboard,
    ];

    /// Returns the analyzer's wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Empty => "empty",
            ReportType::SimpleListing => "simple_listing",
            ReportType::DetailedListing => "detailed_listing",
            ReportType::SummaryReport => "summary_report",
            ReportType::Dashboard => "dashboard",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReportType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "empty" => Ok(ReportType::Empty),
            "simple_listing" => Ok(ReportType::SimpleListing),
            "detailed_listing" => Ok(ReportType::DetailedListing),
            "summary_report" => Ok(ReportType::SummaryReport),
            "dashboard" => Ok(ReportType::Dashboard),
            _ => Err(format!("Unknown report type: {s}")),
        }
    }
}

/// Coarse column type tag produced by the analyzer.
///
/// Unknown tags deserialize as [`ColumnType::Text`], which maps to the
/// `string` design type like any unrecognized tag must.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Number,
    Decimal,
    Date,
    Boolean,
    #[default]
    #[serde(other)]
    Text,
}

impl ColumnType {
    /// Returns the analyzer's tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Number => "number",
            ColumnType::Decimal => "decimal",
            ColumnType::Date => "date",
            ColumnType::Boolean => "boolean",
        }
    }

    /// Data type name used by the report design schema.
    pub fn design_type(&self) -> &'static str {
        match self {
            ColumnType::Text => "string",
            ColumnType::Number => "integer",
            ColumnType::Decimal => "float",
            ColumnType::Date => "date",
            ColumnType::Boolean => "boolean",
        }
    }

    /// JDBC `java.sql.Types` code for the native data type.
    pub fn native_type_code(&self) -> i32 {
        match self {
            ColumnType::Text => 12,
            ColumnType::Number => 4,
            ColumnType::Decimal => 6,
            ColumnType::Date => 91,
            ColumnType::Boolean => 16,
        }
    }

    /// Parse an analyzer tag, treating anything unrecognized as text.
    pub fn from_tag(tag: &str) -> Self {
        tag.parse().unwrap_or_default()
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(ColumnType::Text),
            "number" => Ok(ColumnType::Number),
            "decimal" => Ok(ColumnType::Decimal),
            "date" => Ok(ColumnType::Date),
            "boolean" => Ok(ColumnType::Boolean),
            _ => Err(format!("Unknown column type: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_type_from_str() {
        assert_eq!(
            "simple_listing".parse::<ReportType>().unwrap(),
            ReportType::SimpleListing
        );
        assert_eq!(
            " DASHBOARD ".parse::<ReportType>().unwrap(),
            ReportType::Dashboard
        );
        assert!("pivot".parse::<ReportType>().is_err());
    }

    #[test]
    fn test_report_type_unknown_deserializes_as_empty() {
        let parsed: ReportType = serde_json::from_str("\"pivot_table\"").unwrap();
        assert_eq!(parsed, ReportType::Empty);
        let parsed: ReportType = serde_json::from_str("\"summary_report\"").unwrap();
        assert_eq!(parsed, ReportType::SummaryReport);
    }

    #[test]
    fn test_column_type_unknown_deserializes_as_text() {
        let parsed: ColumnType = serde_json::from_str("\"currency\"").unwrap();
        assert_eq!(parsed, ColumnType::Text);
        let parsed: ColumnType = serde_json::from_str("\"decimal\"").unwrap();
        assert_eq!(parsed, ColumnType::Decimal);
        assert_eq!(serde_json::to_string(&ColumnType::Text).unwrap(), "\"text\"");
        assert_eq!(
            serde_json::to_string(&ReportType::Empty).unwrap(),
            "\"empty\""
        );
    }

    #[test]
    fn test_column_type_mapping() {
        assert_eq!(ColumnType::Text.design_type(), "string");
        assert_eq!(ColumnType::Number.design_type(), "integer");
        assert_eq!(ColumnType::Decimal.design_type(), "float");
        assert_eq!(ColumnType::Date.design_type(), "date");
        assert_eq!(ColumnType::Boolean.design_type(), "boolean");
        assert_eq!(ColumnType::from_tag("currency").design_type(), "string");
    }

    #[test]
    fn test_column_type_native_codes() {
        assert_eq!(ColumnType::Text.native_type_code(), 12);
        assert_eq!(ColumnType::Date.native_type_code(), 91);
        assert_eq!(ColumnType::from_tag("weird").native_type_code(), 12);
    }
}
