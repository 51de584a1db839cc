//! Spreadsheet analysis result, as produced by the external analyzer.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::enums::{ColumnType, ReportType};

/// A detected table: ordered headers plus per-header type and samples.
///
/// Header order is load-bearing: it fixes column positions in every
/// metadata block and layout row generated from this table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableInfo {
    pub name: String,
    pub headers: Vec<String>,
    #[serde(default)]
    pub data_types: BTreeMap<String, ColumnType>,
    #[serde(default)]
    pub sample_data: BTreeMap<String, Vec<serde_json::Value>>,
    #[serde(default)]
    pub row_count: usize,
    #[serde(default)]
    pub has_totals: bool,
}

impl TableInfo {
    pub fn new(name: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            name: name.into(),
            headers,
            ..Self::default()
        }
    }

    /// Set the type of one header.
    #[must_use]
    pub fn with_type(mut self, header: &str, column_type: ColumnType) -> Self {
        self.data_types.insert(header.to_string(), column_type);
        self
    }

    #[must_use]
    pub fn with_row_count(mut self, row_count: usize) -> Self {
        self.row_count = row_count;
        self
    }

    /// Coarse type of a header, looked up by name. Missing entries are text.
    pub fn column_type(&self, header: &str) -> ColumnType {
        self.data_types.get(header).copied().unwrap_or_default()
    }

    /// Headers paired with their coarse types, in header order.
    pub fn typed_headers(&self) -> impl Iterator<Item = (&str, ColumnType)> + '_ {
        self.headers
            .iter()
            .map(|header| (header.as_str(), self.column_type(header)))
    }
}

/// A detected chart. Only its presence is consumed by the generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartInfo {
    pub chart_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub data_range: String,
    #[serde(default)]
    pub series_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub file_name: String,
    #[serde(default)]
    pub tables: Vec<TableInfo>,
    #[serde(default)]
    pub charts: Vec<ChartInfo>,
    #[serde(default)]
    pub suggested_report_type: ReportType,
    #[serde(default)]
    pub complexity_score: u8,
}

impl AnalysisResult {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_table(mut self, table: TableInfo) -> Self {
        self.tables.push(table);
        self
    }

    #[must_use]
    pub fn with_report_type(mut self, report_type: ReportType) -> Self {
        self.suggested_report_type = report_type;
        self
    }

    /// The first table; the only one the layout is built from.
    pub fn primary_table(&self) -> Option<&TableInfo> {
        self.tables.first()
    }

    pub fn chart_count(&self) -> usize {
        self.charts.len()
    }

    /// File name with its directory and extension removed.
    pub fn file_stem(&self) -> String {
        Path::new(&self.file_name)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(self.file_name.as_str())
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_type_lookup_is_by_name() {
        let table = TableInfo::new("Sheet1", vec!["b".into(), "a".into()])
            .with_type("a", ColumnType::Number)
            .with_type("b", ColumnType::Date);
        let typed: Vec<_> = table.typed_headers().collect();
        assert_eq!(typed, vec![("b", ColumnType::Date), ("a", ColumnType::Number)]);
    }

    #[test]
    fn missing_type_defaults_to_text() {
        let table = TableInfo::new("Sheet1", vec!["x".into()]);
        assert_eq!(table.column_type("x"), ColumnType::Text);
    }

    #[test]
    fn file_stem_strips_extension() {
        assert_eq!(AnalysisResult::new("sales.xlsx").file_stem(), "sales");
        assert_eq!(AnalysisResult::new("in/q1.report.xls").file_stem(), "q1.report");
        assert_eq!(AnalysisResult::new("plain").file_stem(), "plain");
    }

    #[test]
    fn deserializes_analyzer_json() {
        let json = r#"{
            "file_name": "codes.xlsx",
            "tables": [{
                "name": "Sheet1",
                "headers": ["code", "name"],
                "data_types": {"code": "text", "name": "text"},
                "sample_data": {"code": ["001", "002"]},
                "row_count": 10
            }],
            "charts": [],
            "suggested_report_type": "simple_listing",
            "complexity_score": 2
        }"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.suggested_report_type, ReportType::SimpleListing);
        let table = result.primary_table().unwrap();
        assert_eq!(table.headers, vec!["code", "name"]);
        assert_eq!(table.row_count, 10);
        assert!(!table.has_totals);
    }
}
