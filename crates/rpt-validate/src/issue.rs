//! Validation issue types.
//!
//! Each variant carries only the data its message needs. Severity is fixed
//! per variant.

use std::fmt;

use rpt_model::ValidationReport;
use serde::{Deserialize, Serialize};

/// Issue severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Fails the document
    Error,
    /// Should review
    Warning,
}

impl Severity {
    /// Parse severity from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warning" => Some(Self::Warning),
            _ => None,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warning => "Warning",
        }
    }
}

/// Validation issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Issue {
    // Prolog checks
    /// Text does not open with an XML declaration
    MissingDeclaration,
    /// Declaration does not name UTF-8
    MissingUtf8Encoding,
    /// Markup written without line breaks
    CompactMarkup,
    /// Document could not be parsed
    Malformed { message: String },
    /// File could not be read
    Unreadable { message: String },

    // Structure checks
    /// Root element is not `report`
    WrongRoot { found: String },
    /// Design namespace URI absent from the text
    MissingNamespace,
    /// Root carries no `version`
    MissingVersion,
    /// Root `version` is not a known design version
    UnsupportedVersion { version: String },
    /// Recommended report property absent
    MissingProperty { name: String },
    MissingDataSource,
    MissingDataSet,
    MissingPageSetup,
    MissingBody,

    // Integration checks
    /// A bootstrap marker string is absent
    MissingMarker { marker: String, what: String },

    // SQL checks
    /// Query text uses single quotes and no double quotes
    SingleQuotedSql,
    /// Chinese characters in a query with no double-quoted identifier around them
    UnquotedCjkSql,
    /// Parameters declared but never bound
    UnboundParameters { count: usize },
    /// No result-set description at all
    MissingResultSet,
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::MissingDeclaration
            | Issue::Malformed { .. }
            | Issue::Unreadable { .. }
            | Issue::WrongRoot { .. }
            | Issue::MissingNamespace
            | Issue::MissingDataSource
            | Issue::MissingDataSet
            | Issue::MissingBody => Severity::Error,
            Issue::MissingUtf8Encoding
            | Issue::CompactMarkup
            | Issue::MissingVersion
            | Issue::UnsupportedVersion { .. }
            | Issue::MissingProperty { .. }
            | Issue::MissingPageSetup
            | Issue::MissingMarker { .. }
            | Issue::SingleQuotedSql
            | Issue::UnquotedCjkSql
            | Issue::UnboundParameters { .. }
            | Issue::MissingResultSet => Severity::Warning,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::MissingDeclaration => f.write_str("missing XML declaration"),
            Issue::MissingUtf8Encoding => f.write_str("XML declaration does not specify UTF-8 encoding"),
            Issue::CompactMarkup => f.write_str("markup is compact; expected indented output"),
            Issue::Malformed { message } => write!(f, "XML parse error: {message}"),
            Issue::Unreadable { message } => write!(f, "cannot read file: {message}"),
            Issue::WrongRoot { found } => write!(f, "root element must be <report>, found <{found}>"),
            Issue::MissingNamespace => f.write_str("missing or incorrect design namespace"),
            Issue::MissingVersion => f.write_str("report version attribute is missing"),
            Issue::UnsupportedVersion { version } => {
                write!(f, "report version {version} is not a supported design version")
            }
            Issue::MissingProperty { name } => write!(f, "missing recommended property: {name}"),
            Issue::MissingDataSource => f.write_str("no data source defined"),
            Issue::MissingDataSet => f.write_str("no data set defined"),
            Issue::MissingPageSetup => f.write_str("no page setup defined"),
            Issue::MissingBody => f.write_str("missing report body"),
            Issue::MissingMarker { marker, what } => write!(f, "missing {what}: {marker}"),
            Issue::SingleQuotedSql => {
                f.write_str("query text uses single-quoted identifiers; use double quotes")
            }
            Issue::UnquotedCjkSql => {
                f.write_str("query text has Chinese identifiers outside double quotes")
            }
            Issue::UnboundParameters { count } => {
                write!(f, "{count} report parameter(s) declared without parameterBindings")
            }
            Issue::MissingResultSet => f.write_str("no result set columns defined"),
        }
    }
}

/// Fold issues into a report, preserving their order within each severity.
pub fn into_report(issues: impl IntoIterator<Item = Issue>) -> ValidationReport {
    let mut report = ValidationReport::new();
    for issue in issues {
        match issue.severity() {
            Severity::Error => report.error(issue.to_string()),
            Severity::Warning => report.warning(issue.to_string()),
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_parse() {
        assert_eq!(Severity::parse(" Warning "), Some(Severity::Warning));
        assert_eq!(Severity::parse("error"), Some(Severity::Error));
        assert_eq!(Severity::parse("reject"), None);
    }

    #[test]
    fn test_into_report_splits_by_severity() {
        let report = into_report([
            Issue::MissingVersion,
            Issue::MissingNamespace,
            Issue::MissingProperty {
                name: "units".to_string(),
            },
        ]);
        assert_eq!(report.errors, vec!["missing or incorrect design namespace"]);
        assert_eq!(
            report.warnings,
            vec![
                "report version attribute is missing",
                "missing recommended property: units"
            ]
        );
    }
}
