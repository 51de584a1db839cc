//! Optional best-effort repairs for recognizably broken generated queries.
//!
//! Each pass has a deliberately narrow trigger. None of them attempts to
//! make arbitrary SQL correct; anything that does not match the exact
//! pattern is passed through untouched.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Replacement for a constant-only select. Contains the placeholder
/// sentinel, so the normalizer skips parameter binding for it.
pub const FALLBACK_QUERY: &str = "SELECT 1 as id, 'no data' as message";

/// Quoted identifier that collides with a SQL keyword.
pub const RESERVED_TABLE_IDENTIFIER: &str = "'in'";

/// Safe table name substituted for [`RESERVED_TABLE_IDENTIFIER`].
pub const SAFE_TABLE_NAME: &str = "\"DataTable\"";

static FROM_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bFROM\b").expect("Invalid FROM regex"));

/// `SELECT 'label' as col, 'label' as col ...` with nothing else.
static CONSTANT_SELECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)^\s*SELECT\s+('[^']*'\s+as\s+\w+\s*,?\s*)+;?\s*$")
        .expect("Invalid constant select regex")
});

static WHERE_CLAUSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)\bWHERE\b.*").expect("Invalid WHERE regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SanitizePass {
    /// Query has no `FROM` and selects only string constants.
    ConstantSelectFallback,
    /// Query quotes the keyword `in` as a table identifier.
    ReservedTableName,
}

impl fmt::Display for SanitizePass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SanitizePass::ConstantSelectFallback => write!(f, "constant_select_fallback"),
            SanitizePass::ReservedTableName => write!(f, "reserved_table_name"),
        }
    }
}

/// Which passes run. All are off by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SanitizeOptions {
    #[serde(default)]
    pub constant_select_fallback: bool,
    #[serde(default)]
    pub reserved_table_name: bool,
}

impl SanitizeOptions {
    /// Every pass enabled.
    pub fn all() -> Self {
        Self {
            constant_select_fallback: true,
            reserved_table_name: true,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.constant_select_fallback || self.reserved_table_name
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sanitized {
    pub sql: String,
    pub applied: Vec<SanitizePass>,
}

impl Sanitized {
    pub fn changed(&self) -> bool {
        !self.applied.is_empty()
    }
}

/// Run the enabled passes in a fixed order.
pub fn sanitize(sql: &str, options: &SanitizeOptions) -> Sanitized {
    let mut current = sql.to_string();
    let mut applied = Vec::new();

    if options.constant_select_fallback && is_constant_select(&current) {
        warn!("query selects only string constants and has no FROM clause, using fallback query");
        current = FALLBACK_QUERY.to_string();
        applied.push(SanitizePass::ConstantSelectFallback);
    }

    if options.reserved_table_name && current.contains(RESERVED_TABLE_IDENTIFIER) {
        warn!(
            identifier = RESERVED_TABLE_IDENTIFIER,
            replacement = SAFE_TABLE_NAME,
            "reserved word quoted as table identifier"
        );
        current = current.replace(RESERVED_TABLE_IDENTIFIER, SAFE_TABLE_NAME);
        applied.push(SanitizePass::ReservedTableName);
    }

    Sanitized {
        sql: current,
        applied,
    }
}

/// No `FROM` keyword and only `'literal' as name` select items.
pub fn is_constant_select(sql: &str) -> bool {
    !FROM_KEYWORD.is_match(sql) && CONSTANT_SELECT.is_match(sql)
}

/// Advisory check on already-normalized SQL.
///
/// Optional filters are usually written as `(col = ? OR ? IS NULL)`, which
/// binds every parameter twice. An odd placeholder count in such a `WHERE`
/// clause usually means one half of a pair was lost.
pub fn lint_optional_bindings(normalized_sql: &str) -> Option<String> {
    let placeholders = normalized_sql.matches('?').count();
    if placeholders == 0 {
        return None;
    }
    let where_text = WHERE_CLAUSE.find(normalized_sql)?.as_str();
    let upper = where_text.to_uppercase();
    if placeholders % 2 != 0 && upper.contains("OR") && upper.contains("IS NULL") {
        let message = format!(
            "unbalanced optional parameter bindings: {placeholders} placeholders in a WHERE clause using OR/IS NULL"
        );
        warn!("{message}");
        return Some(message);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_select_detected() {
        assert!(is_constant_select("SELECT '停話時間' as 停話時間, '開案編號' as 開案編號"));
        assert!(!is_constant_select("SELECT 'a' as x FROM t"));
        assert!(!is_constant_select("SELECT col FROM t"));
        assert!(!is_constant_select("SELECT 'a' as x, col2"));
    }

    #[test]
    fn passes_are_off_by_default() {
        let sql = "SELECT 'a' as x";
        let result = sanitize(sql, &SanitizeOptions::default());
        assert_eq!(result.sql, sql);
        assert!(!result.changed());
    }

    #[test]
    fn constant_select_replaced_with_fallback() {
        let result = sanitize("SELECT 'a' as x, 'b' as y", &SanitizeOptions::all());
        assert_eq!(result.sql, FALLBACK_QUERY);
        assert_eq!(result.applied, vec![SanitizePass::ConstantSelectFallback]);
        assert!(crate::is_placeholder_query(&result.sql));
    }

    #[test]
    fn reserved_table_identifier_replaced() {
        let result = sanitize("SELECT 'in'.'a' FROM 'in'", &SanitizeOptions::all());
        assert_eq!(result.sql, r#"SELECT "DataTable".'a' FROM "DataTable""#);
        assert_eq!(result.applied, vec![SanitizePass::ReservedTableName]);
    }

    #[test]
    fn reserved_pass_ignores_other_keywords() {
        let sql = "SELECT 'or'.'a' FROM 'or'";
        let result = sanitize(sql, &SanitizeOptions::all());
        assert_eq!(result.sql, sql);
    }

    #[test]
    fn lint_flags_odd_optional_bindings() {
        let sql = "SELECT * FROM t WHERE (a = ? OR ? IS NULL) AND b = ?";
        assert!(lint_optional_bindings(sql).is_some());
        let balanced = "SELECT * FROM t WHERE (a = ? OR ? IS NULL)";
        assert!(lint_optional_bindings(balanced).is_none());
        assert!(lint_optional_bindings("SELECT 1").is_none());
    }
}
