//! Identifier requoting and named-to-positional parameter rewriting.
//!
//! The input is free-form SQL from a generator that is close to valid but
//! stylistically inconsistent: identifiers may be single-quoted and
//! parameters use `:name` syntax. The design tool's JDBC connector wants
//! double-quoted identifiers and `?` placeholders bound by ordinal position.
//!
//! All rewrites are pattern-based and line-local; there is no SQL parser.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Substring identifying the built-in placeholder query.
pub const PLACEHOLDER_SENTINEL: &str = "SELECT 1 as id";

/// Character substituted for each named parameter.
pub const POSITIONAL_PLACEHOLDER: char = '?';

/// `'alias'.'field'`
static QUALIFIED_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'([^'\n]*)'\.'([^'\n]*)'").expect("Invalid identifier regex"));

/// `FROM 'table'` / `JOIN 'table'`, keyword case and spacing preserved.
static TABLE_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(FROM|JOIN)(\s+)'([^'\n]+)'").expect("Invalid table clause regex")
});

/// Any single-quoted token on one line.
static QUOTED_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'([^'\n]*?)'").expect("Invalid quoted token regex"));

/// `:name`, word characters only (Unicode aware).
static NAMED_PARAMETER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":(\w+)").expect("Invalid named parameter regex"));

/// How far identifier requoting goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStyle {
    /// Requote `'a'.'b'` pairs and `FROM`/`JOIN` table names only.
    #[default]
    Identifiers,
    /// Additionally requote any single-quoted token containing CJK
    /// characters or spaces. This also hits string literals, so it is
    /// only kept for reproducing older output.
    Aggressive,
}

/// Rewritten query text plus the parameter names it used, in order.
///
/// The Nth `?` in `text` binds the Nth entry of `params`. Names are kept in
/// left-to-right order of appearance and are not deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedSql {
    pub text: String,
    pub params: Vec<String>,
}

impl NormalizedSql {
    pub fn has_params(&self) -> bool {
        !self.params.is_empty()
    }

    /// `(position, name)` pairs, positions starting at 1.
    pub fn bindings(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.params
            .iter()
            .enumerate()
            .map(|(idx, name)| (idx + 1, name.as_str()))
    }
}

/// Returns true for the built-in "no real query supplied" placeholder.
pub fn is_placeholder_query(sql: &str) -> bool {
    sql.contains(PLACEHOLDER_SENTINEL)
}

/// Normalize with the default [`QuoteStyle::Identifiers`].
pub fn normalize(raw: &str) -> NormalizedSql {
    normalize_with(raw, QuoteStyle::default())
}

pub fn normalize_with(raw: &str, style: QuoteStyle) -> NormalizedSql {
    if is_placeholder_query(raw) {
        debug!("placeholder query, skipping parameter binding");
        return NormalizedSql {
            text: raw.to_string(),
            params: Vec::new(),
        };
    }

    let requoted = requote_identifiers(raw, style);
    let params = extract_named_params(&requoted);
    let text = NAMED_PARAMETER
        .replace_all(&requoted, POSITIONAL_PLACEHOLDER.to_string().as_str())
        .into_owned();

    debug!(sql = %text, param_count = params.len(), "normalized query");
    NormalizedSql { text, params }
}

/// Rewrite single-quoted identifiers to double-quoted form.
pub fn requote_identifiers(sql: &str, style: QuoteStyle) -> String {
    let sql = QUALIFIED_IDENTIFIER.replace_all(sql, r#""${1}"."${2}""#);
    let sql = TABLE_CLAUSE.replace_all(&sql, r#"${1}${2}"${3}""#);
    match style {
        QuoteStyle::Identifiers => sql.into_owned(),
        QuoteStyle::Aggressive => QUOTED_TOKEN
            .replace_all(&sql, |caps: &Captures<'_>| {
                let content = &caps[1];
                if content.chars().any(|ch| ch == ' ' || is_cjk(ch)) {
                    format!("\"{content}\"")
                } else {
                    caps[0].to_string()
                }
            })
            .into_owned(),
    }
}

/// Every `:name` occurrence, left to right, duplicates included.
pub fn extract_named_params(sql: &str) -> Vec<String> {
    NAMED_PARAMETER
        .captures_iter(sql)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// CJK Unified Ideographs block.
pub fn is_cjk(ch: char) -> bool {
    ('\u{4e00}'..='\u{9fff}').contains(&ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requotes_qualified_identifiers() {
        let sql = "SELECT 'in'.'案號', 'u'.'name' FROM 'TsUnit' u";
        let out = requote_identifiers(sql, QuoteStyle::Identifiers);
        assert_eq!(out, r#"SELECT "in"."案號", "u"."name" FROM "TsUnit" u"#);
    }

    #[test]
    fn table_clause_keeps_keyword_case() {
        let out = requote_identifiers("select * from 'A' left join  'B' on 1=1", QuoteStyle::Identifiers);
        assert_eq!(out, r#"select * from "A" left join  "B" on 1=1"#);
    }

    #[test]
    fn identifiers_style_leaves_string_literals() {
        let sql = "SELECT a FROM \"T\" WHERE b = 'hello world'";
        assert_eq!(requote_identifiers(sql, QuoteStyle::Identifiers), sql);
    }

    #[test]
    fn aggressive_style_requotes_cjk_and_spaced_tokens() {
        let sql = "SELECT '名稱', 'plain', 'two words' FROM t";
        let out = requote_identifiers(sql, QuoteStyle::Aggressive);
        assert_eq!(out, r#"SELECT "名稱", 'plain', "two words" FROM t"#);
    }

    #[test]
    fn requoting_does_not_span_lines() {
        let sql = "SELECT 'a\n'.'b' FROM x";
        assert_eq!(requote_identifiers(sql, QuoteStyle::Identifiers), sql);
    }

    #[test]
    fn extracts_unicode_parameter_names() {
        let params = extract_named_params("WHERE a = :案號 AND b = :銀行代碼");
        assert_eq!(params, vec!["案號", "銀行代碼"]);
    }

    #[test]
    fn bindings_are_one_based() {
        let normalized = normalize("WHERE a = :x OR b = :y");
        let bindings: Vec<_> = normalized.bindings().collect();
        assert_eq!(bindings, vec![(1, "x"), (2, "y")]);
    }
}
