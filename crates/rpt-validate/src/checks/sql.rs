//! Query text and parameter binding checks.

use std::sync::LazyLock;

use regex::Regex;

use crate::issue::Issue;
use crate::scan::DesignFacts;

static QUOTED_CJK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""[^"]*[\x{4e00}-\x{9fff}][^"]*""#).expect("Invalid quoted CJK regex")
});

const BINDINGS_MARKER: &str = "parameterBindings";
const RESULT_SET_MARKERS: [&str; 2] = ["resultSet", "result-set-column"];

fn has_cjk(text: &str) -> bool {
    text.chars().any(|ch| ('\u{4e00}'..='\u{9fff}').contains(&ch))
}

pub fn check(text: &str, facts: &DesignFacts) -> Vec<Issue> {
    let mut issues = Vec::new();

    for query in &facts.query_texts {
        if query.contains('\'') && !query.contains('"') {
            issues.push(Issue::SingleQuotedSql);
        }
        if has_cjk(query) && !QUOTED_CJK_RE.is_match(query) {
            issues.push(Issue::UnquotedCjkSql);
        }
    }

    if facts.scalar_parameters > 0 && !text.contains(BINDINGS_MARKER) {
        issues.push(Issue::UnboundParameters {
            count: facts.scalar_parameters,
        });
    }
    if !RESULT_SET_MARKERS.iter().any(|marker| text.contains(marker)) {
        issues.push(Issue::MissingResultSet);
    }

    issues
}
