//! Structural and integration checks for report design documents.
//!
//! Checks work on the serialized text alone, so any design file can be
//! validated, not only ones this workspace produced. Nonconformance is
//! reported in the [`ValidationReport`], never as an error.

pub mod checks;
pub mod issue;
pub mod scan;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rpt_model::ValidationReport;
use tracing::{debug, info_span};

pub use issue::{Issue, Severity, into_report};
pub use scan::{DesignFacts, scan};

/// Extension of design files picked up by [`validate_dir`].
pub const DESIGN_EXTENSION: &str = "rptdesign";

/// Run every check and return the issues in check order.
pub fn collect_issues(text: &str) -> Vec<Issue> {
    let mut issues = checks::prolog::check(text);
    if issues.contains(&Issue::MissingDeclaration) {
        return issues;
    }

    issues.extend(checks::structure::check_namespace(text));
    let facts = match scan(text) {
        Ok(facts) => facts,
        Err(message) => {
            issues.push(Issue::Malformed { message });
            return issues;
        }
    };
    issues.extend(checks::structure::check(&facts));
    issues.extend(checks::integration::check(text));
    issues.extend(checks::sql::check(text, &facts));
    issues
}

/// Validate serialized design text.
pub fn validate(text: &str) -> ValidationReport {
    let report = into_report(collect_issues(text));
    debug!(
        errors = report.error_count(),
        warnings = report.warning_count(),
        "validated design"
    );
    report
}

/// Validate a design file. A file that cannot be read is an error entry.
pub fn validate_file(path: &Path) -> ValidationReport {
    let span = info_span!("validate", path = %path.display());
    let _guard = span.enter();

    match fs::read_to_string(path) {
        Ok(text) => validate(&text),
        Err(err) => into_report([Issue::Unreadable {
            message: format!("{}: {err}", path.display()),
        }]),
    }
}

/// Validate every `*.rptdesign` file directly inside `dir`, sorted by path.
pub fn validate_dir(dir: &Path) -> io::Result<Vec<(PathBuf, ValidationReport)>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == DESIGN_EXTENSION) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths
        .into_iter()
        .map(|path| {
            let report = validate_file(&path);
            (path, report)
        })
        .collect())
}
