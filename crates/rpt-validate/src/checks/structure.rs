//! Root, namespace and required section checks.

use rpt_model::schema::{
    DESIGN_NAMESPACE, RECOMMENDED_PROPERTIES, REPORT_ROOT_TAG, SUPPORTED_VERSIONS,
};

use crate::issue::Issue;
use crate::scan::DesignFacts;

const DATA_SOURCE_MARKER: &str = "oda-data-source";
const DATA_SET_MARKER: &str = "oda-data-set";
const PAGE_SETUP_ELEMENTS: [&str; 2] = ["page-setup", "simple-master-page"];
const BODY_ELEMENT: &str = "body";

/// The namespace check is textual so it holds for prefixed documents too.
pub fn check_namespace(text: &str) -> Vec<Issue> {
    if text.contains(DESIGN_NAMESPACE) {
        Vec::new()
    } else {
        vec![Issue::MissingNamespace]
    }
}

pub fn check(facts: &DesignFacts) -> Vec<Issue> {
    let mut issues = Vec::new();

    if facts.root != REPORT_ROOT_TAG {
        issues.push(Issue::WrongRoot {
            found: facts.root.clone(),
        });
    }

    match facts.root_version.as_deref() {
        None => issues.push(Issue::MissingVersion),
        Some(version) if !SUPPORTED_VERSIONS.contains(&version) => {
            issues.push(Issue::UnsupportedVersion {
                version: version.to_string(),
            });
        }
        Some(_) => {}
    }

    for name in RECOMMENDED_PROPERTIES {
        if !facts.has_name(name) {
            issues.push(Issue::MissingProperty {
                name: name.to_string(),
            });
        }
    }

    if !facts.has_element_like(DATA_SOURCE_MARKER) {
        issues.push(Issue::MissingDataSource);
    }
    if !facts.has_element_like(DATA_SET_MARKER) {
        issues.push(Issue::MissingDataSet);
    }
    if !PAGE_SETUP_ELEMENTS.iter().any(|name| facts.has_element(name)) {
        issues.push(Issue::MissingPageSetup);
    }
    if !facts.has_element(BODY_ELEMENT) {
        issues.push(Issue::MissingBody);
    }

    issues
}
