//! Data source bootstrap markers expected by the deployment environment.

use rpt_model::schema::{INIT_CALL_MARKER, INIT_IMPORT_MARKER, JDBC_DRIVER_CLASS, JDBC_URL_SCHEME};

use crate::issue::Issue;

const MARKERS: [(&str, &str); 4] = [
    (JDBC_DRIVER_CLASS, "JDBC driver class"),
    (INIT_IMPORT_MARKER, "initialization import"),
    (INIT_CALL_MARKER, "data source initialization call"),
    (JDBC_URL_SCHEME, "JDBC URL scheme"),
];

pub fn check(text: &str) -> Vec<Issue> {
    MARKERS
        .iter()
        .filter(|(marker, _)| !text.contains(marker))
        .map(|(marker, what)| Issue::MissingMarker {
            marker: marker.to_string(),
            what: what.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_markers_missing() {
        assert_eq!(check("<report/>").len(), MARKERS.len());
    }

    #[test]
    fn test_markers_present() {
        let text = format!(
            "{JDBC_DRIVER_CLASS} {INIT_IMPORT_MARKER}; {INIT_CALL_MARKER}(x) {JDBC_URL_SCHEME}://h"
        );
        assert!(check(&text).is_empty());
    }
}
