//! Integration tests for loading job files.

use std::fs;

use rpt_model::{ModelError, ReportJob, ReportType};

#[test]
fn test_load_job_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("job.json");
    fs::write(
        &path,
        r#"{
            "analysis": {
                "file_name": "units.xlsx",
                "tables": [{"name": "S", "headers": ["code"], "data_types": {"code": "number"}}],
                "suggested_report_type": "detailed_listing"
            },
            "config": {"sql_query": "SELECT \"code\" FROM \"TsUnit\""}
        }"#,
    )
    .unwrap();

    let job = ReportJob::load(&path).unwrap();

    assert_eq!(job.analysis.suggested_report_type, ReportType::DetailedListing);
    assert_eq!(job.config.query(), "SELECT \"code\" FROM \"TsUnit\"");
    assert!(job.config.parameters.is_empty());
}

#[test]
fn test_load_job_without_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("job.json");
    fs::write(&path, r#"{"analysis": {"file_name": "a.xlsx"}}"#).unwrap();

    let job = ReportJob::load(&path).unwrap();

    assert!(job.analysis.tables.is_empty());
    assert_eq!(job.analysis.suggested_report_type, ReportType::Empty);
    assert!(job.config.sql_query.is_none());
}

#[test]
fn test_load_job_reports_invalid_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();

    let error = ReportJob::load(&path).unwrap_err();
    assert!(matches!(error, ModelError::Json { .. }));
}

#[test]
fn test_load_job_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let error = ReportJob::load(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(error, ModelError::Io { .. }));
}
