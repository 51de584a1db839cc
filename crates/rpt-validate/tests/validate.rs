//! Integration tests for the design validator entry points.

use std::fs;

use rpt_validate::{validate, validate_dir, validate_file};

/// A complete, conforming design.
const VALID: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<report xmlns="http://www.eclipse.org/birt/2005/design" version="3.2.23" id="1">
    <property name="createdBy">rptdesign</property>
    <property name="units">in</property>
    <property name="bidiLayoutOrientation">ltr</property>
    <data-sources>
        <oda-data-source extensionID="org.eclipse.birt.report.data.oda.jdbc" name="default" id="2">
            <method name="beforeOpen"><![CDATA[importPackage(Packages.com.jeedsoft.quicksilver.report.util);
ReportUtil.initializeDataSource(reportContext, this, true);]]></method>
            <property name="odaDriverClass">com.jeedsoft.jeedsql.jdbc.Driver</property>
            <property name="odaURL">jdbc:jeedsql:jtds:sqlserver://localhost:1433</property>
        </oda-data-source>
    </data-sources>
    <data-sets>
        <oda-data-set extensionID="org.eclipse.birt.report.data.oda.jdbc.JdbcSelectDataSet" name="MainDataSet" id="4">
            <property name="dataSource">default</property>
            <list-property name="resultSet">
                <structure>
                    <property name="position">1</property>
                    <property name="name">案號</property>
                </structure>
            </list-property>
            <xml-property name="queryText"><![CDATA[SELECT "案號" FROM "Cases"]]></xml-property>
        </oda-data-set>
    </data-sets>
    <page-setup>
        <simple-master-page name="Simple MasterPage" id="3"/>
    </page-setup>
    <body>
        <label id="5"/>
    </body>
</report>"#;

#[test]
fn test_valid_document_is_clean() {
    let report = validate(VALID);
    assert!(report.errors.is_empty(), "errors: {:?}", report.errors);
    assert!(report.warnings.is_empty(), "warnings: {:?}", report.warnings);
}

#[test]
fn test_missing_namespace_is_an_error() {
    let text = VALID.replace(" xmlns=\"http://www.eclipse.org/birt/2005/design\"", "");
    let report = validate(&text);
    assert!(!report.is_success());
    assert!(
        report.errors.iter().any(|e| e.contains("namespace")),
        "errors: {:?}",
        report.errors
    );
}

#[test]
fn test_missing_declaration_reported_alone() {
    let text = VALID.replacen("<?xml version=\"1.0\" encoding=\"UTF-8\"?>", "", 1);
    let report = validate(&text);
    assert_eq!(report.errors, vec!["missing XML declaration"]);
    assert!(report.warnings.is_empty());
}

#[test]
fn test_parse_error_is_reported() {
    let text = VALID.replace("</body>", "");
    let report = validate(&text);
    assert!(
        report.errors.iter().any(|e| e.starts_with("XML parse error")),
        "errors: {:?}",
        report.errors
    );
}

#[test]
fn test_missing_sections() {
    let text = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<report xmlns=\"http://www.eclipse.org/birt/2005/design\" version=\"3.2.23\">\n</report>";
    let report = validate(text);
    assert_eq!(
        report.errors,
        vec![
            "no data source defined",
            "no data set defined",
            "missing report body"
        ]
    );
    assert!(report.warnings.contains(&"no page setup defined".to_string()));
    assert!(report.warnings.contains(&"missing recommended property: units".to_string()));
}

#[test]
fn test_warnings_do_not_fail() {
    let text = VALID
        .replace("version=\"3.2.23\"", "version=\"2.6.1\"")
        .replace(r#"SELECT "案號" FROM "Cases""#, "SELECT 案號 FROM 'Cases'")
        .replace("com.jeedsoft.jeedsql.jdbc.Driver", "org.h2.Driver");
    let report = validate(&text);
    assert!(report.is_success(), "errors: {:?}", report.errors);
    insta::assert_debug_snapshot!(report.warnings, @r#"
    [
        "report version 2.6.1 is not a supported design version",
        "missing JDBC driver class: com.jeedsoft.jeedsql.jdbc.Driver",
        "query text uses single-quoted identifiers; use double quotes",
        "query text has Chinese identifiers outside double quotes",
    ]
    "#);
}

#[test]
fn test_validate_file_and_dir() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("b_generated.rptdesign"), VALID).unwrap();
    fs::write(dir.path().join("a_generated.rptdesign"), "<report/>").unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let results = validate_dir(dir.path()).unwrap();
    let names: Vec<_> = results
        .iter()
        .map(|(path, _)| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a_generated.rptdesign", "b_generated.rptdesign"]);
    assert!(!results[0].1.is_success());
    assert!(results[1].1.is_success());

    let missing = validate_file(&dir.path().join("absent.rptdesign"));
    assert_eq!(missing.error_count(), 1);
    assert!(missing.errors[0].starts_with("cannot read file"));
}
