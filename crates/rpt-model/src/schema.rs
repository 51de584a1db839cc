//! Literal strings of the report design wire contract.
//!
//! These are consumed by the design tool and the deployment environment
//! and must be reproduced exactly.

/// The single default namespace of a report design document.
pub const DESIGN_NAMESPACE: &str = "http://www.eclipse.org/birt/2005/design";

pub const REPORT_ROOT_TAG: &str = "report";

/// Schema versions the design tool is known to open.
pub const SUPPORTED_VERSIONS: [&str; 2] = ["3.2.23", "4.10.0"];

pub const JDBC_DATA_SOURCE_EXTENSION: &str = "org.eclipse.birt.report.data.oda.jdbc";

pub const JDBC_DATA_SET_EXTENSION: &str = "org.eclipse.birt.report.data.oda.jdbc.JdbcSelectDataSet";

/// Driver class the deployment's connection pool expects.
pub const JDBC_DRIVER_CLASS: &str = "com.jeedsoft.jeedsql.jdbc.Driver";

/// URL scheme of the deployment's JDBC wrapper.
pub const JDBC_URL_SCHEME: &str = "jdbc:jeedsql";

/// Import required before the data-source bootstrap call.
pub const INIT_IMPORT_MARKER: &str = "importPackage(Packages.com.jeedsoft.quicksilver.report.util)";

/// Data-source bootstrap call.
pub const INIT_CALL_MARKER: &str = "ReportUtil.initializeDataSource";

/// Root properties every design should carry.
pub const RECOMMENDED_PROPERTIES: [&str; 3] = ["createdBy", "units", "bidiLayoutOrientation"];
