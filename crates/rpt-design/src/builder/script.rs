//! Report-level helper script.

use tracing::debug;

use crate::tree::BlockPosition;

use super::elements::DesignWriter;
use super::style::INITIALIZE_METHOD;

/// Date and number helpers called from layout expressions.
pub const INITIALIZE_SCRIPT: &str = r##"importPackage(Packages.java.text);

function day() {
    var fmt = new SimpleDateFormat("yyyy年MM月dd日");
    return fmt.format(new Date());
}

function formatDate(date, pattern) {
    if (!date) return "";
    var fmt = new SimpleDateFormat(pattern || "yyyy-MM-dd");
    return fmt.format(date);
}

function formatNumber(number, pattern) {
    if (!number) return "0";
    var fmt = new DecimalFormat(pattern || "#,##0.00");
    return fmt.format(number);
}"##;

/// Replace the root `initialize` method, placing it after the last root
/// `property`.
pub fn install_initialize_method(writer: &mut DesignWriter<'_>) {
    let root = writer.root();
    let method = writer.doc.element("method");
    writer.doc.set_attr(method, "name", INITIALIZE_METHOD);
    writer.raw_content(method, INITIALIZE_SCRIPT);

    let replaced = writer.doc.replace_named_block(
        root,
        "method",
        INITIALIZE_METHOD,
        method,
        BlockPosition::AfterLast("property"),
    );
    debug!(replaced = replaced.len(), "installed initialize method");
}
