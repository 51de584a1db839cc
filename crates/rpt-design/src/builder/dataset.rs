//! The primary dataset and its four column-metadata blocks.
//!
//! Column hints, cached metadata, bound-column expressions and the result
//! set description are each written from the same [`ColumnSpec`] slice, so
//! they cannot disagree on column names, order or types.

use rpt_model::schema::JDBC_DATA_SET_EXTENSION;
use rpt_model::{ColumnType, ParameterSpec, TableInfo};
use rpt_sql::NormalizedSql;
use tracing::debug;

use crate::tree::{BlockPosition, NodeId};

use super::elements::{DesignWriter, js_string};
use super::style::{DATA_SET_NAME, DATA_SOURCE_NAME};

/// One dataset column: header name plus coarse type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec<'a> {
    pub name: &'a str,
    pub column_type: ColumnType,
}

impl ColumnSpec<'_> {
    pub fn design_type(&self) -> &'static str {
        self.column_type.design_type()
    }

    /// `dataSetRow["name"]`
    pub fn row_expression(&self) -> String {
        format!("dataSetRow[{}]", js_string(self.name))
    }
}

/// Columns of the primary table in header order; empty without a table.
pub fn column_specs(table: Option<&TableInfo>) -> Vec<ColumnSpec<'_>> {
    table
        .map(|table| {
            table
                .typed_headers()
                .map(|(name, column_type)| ColumnSpec { name, column_type })
                .collect()
        })
        .unwrap_or_default()
}

/// Find or create `data-sets`, placed right after `data-sources`.
fn data_sets_section(writer: &mut DesignWriter<'_>) -> NodeId {
    let root = writer.root();
    if let Some(existing) = writer.doc.find_first(root, "data-sets") {
        return existing;
    }
    let section = writer.doc.element("data-sets");
    match writer.doc.find_child(root, "data-sources") {
        Some(sources) => {
            let index = writer.doc.position_of(root, sources).map_or(0, |idx| idx + 1);
            writer.doc.insert_at(root, index, section);
        }
        None => writer.doc.insert_block(root, section, BlockPosition::Before("body")),
    }
    section
}

/// Install the primary dataset, replacing any dataset of the same name.
pub fn install_data_set(
    writer: &mut DesignWriter<'_>,
    columns: &[ColumnSpec<'_>],
    query: &NormalizedSql,
    parameters: &[ParameterSpec],
) -> NodeId {
    let data_sets = data_sets_section(writer);

    let data_set = writer.doc.element("oda-data-set");
    writer.doc.set_attr(data_set, "extensionID", JDBC_DATA_SET_EXTENSION);
    writer.doc.set_attr(data_set, "name", DATA_SET_NAME);
    writer.ids.assign(writer.doc, data_set);
    writer.doc.replace_named_block(
        data_sets,
        "oda-data-set",
        DATA_SET_NAME,
        data_set,
        BlockPosition::End,
    );

    writer.property(data_set, "queryText", &query.text);
    writer.property(data_set, "dataSource", DATA_SOURCE_NAME);
    if query.has_params() {
        write_parameter_bindings(writer, data_set, query, parameters);
    }
    write_column_hints(writer, data_set, columns);
    write_cached_metadata(writer, data_set, columns);
    write_bound_columns(writer, data_set, columns);
    write_result_set(writer, data_set, columns);

    debug!(
        column_count = columns.len(),
        param_count = query.params.len(),
        "installed dataset"
    );
    data_set
}

/// One structure per positional placeholder, in placeholder order.
fn write_parameter_bindings(
    writer: &mut DesignWriter<'_>,
    data_set: NodeId,
    query: &NormalizedSql,
    parameters: &[ParameterSpec],
) {
    let list = writer.list_property(data_set, "parameterBindings");
    for (position, name) in query.bindings() {
        let binding = writer.structure(list);
        writer.property(binding, "paramName", name);
        writer.property(binding, "position", &position.to_string());
        if parameters.iter().any(|param| param.name == name) {
            let value = format!("params[{}].value", js_string(name));
            writer.js_expression(binding, "value", &value);
        }
    }
}

fn write_column_hints(writer: &mut DesignWriter<'_>, data_set: NodeId, columns: &[ColumnSpec<'_>]) {
    let list = writer.list_property(data_set, "columnHints");
    for column in columns {
        let hint = writer.structure(list);
        writer.property(hint, "columnName", column.name);
        writer.property(hint, "analysis", "dimension");
        writer.text_property(hint, "displayName", column.name);
        writer.text_property(hint, "heading", column.name);
    }
}

fn write_cached_metadata(
    writer: &mut DesignWriter<'_>,
    data_set: NodeId,
    columns: &[ColumnSpec<'_>],
) {
    let cached = writer.named_structure(data_set, "cachedMetaData");
    let list = writer.list_property(cached, "resultSet");
    for (idx, column) in columns.iter().enumerate() {
        let entry = writer.structure(list);
        writer.property(entry, "position", &(idx + 1).to_string());
        writer.property(entry, "name", column.name);
        writer.property(entry, "dataType", column.design_type());
    }
}

/// `boundDataColumns` block. Also used by the layout table.
pub fn write_bound_columns(
    writer: &mut DesignWriter<'_>,
    parent: NodeId,
    columns: &[ColumnSpec<'_>],
) -> NodeId {
    let list = writer.list_property(parent, "boundDataColumns");
    for column in columns {
        let bound = writer.structure(list);
        writer.property(bound, "name", column.name);
        writer.text_property(bound, "displayName", column.name);
        writer.js_expression(bound, "expression", &column.row_expression());
        writer.property(bound, "dataType", column.design_type());
    }
    list
}

fn write_result_set(writer: &mut DesignWriter<'_>, data_set: NodeId, columns: &[ColumnSpec<'_>]) {
    let list = writer.list_property(data_set, "resultSet");
    for (idx, column) in columns.iter().enumerate() {
        let entry = writer.structure(list);
        writer.property(entry, "position", &(idx + 1).to_string());
        writer.property(entry, "name", column.name);
        writer.property(entry, "nativeName", column.name);
        writer.property(entry, "dataType", column.design_type());
        writer.property(
            entry,
            "nativeDataType",
            &column.column_type.native_type_code().to_string(),
        );
    }
}
