//! Visual layout: title grid, date grid and the bound data table.

use quick_xml::escape::escape;
use tracing::debug;

use crate::tree::NodeId;

use super::dataset::{ColumnSpec, write_bound_columns};
use super::elements::DesignWriter;
use super::style::{
    COLUMN_WIDTH, DATA_DATE_EXPR, DATA_SET_NAME, DATE_SPACER_CELLS, FONT_FAMILY, GRID_COLUMNS,
    PRINT_DATE_EXPR, TABLE_NAME, TITLE_GRID_WIDTH,
};

/// Title markup rendered by the title block.
pub fn title_html(title: &str) -> String {
    format!("<H1><B><U>{}</U></B></H1>", escape(title))
}

/// Find or create `body`, then replace its content with the layout.
///
/// The table is omitted when there are no columns.
pub fn install_layout(writer: &mut DesignWriter<'_>, title: &str, columns: &[ColumnSpec<'_>]) {
    let root = writer.root();
    let body = match writer.doc.find_first(root, "body") {
        Some(body) => body,
        None => writer.element(root, "body"),
    };
    writer.doc.clear_children(body);

    write_title_grid(writer, body, title);
    write_date_grid(writer, body);
    if columns.is_empty() {
        debug!("no table columns, omitting data table");
    } else {
        write_data_table(writer, body, columns);
    }
}

fn write_title_grid(writer: &mut DesignWriter<'_>, body: NodeId, title: &str) {
    let grid = writer.item(body, "grid");
    writer.border(grid);
    writer.property(grid, "width", TITLE_GRID_WIDTH);
    for _ in 0..GRID_COLUMNS {
        writer.item(grid, "column");
    }

    let row = writer.item(grid, "row");
    let cell = writer.item(row, "cell");
    writer.property(cell, "colSpan", &GRID_COLUMNS.to_string());

    let text = writer.item(cell, "text");
    writer.property(text, "fontFamily", FONT_FAMILY);
    writer.property(text, "marginTop", "0pt");
    writer.property(text, "textAlign", "center");
    writer.property(text, "contentType", "html");
    let content = writer.element(text, "text-property");
    writer.doc.set_attr(content, "name", "content");
    writer.raw_content(content, &title_html(title));
}

fn write_date_grid(writer: &mut DesignWriter<'_>, body: NodeId) {
    let grid = writer.item(body, "grid");
    writer.border(grid);
    for _ in 0..GRID_COLUMNS {
        let column = writer.item(grid, "column");
        writer.property(column, "width", COLUMN_WIDTH);
    }

    let row = writer.item(grid, "row");

    let data_date = writer.item(row, "cell");
    let data_date = writer.item(data_date, "text-data");
    writer.property(data_date, "fontFamily", FONT_FAMILY);
    writer.expression(data_date, "valueExpr", DATA_DATE_EXPR);
    writer.property(data_date, "contentType", "html");

    for _ in 0..DATE_SPACER_CELLS {
        writer.item(row, "cell");
    }

    let print_date = writer.item(row, "cell");
    let print_date = writer.item(print_date, "text-data");
    writer.property(print_date, "fontFamily", FONT_FAMILY);
    writer.property(print_date, "textAlign", "right");
    writer.expression(print_date, "valueExpr", PRINT_DATE_EXPR);
    writer.property(print_date, "contentType", "html");
}

fn write_data_table(writer: &mut DesignWriter<'_>, body: NodeId, columns: &[ColumnSpec<'_>]) {
    let table = writer.doc.append_element(body, "table");
    writer.ids.assign(writer.doc, table);
    writer.doc.set_attr(table, "name", TABLE_NAME);
    writer.property(table, "dataSet", DATA_SET_NAME);
    write_bound_columns(writer, table, columns);

    for _ in columns {
        let column = writer.item(table, "column");
        writer.property(column, "width", COLUMN_WIDTH);
    }

    let header = writer.element(table, "header");
    let header_row = writer.item(header, "row");
    for column in columns {
        let cell = writer.item(header_row, "cell");
        writer.border(cell);
        let label = writer.item(cell, "label");
        writer.property(label, "fontFamily", FONT_FAMILY);
        writer.text_property(label, "text", column.name);
    }

    let detail = writer.element(table, "detail");
    let detail_row = writer.item(detail, "row");
    for column in columns {
        let cell = writer.item(detail_row, "cell");
        writer.border(cell);
        let data = writer.item(cell, "data");
        writer.property(data, "resultSetColumn", column.name);
    }

    let footer = writer.element(table, "footer");
    let footer_row = writer.item(footer, "row");
    for _ in columns {
        let cell = writer.item(footer_row, "cell");
        writer.border(cell);
    }

    debug!(column_count = columns.len(), "installed data table");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_html_escapes_title() {
        assert_eq!(title_html("Sales"), "<H1><B><U>Sales</U></B></H1>");
        assert_eq!(title_html("R&D <Q1>"), "<H1><B><U>R&amp;D &lt;Q1&gt;</U></B></H1>");
    }
}
