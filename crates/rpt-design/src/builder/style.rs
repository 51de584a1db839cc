//! Fixed names and layout values of generated designs.

pub const DATA_SOURCE_NAME: &str = "default";
pub const DATA_SET_NAME: &str = "MainDataSet";
pub const TABLE_NAME: &str = "MainTable";
pub const INITIALIZE_METHOD: &str = "initialize";

pub const FONT_FAMILY: &str = "\"標楷體\"";
pub const COLUMN_WIDTH: &str = "120pt";
pub const TITLE_GRID_WIDTH: &str = "600pt";
/// Column count of the title and date grids.
pub const GRID_COLUMNS: usize = 5;
/// Empty cells between the two date cells.
pub const DATE_SPACER_CELLS: usize = GRID_COLUMNS - 2;

pub const DATA_DATE_EXPR: &str = r#""資料日期：" + day() + " ～ " + day()"#;
pub const PRINT_DATE_EXPR: &str = r#""製表日期："+day()"#;

pub const BORDER_PROPERTIES: [(&str, &str); 8] = [
    ("borderBottomStyle", "solid"),
    ("borderBottomWidth", "thin"),
    ("borderLeftStyle", "solid"),
    ("borderLeftWidth", "thin"),
    ("borderRightStyle", "solid"),
    ("borderRightWidth", "thin"),
    ("borderTopStyle", "solid"),
    ("borderTopWidth", "thin"),
];
