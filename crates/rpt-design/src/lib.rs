//! Report design document synthesis.
//!
//! Flow: [`TemplateSelector`] picks and loads a skeleton, [`DocumentBuilder`]
//! renders and parses it into an arena [`Document`] and installs the
//! dataset, parameters and layout, then [`serialize`] emits the text.
//! [`generate_report`] runs the whole pipeline and writes the file.

pub mod builder;
pub mod error;
pub mod ids;
pub mod parse;
pub mod profile;
pub mod serialize;
pub mod template;
pub mod tree;
pub mod writer;

pub use builder::{ColumnSpec, DocumentBuilder, ReportDocument, build, column_specs};
pub use error::{DesignError, Result};
pub use ids::IdGenerator;
pub use parse::parse_document;
pub use profile::{
    DEFAULT_OUTPUT_DIR, DEFAULT_TEMPLATE_DIR, GENERATOR_VERSION, GenerationContext,
    GeneratorProfile, NamespaceMode, ScriptEncoding, TEMPLATE_DIR_ENV,
};
pub use serialize::{cdata, serialize, serialize_tree};
pub use template::{
    BASE_TEMPLATE, Skeleton, SkeletonSource, TemplateEntry, TemplateSelector, TemplateVars,
    embedded_template, render_skeleton, report_title, template_file_name,
};
pub use tree::{BlockPosition, Document, NodeId, NodeKind};
pub use writer::{GeneratedReport, OUTPUT_SUFFIX, generate_report, output_file_name, write_report};
