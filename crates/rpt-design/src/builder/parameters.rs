//! Report-level scalar parameter declarations.

use rpt_model::ParameterSpec;
use tracing::debug;

use crate::tree::{BlockPosition, NodeId};

use super::elements::DesignWriter;

/// Declare `parameters` in a `parameters` section placed immediately before
/// `data-sources` (or first, when that section is absent).
///
/// Returns `None` and leaves the document untouched when there are none.
pub fn install_parameters(
    writer: &mut DesignWriter<'_>,
    parameters: &[ParameterSpec],
) -> Option<NodeId> {
    if parameters.is_empty() {
        return None;
    }
    let root = writer.root();
    let section = writer
        .doc
        .find_child(root, "parameters")
        .unwrap_or_else(|| writer.doc.element("parameters"));
    writer
        .doc
        .insert_block(root, section, BlockPosition::Before("data-sources"));

    for param in parameters {
        let scalar = writer.doc.append_element(section, "scalar-parameter");
        writer.doc.set_attr(scalar, "name", param.name.as_str());
        writer.ids.assign(writer.doc, scalar);
        writer.property(scalar, "dataType", &param.data_type);
        writer.text_property(scalar, "promptText", &param.prompt);
        writer.property(scalar, "isRequired", if param.required { "true" } else { "false" });
        writer.property(scalar, "controlType", &param.control_type);
    }
    debug!(param_count = parameters.len(), "installed report parameters");
    Some(section)
}
