//! Design tree to markup text.
//!
//! Literal fragments are written as unique placeholder tokens during normal
//! emission, then each token is replaced with a CDATA section holding the
//! fragment verbatim.

use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use rpt_model::schema::DESIGN_NAMESPACE;
use tracing::trace;

use crate::builder::ReportDocument;
use crate::error::{DesignError, Result};
use crate::profile::NamespaceMode;
use crate::tree::{Document, NodeId, NodeKind, local_name};

const INDENT_WIDTH: usize = 4;
const LITERAL_TOKEN_PREFIX: &str = "__RPT_LITERAL_";

/// Serialize a built report with its profile's namespace mode.
pub fn serialize(report: &ReportDocument) -> Result<String> {
    serialize_tree(&report.tree, report.profile.namespace)
}

/// Serialize any tree. The output always starts with an XML declaration.
pub fn serialize_tree(doc: &Document, mode: NamespaceMode) -> Result<String> {
    let prefix = unused_token_prefix(doc);
    let mut emitter = Emitter {
        writer: Writer::new_with_indent(Vec::new(), b' ', INDENT_WIDTH),
        doc,
        mode,
        prefix,
        literals: Vec::new(),
    };
    emitter.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    emitter.write_node(doc.root(), true)?;

    let Emitter {
        writer, literals, ..
    } = emitter;
    let text = String::from_utf8(writer.into_inner())
        .map_err(|err| DesignError::Utf8(err.utf8_error()))?;
    trace!(literal_count = literals.len(), "substituting literal fragments");
    Ok(substitute_literals(text, &literals))
}

/// Wrap `content` in CDATA, splitting any `]]>` it contains.
pub fn cdata(content: &str) -> String {
    format!("<![CDATA[{}]]>", content.replace("]]>", "]]]]><![CDATA[>"))
}

fn substitute_literals(mut text: String, literals: &[(String, String)]) -> String {
    for (token, content) in literals {
        text = text.replacen(token.as_str(), &cdata(content), 1);
    }
    text
}

/// A token prefix that appears nowhere in the document's own content.
fn unused_token_prefix(doc: &Document) -> String {
    let mut salt = 0u32;
    loop {
        let prefix = format!("{LITERAL_TOKEN_PREFIX}{salt}_");
        if !mentions(doc, &prefix) {
            return prefix;
        }
        salt += 1;
    }
}

fn mentions(doc: &Document, needle: &str) -> bool {
    doc.descendants(doc.root()).into_iter().any(|id| match doc.kind(id) {
        NodeKind::Element { name, attributes } => {
            name.contains(needle)
                || attributes
                    .iter()
                    .any(|(key, value)| key.contains(needle) || value.contains(needle))
        }
        NodeKind::Text(text) | NodeKind::Literal(text) => text.contains(needle),
    })
}

struct Emitter<'d> {
    writer: Writer<Vec<u8>>,
    doc: &'d Document,
    mode: NamespaceMode,
    prefix: String,
    literals: Vec<(String, String)>,
}

impl<'d> Emitter<'d> {
    fn write(&mut self, event: Event<'_>) -> Result<()> {
        self.writer
            .write_event(event)
            .map_err(|err| DesignError::Xml(err.into()))
    }

    fn element_name<'n>(&self, name: &'n str) -> &'n str {
        match self.mode {
            NamespaceMode::DefaultOnly => local_name(name),
            NamespaceMode::Preserve => name,
        }
    }

    fn write_node(&mut self, id: NodeId, is_root: bool) -> Result<()> {
        let doc = self.doc;
        match doc.kind(id) {
            NodeKind::Element { name, attributes } => {
                let name = self.element_name(name);
                let mut start = BytesStart::new(name);
                let default_only = self.mode == NamespaceMode::DefaultOnly;
                if is_root && default_only {
                    start.push_attribute(("xmlns", DESIGN_NAMESPACE));
                }
                for (key, value) in attributes {
                    if default_only && (key == "xmlns" || key.starts_with("xmlns:")) {
                        continue;
                    }
                    start.push_attribute((key.as_str(), value.as_str()));
                }

                // Empty text would leave the indenter breaking before the end tag.
                let children: Vec<NodeId> = doc
                    .children(id)
                    .iter()
                    .copied()
                    .filter(|child| {
                        !matches!(doc.kind(*child), NodeKind::Text(text) if text.is_empty())
                    })
                    .collect();
                if children.is_empty() {
                    return self.write(Event::Empty(start));
                }
                self.write(Event::Start(start))?;
                for child in children {
                    self.write_node(child, false)?;
                }
                self.write(Event::End(BytesEnd::new(name)))
            }
            NodeKind::Text(text) => {
                self.write(Event::Text(BytesText::from_escaped(partial_escape(text.as_str()))))
            }
            NodeKind::Literal(content) => {
                let token = format!("{}{}__", self.prefix, self.literals.len());
                self.write(Event::Text(BytesText::from_escaped(token.as_str())))?;
                self.literals.push((token, content.clone()));
                Ok(())
            }
        }
    }
}
