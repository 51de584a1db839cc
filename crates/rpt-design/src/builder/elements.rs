//! Small element constructors shared by the builder steps.

use crate::ids::IdGenerator;
use crate::profile::ScriptEncoding;
use crate::tree::{Document, NodeId};

use super::style::BORDER_PROPERTIES;

/// Mutable view over the document being built plus its id source.
pub struct DesignWriter<'a> {
    pub doc: &'a mut Document,
    pub ids: &'a mut IdGenerator,
    pub encoding: ScriptEncoding,
}

impl<'a> DesignWriter<'a> {
    pub fn new(doc: &'a mut Document, ids: &'a mut IdGenerator, encoding: ScriptEncoding) -> Self {
        Self { doc, ids, encoding }
    }

    pub fn root(&self) -> NodeId {
        self.doc.root()
    }

    /// Append a plain element.
    pub fn element(&mut self, parent: NodeId, name: &str) -> NodeId {
        self.doc.append_element(parent, name)
    }

    /// Append an element that carries a generated id.
    pub fn item(&mut self, parent: NodeId, name: &str) -> NodeId {
        let node = self.doc.append_element(parent, name);
        self.ids.assign(self.doc, node);
        node
    }

    fn named(&mut self, parent: NodeId, tag: &str, name: &str) -> NodeId {
        let node = self.doc.append_element(parent, tag);
        self.doc.set_attr(node, "name", name);
        node
    }

    fn named_with_text(&mut self, parent: NodeId, tag: &str, name: &str, value: &str) -> NodeId {
        let node = self.named(parent, tag, name);
        self.doc.set_text(node, value);
        node
    }

    /// `<property name="..">value</property>`
    pub fn property(&mut self, parent: NodeId, name: &str, value: &str) -> NodeId {
        self.named_with_text(parent, "property", name, value)
    }

    /// `<text-property name="..">value</text-property>`
    pub fn text_property(&mut self, parent: NodeId, name: &str, value: &str) -> NodeId {
        self.named_with_text(parent, "text-property", name, value)
    }

    /// `<expression name="..">value</expression>`
    pub fn expression(&mut self, parent: NodeId, name: &str, value: &str) -> NodeId {
        self.named_with_text(parent, "expression", name, value)
    }

    /// `<expression name=".." type="javascript">value</expression>`
    pub fn js_expression(&mut self, parent: NodeId, name: &str, value: &str) -> NodeId {
        let node = self.expression(parent, name, value);
        self.doc.set_attr(node, "type", "javascript");
        node
    }

    pub fn list_property(&mut self, parent: NodeId, name: &str) -> NodeId {
        self.named(parent, "list-property", name)
    }

    pub fn named_structure(&mut self, parent: NodeId, name: &str) -> NodeId {
        self.named(parent, "structure", name)
    }

    pub fn structure(&mut self, parent: NodeId) -> NodeId {
        self.doc.append_element(parent, "structure")
    }

    /// Thin solid border on all four sides.
    pub fn border(&mut self, parent: NodeId) {
        for (name, value) in BORDER_PROPERTIES {
            self.property(parent, name, value);
        }
    }

    /// Script or raw HTML content, encoded per [`ScriptEncoding`].
    pub fn raw_content(&mut self, parent: NodeId, content: &str) -> NodeId {
        let node = match self.encoding {
            ScriptEncoding::Literal => self.doc.literal(content),
            ScriptEncoding::Escaped => self.doc.text(content),
        };
        self.doc.clear_children(parent);
        self.doc.append(parent, node);
        node
    }
}

/// Quote `value` as a JavaScript string literal.
pub fn js_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_string_escapes_quotes() {
        assert_eq!(js_string("code"), r#""code""#);
        assert_eq!(js_string(r#"a"b\c"#), r#""a\"b\\c""#);
        assert_eq!(js_string("名稱"), "\"名稱\"");
    }

    #[test]
    fn test_item_gets_unique_ids() {
        let mut doc = Document::new("report");
        let mut ids = IdGenerator::starting_after(10);
        let mut writer = DesignWriter::new(&mut doc, &mut ids, ScriptEncoding::Literal);
        let root = writer.root();
        let a = writer.item(root, "grid");
        let b = writer.item(a, "row");
        assert_eq!(doc.attr(a, "id"), Some("11"));
        assert_eq!(doc.attr(b, "id"), Some("12"));
    }

    #[test]
    fn test_border_writes_eight_properties() {
        let mut doc = Document::new("report");
        let mut ids = IdGenerator::new();
        let mut writer = DesignWriter::new(&mut doc, &mut ids, ScriptEncoding::Literal);
        let root = writer.root();
        let cell = writer.item(root, "cell");
        writer.border(cell);
        assert_eq!(doc.child_elements(cell, "property").count(), 8);
    }
}
