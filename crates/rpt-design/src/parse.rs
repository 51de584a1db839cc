//! Markup text to [`Document`].
//!
//! Comments, processing instructions and the declaration are dropped.
//! Whitespace-only text between elements is dropped; CDATA sections become
//! literal fragments so they are written back out as CDATA.

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use tracing::trace;

use crate::error::{DesignError, Result};
use crate::tree::{Document, NodeId};

pub fn parse_document(text: &str) -> Result<Document> {
    let mut reader = Reader::from_str(text);
    let mut builder = TreeBuilder::default();

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(err) => {
                return Err(DesignError::parse(format!(
                    "{err} (near byte {})",
                    reader.buffer_position()
                )));
            }
        };
        match event {
            Event::Start(start) => builder.open(&start, false)?,
            Event::Empty(start) => builder.open(&start, true)?,
            Event::End(_) => builder.close(),
            Event::Text(content) => {
                let raw = std::str::from_utf8(&content)?;
                builder.push_text(&unescape(raw).map_err(DesignError::parse)?);
            }
            Event::GeneralRef(reference) => {
                let name = std::str::from_utf8(&reference)?;
                let entity = format!("&{name};");
                let resolved = unescape(&entity).map_err(DesignError::parse)?;
                builder.push_text(&resolved);
            }
            Event::CData(content) => builder.push_literal(std::str::from_utf8(&content)?),
            Event::Eof => break,
            _ => {}
        }
    }

    builder.finish()
}

#[derive(Default)]
struct TreeBuilder {
    doc: Option<Document>,
    stack: Vec<NodeId>,
    pending: String,
}

impl TreeBuilder {
    fn open(&mut self, start: &BytesStart<'_>, empty: bool) -> Result<()> {
        self.flush_text();
        let qname = start.name();
        let name = std::str::from_utf8(qname.as_ref())?.to_string();

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(DesignError::parse)?;
            let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
            let raw = std::str::from_utf8(&attr.value)?;
            let value = unescape(raw).map_err(DesignError::parse)?.into_owned();
            attributes.push((key, value));
        }

        let parent = self.stack.last().copied();
        let node = if let Some(doc) = self.doc.as_mut() {
            let Some(parent) = parent else {
                return Err(DesignError::parse(format!(
                    "unexpected second root element <{name}>"
                )));
            };
            doc.append_element(parent, name)
        } else {
            let doc = Document::new(name);
            let root = doc.root();
            self.doc = Some(doc);
            root
        };

        if let Some(doc) = self.doc.as_mut() {
            for (key, value) in attributes {
                doc.set_attr(node, &key, value);
            }
        }
        if !empty {
            self.stack.push(node);
        }
        Ok(())
    }

    fn close(&mut self) {
        self.flush_text();
        self.stack.pop();
    }

    fn push_text(&mut self, text: &str) {
        self.pending.push_str(text);
    }

    fn push_literal(&mut self, text: &str) {
        self.flush_text();
        if let (Some(doc), Some(parent)) = (self.doc.as_mut(), self.stack.last().copied()) {
            let literal = doc.literal(text);
            doc.append(parent, literal);
        }
    }

    fn flush_text(&mut self) {
        let text = std::mem::take(&mut self.pending);
        if text.trim().is_empty() {
            return;
        }
        if let (Some(doc), Some(parent)) = (self.doc.as_mut(), self.stack.last().copied()) {
            let node = doc.text(text);
            doc.append(parent, node);
        }
    }

    fn finish(mut self) -> Result<Document> {
        self.flush_text();
        if let Some(open) = self.stack.last().copied() {
            let name = self
                .doc
                .as_ref()
                .and_then(|doc| doc.name(open))
                .unwrap_or_default()
                .to_string();
            return Err(DesignError::parse(format!("unclosed element <{name}>")));
        }
        let doc = self.doc.ok_or(DesignError::MissingRoot)?;
        trace!(nodes = doc.descendants(doc.root()).len(), "parsed skeleton");
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeKind;

    #[test]
    fn test_parse_elements_attributes_and_text() {
        let doc = parse_document(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<report xmlns="http://www.eclipse.org/birt/2005/design" version="3.2.23" id="1">
    <!-- comment -->
    <property name="createdBy">A &amp; B</property>
    <body/>
</report>"#,
        )
        .unwrap();
        let root = doc.root();
        assert_eq!(doc.name(root), Some("report"));
        assert_eq!(doc.attr(root, "version"), Some("3.2.23"));
        assert_eq!(doc.children(root).len(), 2);
        let prop = doc.find_child(root, "property").unwrap();
        assert_eq!(doc.text_content(prop), "A & B");
        assert!(doc.find_child(root, "body").is_some());
    }

    #[test]
    fn test_attribute_entities_resolved() {
        let doc = parse_document(r#"<a title="x &lt; y &#x41;"/>"#).unwrap();
        assert_eq!(doc.attr(doc.root(), "title"), Some("x < y A"));
    }

    #[test]
    fn test_text_entity_references_resolved() {
        let doc = parse_document("<a>x &amp; &#x41; &lt;b&gt;</a>").unwrap();
        assert_eq!(doc.text_content(doc.root()), "x & A <b>");
    }

    #[test]
    fn test_cdata_becomes_literal() {
        let doc = parse_document("<a><b><![CDATA[<H1>x</H1>]]></b></a>").unwrap();
        let b = doc.find_first(doc.root(), "b").unwrap();
        let child = doc.children(b)[0];
        assert_eq!(doc.kind(child), &NodeKind::Literal("<H1>x</H1>".to_string()));
    }

    #[test]
    fn test_malformed_input_is_an_error() {
        assert!(matches!(
            parse_document("<report><body></report>"),
            Err(DesignError::SkeletonParse { .. })
        ));
        assert!(matches!(parse_document("   "), Err(DesignError::MissingRoot)));
    }
}
