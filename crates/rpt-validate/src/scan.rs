//! Single-pass fact collection over a design document.
//!
//! The scan never builds a tree; checks only need names, a few attributes
//! and the query text.

use std::collections::BTreeSet;

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};

/// What the checks need to know about a document.
#[derive(Debug, Clone, Default)]
pub struct DesignFacts {
    /// Local name of the root element.
    pub root: String,
    pub root_version: Option<String>,
    /// Local names of every element.
    pub elements: BTreeSet<String>,
    /// `name` attribute values of every element.
    pub names: BTreeSet<String>,
    /// Contents of each `queryText` property, in document order.
    pub query_texts: Vec<String>,
    pub scalar_parameters: usize,
}

impl DesignFacts {
    pub fn has_element(&self, local: &str) -> bool {
        self.elements.contains(local)
    }

    /// Any element whose local name contains `marker`.
    pub fn has_element_like(&self, marker: &str) -> bool {
        self.elements.iter().any(|name| name.contains(marker))
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

/// Older designs keep the query in an `xml-property`.
const QUERY_TEXT_HOLDERS: [&str; 2] = ["property", "xml-property"];

fn local_name(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

/// Scan `text`. Malformed markup yields a human-readable message.
pub fn scan(text: &str) -> Result<DesignFacts, String> {
    let mut reader = Reader::from_str(text);
    let mut facts = DesignFacts::default();
    let mut open: Vec<String> = Vec::new();
    let mut seen_root = false;
    // Depth of the open queryText property and its accumulated content.
    let mut query: Option<(usize, String)> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|err| format!("{err} (near byte {})", reader.buffer_position()))?;
        match event {
            Event::Start(start) | Event::Empty(start) if open.is_empty() && seen_root => {
                let qname = start.name();
                let name = String::from_utf8_lossy(qname.as_ref()).into_owned();
                return Err(format!("unexpected second root element <{name}>"));
            }
            Event::Start(start) => {
                let name = record(&mut facts, &start, !seen_root)?;
                seen_root = true;
                open.push(name);
                if is_query_text(&start)? && query.is_none() {
                    query = Some((open.len(), String::new()));
                }
            }
            Event::Empty(start) => {
                record(&mut facts, &start, !seen_root)?;
                seen_root = true;
                if is_query_text(&start)? {
                    facts.query_texts.push(String::new());
                }
            }
            Event::End(_) => {
                if query.as_ref().is_some_and(|(depth, _)| *depth == open.len())
                    && let Some((_, content)) = query.take()
                {
                    facts.query_texts.push(content);
                }
                open.pop();
            }
            Event::Text(content) => {
                if let Some((_, buffer)) = query.as_mut() {
                    let raw = std::str::from_utf8(&content).map_err(|err| err.to_string())?;
                    buffer.push_str(&unescape(raw).map_err(|err| err.to_string())?);
                }
            }
            Event::GeneralRef(reference) => {
                if let Some((_, buffer)) = query.as_mut() {
                    let name = std::str::from_utf8(&reference).map_err(|err| err.to_string())?;
                    let entity = format!("&{name};");
                    let resolved = unescape(&entity).map_err(|err| err.to_string())?;
                    buffer.push_str(&resolved);
                }
            }
            Event::CData(content) => {
                if let Some((_, buffer)) = query.as_mut() {
                    buffer.push_str(std::str::from_utf8(&content).map_err(|err| err.to_string())?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(name) = open.last() {
        return Err(format!("unclosed element <{name}>"));
    }
    if !seen_root {
        return Err("no root element".to_string());
    }
    Ok(facts)
}

fn record(facts: &mut DesignFacts, start: &BytesStart<'_>, is_root: bool) -> Result<String, String> {
    let qname = start.name();
    let qualified = std::str::from_utf8(qname.as_ref())
        .map_err(|err| err.to_string())?
        .to_string();
    let local = local_name(&qualified).to_string();

    for attr in start.attributes() {
        let attr = attr.map_err(|err| err.to_string())?;
        let key = std::str::from_utf8(attr.key.as_ref()).map_err(|err| err.to_string())?;
        let raw = std::str::from_utf8(&attr.value).map_err(|err| err.to_string())?;
        let value = unescape(raw).map_err(|err| err.to_string())?;
        match key {
            "name" => {
                facts.names.insert(value.into_owned());
            }
            "version" if is_root => facts.root_version = Some(value.into_owned()),
            _ => {}
        }
    }

    if is_root {
        facts.root = local.clone();
    }
    if local == "scalar-parameter" {
        facts.scalar_parameters += 1;
    }
    facts.elements.insert(local);
    Ok(qualified)
}

fn is_query_text(start: &BytesStart<'_>) -> Result<bool, String> {
    let qname = start.name();
    let name = std::str::from_utf8(qname.as_ref()).map_err(|err| err.to_string())?;
    if !QUERY_TEXT_HOLDERS.contains(&local_name(name)) {
        return Ok(false);
    }
    let attr = start
        .try_get_attribute("name")
        .map_err(|err| err.to_string())?;
    Ok(attr.is_some_and(|attr| attr.value.as_ref() == b"queryText"))
}
