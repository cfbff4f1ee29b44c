//! The HTML parsing adapter: turns raw markup into the `markup5ever_rcdom`
//! tree the rendering engine walks.
//!
//! Grounded on `examples/original_source/src/inscriptis/html_engine.py`'s
//! `Parser` wrapper and its parse-failure fallback. The original walks an
//! lxml tree with explicit `text`/`tail` fields; `html5ever` instead
//! gives every text run and comment its own sibling node, so the engine
//! (`engine.rs`) recurses over children directly rather than re-deriving a
//! tail-text concept — see `DESIGN.md`.

use std::borrow::Cow;

use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Parse `input` into a DOM tree, tolerating common malformed-markup cases:
/// a leading XML declaration is stripped before parsing, and if the parser
/// reported errors and produced no usable content, the input is retried
/// once wrapped in a synthetic `<pre>`.
pub fn parse_html(input: &str) -> Handle {
    let stripped = strip_xml_declaration(input);
    let dom = parse(stripped);

    if !dom.errors.borrow().is_empty() && !has_element_content(&dom.document) {
        log::debug!("[inscriptis-dom] parse produced no elements, retrying wrapped in <pre>");
        let wrapped = format!("<pre>{stripped}</pre>");
        return parse(&wrapped).document;
    }

    dom.document
}

fn strip_xml_declaration(input: &str) -> &str {
    let trimmed = input.trim_start();
    if let Some(rest) = trimmed.strip_prefix("<?xml") {
        if let Some(end) = rest.find("?>") {
            return rest[end + 2..].trim_start();
        }
    }
    input
}

fn parse(input: &str) -> RcDom {
    parse_document(RcDom::default(), ParseOpts::default())
        .from_utf8()
        .read_from(&mut input.as_bytes())
        .expect("reading HTML from an in-memory buffer cannot fail")
}

fn has_element_content(node: &Handle) -> bool {
    for child in node.children.borrow().iter() {
        match &child.data {
            NodeData::Element { .. } => return true,
            NodeData::Document => {
                if has_element_content(child) {
                    return true;
                }
            }
            _ => {}
        }
    }
    false
}

/// The tag name of an element node (lower-cased local name), or `None` for
/// every other node kind.
pub fn element_tag(node: &Handle) -> Option<Cow<'_, str>> {
    match &node.data {
        NodeData::Element { name, .. } => Some(Cow::Borrowed(&name.local)),
        _ => None,
    }
}

/// Look up an attribute by name on an element node, document order among
/// duplicates preferring the first occurrence.
pub fn attr<'a>(node: &'a Handle, name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| &a.name.local == name)
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

/// All attributes of an element node, in document order.
pub fn attrs(node: &Handle) -> Vec<(String, String)> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .map(|a| (a.name.local.to_string(), a.value.to_string()))
            .collect(),
        _ => Vec::new(),
    }
}

/// The literal text of a text node, `None` for every other node kind.
pub fn text_content(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Text { contents } => Some(contents.borrow().to_string()),
        _ => None,
    }
}

pub fn is_comment(node: &Handle) -> bool {
    matches!(node.data, NodeData::Comment { .. })
}
