//! HTML parsing plumbing shared by the generators and the plain-text
//! projector.
//!
//! Parsing goes through `html5ever` into an `RcDom` tree. Fragments
//! without `<html>`/`<body>` wrappers are fine, the parser synthesizes
//! the document skeleton around them.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

pub mod text;

/// Parse an HTML string (document or fragment) into a DOM tree.
pub fn parse(input: &str) -> RcDom {
    parse_document(RcDom::default(), Default::default()).one(input)
}

/// Locate the `<body>` element of a parsed document.
pub fn body(dom: &RcDom) -> Option<Handle> {
    fn find(node: &Handle) -> Option<Handle> {
        if tag_lower(node).as_deref() == Some("body") {
            return Some(node.clone());
        }
        for child in node.children.borrow().iter() {
            if let Some(found) = find(child) {
                return Some(found);
            }
        }
        None
    }
    find(&dom.document)
}

/// Lowercased element name, `None` for non-element nodes.
pub fn tag_lower(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.to_string().to_ascii_lowercase()),
        _ => None,
    }
}

/// Look up an attribute value by name, case-insensitively.
pub fn attr(node: &Handle, name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| a.name.local.as_ref().eq_ignore_ascii_case(name))
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

/// Lowercased tag of the node's parent element, if any.
pub fn parent_tag(node: &Handle) -> Option<String> {
    let weak = node.parent.take();
    let parent = weak.as_ref().and_then(|w| w.upgrade());
    node.parent.set(weak);
    parent.as_ref().and_then(tag_lower)
}

/// Concatenated text of all descendant text nodes, in document order.
pub fn text_content(node: &Handle) -> String {
    fn collect(node: &Handle, out: &mut String) {
        match &node.data {
            NodeData::Text { contents } => out.push_str(&contents.borrow()),
            _ => {
                for child in node.children.borrow().iter() {
                    collect(child, out);
                }
            },
        }
    }
    let mut out = String::new();
    collect(node, &mut out);
    out
}

/// Collect all descendant elements matching any of the given tag names,
/// in document order.
pub fn descendants_by_tag(node: &Handle, tags: &[&str]) -> Vec<Handle> {
    fn collect(node: &Handle, tags: &[&str], out: &mut Vec<Handle>) {
        if let Some(tag) = tag_lower(node)
            && tags.contains(&tag.as_str())
        {
            out.push(node.clone());
        }
        for child in node.children.borrow().iter() {
            collect(child, tags, out);
        }
    }
    let mut out = Vec::new();
    for child in node.children.borrow().iter() {
        collect(child, tags, &mut out);
    }
    out
}

/// Collapse every run of whitespace to a single space.
pub fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_ws = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !in_ws {
                out.push(' ');
                in_ws = true;
            }
        } else {
            out.push(ch);
            in_ws = false;
        }
    }
    out
}

/// Escape text for inclusion in HTML content.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}
