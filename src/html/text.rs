//! Plain-text projection of HTML.

use markup5ever_rcdom::{Handle, NodeData};
use once_cell::sync::Lazy;
use regex::Regex;

use super::{body, parse, tag_lower};

/// Tags that force a line break before and after their content.
static BLOCK_TAGS: phf::Set<&'static str> = phf::phf_set! {
    "p", "div", "h1", "h2", "h3", "h4", "h5", "h6", "li", "blockquote",
    "pre", "tr", "section", "article", "header", "footer", "main",
    "aside", "nav", "hr",
};

/// Block tags separated from preceding content by a blank line.
static DOUBLE_BREAK_TAGS: phf::Set<&'static str> = phf::phf_set! {
    "p", "div", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote",
    "section", "article",
};

static EXCESS_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Flatten HTML to plain text.
///
/// Block-level tags become line breaks (a blank line for paragraph-level
/// tags), `<br>` becomes a newline, list items get a two-space indent,
/// and everything else contributes its text content. Runs of three or
/// more newlines collapse to a blank line and the result is trimmed.
pub fn html_to_text(html: &str) -> String {
    let dom = parse(html);
    let mut out = String::new();
    if let Some(body) = body(&dom) {
        for child in body.children.borrow().iter() {
            walk(child, &mut out);
        }
    }
    EXCESS_NEWLINES.replace_all(&out, "\n\n").trim().to_owned()
}

fn walk(node: &Handle, out: &mut String) {
    match &node.data {
        NodeData::Text { contents } => out.push_str(&contents.borrow()),
        NodeData::Element { .. } => {
            // tag_lower is Some for every element
            let tag = tag_lower(node).unwrap_or_default();
            let is_block = BLOCK_TAGS.contains(tag.as_str());
            if is_block && !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
                if DOUBLE_BREAK_TAGS.contains(tag.as_str()) && !out.ends_with("\n\n") {
                    out.push('\n');
                }
            }
            if tag == "br" {
                out.push('\n');
                return;
            }
            if tag == "li" {
                out.push_str("  ");
            }
            for child in node.children.borrow().iter() {
                walk(child, out);
            }
            if is_block && !out.ends_with('\n') {
                out.push('\n');
            }
        },
        _ => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraphs_get_blank_lines() {
        // The double break needs content between the blocks, here the
        // whitespace text node
        assert_eq!(html_to_text("<p>one</p>\n<p>two</p>"), "one\n\ntwo");
    }

    #[test]
    fn test_adjacent_blocks_single_break() {
        assert_eq!(html_to_text("<p>one</p><p>two</p>"), "one\ntwo");
    }

    #[test]
    fn test_headings_and_inline_formatting() {
        assert_eq!(
            html_to_text("<h1>Title</h1>\n<p>Some <strong>bold</strong> text</p>"),
            "Title\n\nSome bold text"
        );
    }

    #[test]
    fn test_list_items_indented() {
        assert_eq!(
            html_to_text("<ul><li>first</li><li>second</li></ul>"),
            "first\n  second"
        );
    }

    #[test]
    fn test_br_breaks_line() {
        assert_eq!(html_to_text("<p>a<br>b</p>"), "a\nb");
    }

    #[test]
    fn test_excess_newlines_collapse() {
        assert_eq!(html_to_text("<p>a</p><br><br><br><p>b</p>"), "a\n\nb");
    }

    #[test]
    fn test_nested_blocks_single_break() {
        assert_eq!(
            html_to_text("<div><p>a</p></div><div><p>b</p></div>"),
            "a\nb"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(html_to_text(""), "");
    }
}
