//! RTF generation from HTML.
//!
//! Each node visit returns an owned RTF fragment; parents concatenate
//! their children's fragments. Formatting elements emit braced groups so
//! the style scope closes with the group, block elements emit `\pard`
//! paragraphs with fixed spacing twips.

use markup5ever_rcdom::{Handle, NodeData};

use super::escape::escape_text;
use crate::html::{
    attr, body, collapse_whitespace, descendants_by_tag, parent_tag, parse, tag_lower,
    text_content,
};

/// Document header: ANSI, Times New Roman body font, Courier New for
/// code, 12pt default.
const HEADER: &str =
    "{\\rtf1\\ansi\\deff0{\\fonttbl{\\f0 Times New Roman;}{\\f1 Courier New;}}\\f0\\fs24\n";

/// Container tags that close with a paragraph break but carry no
/// formatting of their own.
static CONTAINER_TAGS: phf::Set<&'static str> = phf::phf_set! {
    "div", "section", "article", "header", "footer", "main", "aside", "nav",
};

/// Convert an HTML document or fragment to a complete RTF document.
pub fn html_to_rtf(html: &str) -> String {
    let dom = parse(html);
    let rtf_body = match body(&dom) {
        Some(body) => visit_children(&body),
        None => String::new(),
    };
    format!("{HEADER}{}\n}}", rtf_body.trim())
}

fn visit_children(node: &Handle) -> String {
    let mut out = String::new();
    for child in node.children.borrow().iter() {
        out.push_str(&visit(child));
    }
    out
}

fn visit(node: &Handle) -> String {
    match &node.data {
        NodeData::Text { contents } => {
            let text = contents.borrow();
            if text.trim().is_empty() {
                return String::new();
            }
            escape_text(&collapse_whitespace(&text))
        },
        NodeData::Element { .. } => visit_element(node),
        _ => String::new(),
    }
}

fn visit_element(node: &Handle) -> String {
    let tag = tag_lower(node).unwrap_or_default();
    match tag.as_str() {
        "h1" => heading(node, "\\sb240\\sa120", "\\fs48"),
        "h2" => heading(node, "\\sb200\\sa100", "\\fs40"),
        "h3" => heading(node, "\\sb160\\sa80", "\\fs32"),
        "h4" | "h5" | "h6" => heading(node, "\\sb120\\sa60", "\\fs28"),
        "p" => format!("{{\\pard\\sa120 {}\\par}}\n", visit_children(node)),
        "br" => String::from("\\line "),
        "strong" | "b" => format!("{{\\b {}}}", visit_children(node)),
        "em" | "i" => format!("{{\\i {}}}", visit_children(node)),
        "u" => format!("{{\\ul {}}}", visit_children(node)),
        "del" | "s" | "strike" => format!("{{\\strike {}}}", visit_children(node)),
        "ul" | "ol" | "a" => visit_children(node),
        "li" => format!(
            "{{\\pard\\li720\\fi-360\\sa60 \\u8226? {}\\par}}\n",
            visit_children(node)
        ),
        "blockquote" => format!(
            "{{\\pard\\li720\\ri720\\sa120 {}\\par}}\n",
            visit_children(node)
        ),
        "pre" => preformatted(node),
        "code" => {
            if parent_tag(node).as_deref() == Some("pre") {
                visit_children(node)
            } else {
                format!("{{\\f1\\fs20 {}}}", visit_children(node))
            }
        },
        "hr" => String::from("{\\pard\\brdrb\\brdrs\\brdrw10\\brsp40 \\par}\n"),
        "table" => table(node),
        "input" => checkbox(node),
        _ => {
            let mut out = visit_children(node);
            if CONTAINER_TAGS.contains(tag.as_str()) {
                out.push_str("\\par\n");
            }
            out
        },
    }
}

fn heading(node: &Handle, spacing: &str, size: &str) -> String {
    format!(
        "{{\\pard{spacing}{{\\b{size} {}}}\\par}}\n",
        visit_children(node)
    )
}

/// `<pre>` keeps its literal line structure: raw text content, one
/// `\line` per interior newline, Courier New at 10pt.
fn preformatted(node: &Handle) -> String {
    let content = text_content(node);
    let lines: Vec<String> = content.split('\n').map(escape_text).collect();
    format!(
        "{{\\pard\\sa120{{\\f1\\fs20 {}}}\\par}}\n",
        lines.join("\\line ")
    )
}

/// Rows become `\tab`-separated paragraphs; header cells are bolded.
fn table(node: &Handle) -> String {
    let mut out = String::new();
    for row in descendants_by_tag(node, &["tr"]) {
        out.push_str("{\\pard ");
        for (i, cell) in descendants_by_tag(&row, &["th", "td"]).iter().enumerate() {
            if i > 0 {
                out.push_str("\\tab ");
            }
            let header = tag_lower(cell).as_deref() == Some("th");
            if header {
                out.push_str("{\\b ");
            }
            out.push_str(&visit_children(cell));
            if header {
                out.push('}');
            }
        }
        out.push_str("\\par}\n");
    }
    out
}

fn checkbox(node: &Handle) -> String {
    let is_checkbox = attr(node, "type")
        .is_some_and(|t| t.eq_ignore_ascii_case("checkbox"));
    if !is_checkbox {
        return String::new();
    }
    if attr(node, "checked").is_some() {
        String::from("[x] ")
    } else {
        String::from("[ ] ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_paragraph() {
        assert_eq!(
            html_to_rtf("<p>Hello <strong>world</strong>!</p>"),
            "{\\rtf1\\ansi\\deff0{\\fonttbl{\\f0 Times New Roman;}{\\f1 Courier New;}}\\f0\\fs24\n\
             {\\pard\\sa120 Hello {\\b world}!\\par}\n}"
        );
    }

    #[test]
    fn test_headings() {
        let rtf = html_to_rtf("<h1>Title</h1><h3>Sub</h3>");
        assert!(rtf.contains("{\\pard\\sb240\\sa120{\\b\\fs48 Title}\\par}"));
        assert!(rtf.contains("{\\pard\\sb160\\sa80{\\b\\fs32 Sub}\\par}"));
    }

    #[test]
    fn test_list_items() {
        let rtf = html_to_rtf("<ul><li>one</li><li>two</li></ul>");
        assert!(rtf.contains("{\\pard\\li720\\fi-360\\sa60 \\u8226? one\\par}"));
        assert!(rtf.contains("\\u8226? two\\par}"));
    }

    #[test]
    fn test_pre_keeps_line_structure() {
        let rtf = html_to_rtf("<pre>let x = 1;\nlet y = 2;</pre>");
        assert!(rtf.contains("{\\pard\\sa120{\\f1\\fs20 let x = 1;\\line let y = 2;}\\par}"));
    }

    #[test]
    fn test_inline_code() {
        let rtf = html_to_rtf("<p>run <code>ls</code></p>");
        assert!(rtf.contains("run {\\f1\\fs20 ls}"));
    }

    #[test]
    fn test_table_rows() {
        let rtf = html_to_rtf("<table><tr><th>Name</th><td>v</td></tr></table>");
        assert!(rtf.contains("{\\pard {\\b Name}\\tab v\\par}"));
    }

    #[test]
    fn test_checkboxes() {
        let rtf = html_to_rtf(r#"<p><input type="checkbox" checked>done</p>"#);
        assert!(rtf.contains("[x] done"));
        let rtf = html_to_rtf(r#"<p><input type="checkbox">open</p>"#);
        assert!(rtf.contains("[ ] open"));
        let rtf = html_to_rtf(r#"<p><input type="CHECKBOX" checked>shouted</p>"#);
        assert!(rtf.contains("[x] shouted"));
    }

    #[test]
    fn test_non_ascii_escaped() {
        let rtf = html_to_rtf("<p>caf\u{e9}</p>");
        assert!(rtf.contains("caf\\u233?"));
    }

    #[test]
    fn test_special_characters_escaped() {
        let rtf = html_to_rtf(r"<p>a\b{c}</p>");
        assert!(rtf.contains(r"a\\b\{c\}"));
    }

    #[test]
    fn test_strikethrough_and_links() {
        let rtf = html_to_rtf(r#"<p><del>old</del> <a href="https://x.test">link</a></p>"#);
        assert!(rtf.contains("{\\strike old}"));
        assert!(rtf.contains("link"));
        assert!(!rtf.contains("href"));
    }

    #[test]
    fn test_empty_input_still_a_document() {
        assert_eq!(
            html_to_rtf(""),
            "{\\rtf1\\ansi\\deff0{\\fonttbl{\\f0 Times New Roman;}{\\f1 Courier New;}}\\f0\\fs24\n\n}"
        );
    }

    /// Count unescaped braces, honoring `\{`, `\}` and `\\`.
    fn brace_balance(rtf: &str) -> (usize, usize) {
        let mut opens = 0;
        let mut closes = 0;
        let mut chars = rtf.chars();
        while let Some(ch) = chars.next() {
            match ch {
                '\\' => {
                    chars.next();
                },
                '{' => opens += 1,
                '}' => closes += 1,
                _ => {},
            }
        }
        (opens, closes)
    }

    #[test]
    fn test_generated_braces_balanced() {
        let samples = [
            "<h1>T</h1><p>a <strong>b</strong> <em>c</em></p>",
            "<ul><li>x</li></ul><table><tr><th>h</th><td>d</td></tr></table>",
            r"<p>literal \ and { and } chars</p>",
            "<pre>a\nb</pre><blockquote>q</blockquote><hr>",
        ];
        for html in samples {
            let (opens, closes) = brace_balance(&html_to_rtf(html));
            assert_eq!(opens, closes, "unbalanced output for {html:?}");
        }
    }

    proptest::proptest! {
        #[test]
        fn balanced_braces_for_arbitrary_text(content in "[ -~]{0,60}") {
            let rtf = html_to_rtf(&format!("<p>{content}</p>"));
            let (opens, closes) = brace_balance(&rtf);
            proptest::prop_assert_eq!(opens, closes);
        }
    }

    #[test]
    fn test_blockquote_and_hr() {
        let rtf = html_to_rtf("<blockquote>quoted</blockquote><hr>");
        assert!(rtf.contains("{\\pard\\li720\\ri720\\sa120 quoted\\par}"));
        assert!(rtf.contains("{\\pard\\brdrb\\brdrs\\brdrw10\\brsp40 \\par}"));
    }
}
