//! HTML rendering of parsed RTF segments.

use super::types::{Formatting, Segment};
use crate::html::escape_html;

/// Render a segment sequence as minimal HTML.
///
/// Runs accumulate into `<p>` elements; each paragraph break closes the
/// open element and emits a structural newline. Whitespace-only runs that
/// would otherwise open a paragraph are dropped. A document with no
/// renderable content yields `"<p></p>"`.
pub fn render_html(segments: &[Segment]) -> String {
    let mut out = String::new();
    let mut in_paragraph = false;

    for segment in segments {
        match segment {
            Segment::ParagraphBreak => {
                if in_paragraph {
                    out.push_str("</p>");
                    in_paragraph = false;
                }
                out.push('\n');
            },
            Segment::Run(run) => {
                if !in_paragraph && run.text.trim().is_empty() {
                    continue;
                }
                if !in_paragraph {
                    out.push_str("<p>");
                    in_paragraph = true;
                }
                push_styled(&mut out, &run.text, run.formatting);
            },
        }
    }

    if in_paragraph {
        out.push_str("</p>");
    }

    let trimmed = out.trim();
    if trimmed.is_empty() {
        String::from("<p></p>")
    } else {
        trimmed.to_owned()
    }
}

/// Wrap escaped run text in its formatting elements, bold innermost.
fn push_styled(out: &mut String, text: &str, format: Formatting) {
    if format.underline {
        out.push_str("<u>");
    }
    if format.italic {
        out.push_str("<em>");
    }
    if format.bold {
        out.push_str("<strong>");
    }
    out.push_str(&escape_html(text));
    if format.bold {
        out.push_str("</strong>");
    }
    if format.italic {
        out.push_str("</em>");
    }
    if format.underline {
        out.push_str("</u>");
    }
}

#[cfg(test)]
mod tests {
    use super::super::parser::parse_segments;
    use super::*;

    fn rtf_to_html(input: &str) -> String {
        render_html(&parse_segments(input))
    }

    #[test]
    fn test_basic_paragraph() {
        assert_eq!(
            rtf_to_html(r"{\rtf1\ansi\deff0\f0\fs24 Hello \b world\b0!\par}"),
            "<p>Hello <strong>world</strong>!</p>"
        );
    }

    #[test]
    fn test_unicode_content() {
        assert_eq!(
            rtf_to_html(r"{\rtf1 \u232? is e with grave}"),
            "<p>è is e with grave</p>"
        );
    }

    #[test]
    fn test_multiple_paragraphs() {
        assert_eq!(
            rtf_to_html(r"{\rtf1 first\par second\par}"),
            "<p>first</p>\n<p>second</p>"
        );
    }

    #[test]
    fn test_nesting_order() {
        assert_eq!(
            rtf_to_html(r"{\rtf1 \b\i\ul all\par}"),
            "<p><u><em><strong>all</strong></em></u></p>"
        );
    }

    #[test]
    fn test_text_is_escaped() {
        assert_eq!(
            rtf_to_html(r"{\rtf1 a < b & c > d\par}"),
            "<p>a &lt; b &amp; c &gt; d</p>"
        );
    }

    #[test]
    fn test_empty_document_fallback() {
        assert_eq!(rtf_to_html(r"{\rtf1\par\par}"), "<p></p>");
        assert_eq!(rtf_to_html(""), "<p></p>");
    }

    #[test]
    fn test_leading_whitespace_run_dropped() {
        assert_eq!(rtf_to_html(r"{\rtf1\par   \par text\par}"), "<p>text</p>");
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let segments = parse_segments(r"{\rtf1 a\par\b b\b0{\i c}\par}");
        assert_eq!(render_html(&segments), render_html(&segments));
    }
}
