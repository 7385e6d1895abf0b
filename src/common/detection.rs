//! Input format detection.
//!
//! Ordered sniffing: RTF by signature, then HTML by indicator tags
//! backed by a tag count, then Markdown by scoring syntax patterns, and
//! plain text as the fallback.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Signature prefix every RTF document starts with.
const RTF_SIGNATURE: &str = "{\\rtf";

/// A detected or requested document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Rich Text Format
    Rtf,
    /// HTML
    Html,
    /// Markdown
    Markdown,
    /// Plain text
    Text,
}

impl Format {
    /// Short lowercase name, stable across releases.
    pub fn name(self) -> &'static str {
        match self {
            Format::Rtf => "rtf",
            Format::Html => "html",
            Format::Markdown => "md",
            Format::Text => "txt",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A tag that strongly suggests HTML rather than stray angle brackets.
static HTML_INDICATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)<(!DOCTYPE|html|head|body|div|p|span|h[1-6]|ul|ol|li|table|tr|td|th|a\s|img\s|br|hr|section|article|nav|footer|header|main|form|input|button|select|textarea|pre|code|blockquote|strong|em|b|i)\b[^>]*>",
    )
    .unwrap()
});

static HTML_OPEN_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<[a-z][a-z0-9]*\b[^>]*>").unwrap());

static HTML_CLOSE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</[a-z][a-z0-9]*>").unwrap());

/// Markdown syntax patterns; two or more distinct hits classify the
/// input as Markdown.
static MARKDOWN_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?m)^#{1,6}\s+.+",       // ATX heading
        r"\*\*[^*]+\*\*",          // bold
        r"__[^_]+__",              // bold (underscore)
        r"\[[^\]]+\]\([^)]+\)",    // link
        r"(?m)^```",               // fenced code block
        r"(?m)^>\s+.+",            // blockquote
        r"(?m)^[-*+]\s+.+",        // unordered list
        r"(?m)^\d+\.\s+.+",        // ordered list
        r"!\[[^\]]*\]\([^)]+\)",   // image
        r"(?m)^-{3,}$",            // thematic break
        r"\|.*\|.*\|",             // table row
        r"(?m)^- \[[ x]\]",        // task list
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Detect the format of an input string.
///
/// Returns `None` for empty or whitespace-only input. Never returns
/// an error: anything unrecognized is plain text.
pub fn detect_format(text: &str) -> Option<Format> {
    if text.trim().is_empty() {
        return None;
    }
    if text.trim_start().starts_with(RTF_SIGNATURE) {
        return Some(Format::Rtf);
    }
    if HTML_INDICATOR.is_match(text) {
        let opens = HTML_OPEN_TAG.find_iter(text).count();
        let closes = HTML_CLOSE_TAG.find_iter(text).count();
        if opens >= 2 || closes >= 1 {
            return Some(Format::Html);
        }
    }
    let score = MARKDOWN_PATTERNS
        .iter()
        .filter(|p| p.is_match(text))
        .count();
    if score >= 2 {
        return Some(Format::Markdown);
    }
    Some(Format::Text)
}
