//! Public conversion surface.
//!
//! Direct functions for each supported pair plus a [`convert`] dispatcher
//! keyed on [`Format`]. Markdown participates in detection only; pairs
//! involving it return [`Error::UnsupportedConversion`].

use once_cell::sync::Lazy;
use regex::Regex;

use crate::common::{Error, Format, Result};
use crate::html::escape_html;
use crate::rtf;

pub use crate::html::text::html_to_text;
pub use crate::rtf::writer::html_to_rtf;

/// Plain-text paragraphs are separated by one or more blank lines.
static PARAGRAPH_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\n+").unwrap());

/// Header for plain-text-sourced RTF: single font, 12pt default.
const TEXT_RTF_HEADER: &str = "{\\rtf1\\ansi\\deff0{\\fonttbl{\\f0 Times New Roman;}}\\f0\\fs24 ";

/// Convert RTF to minimal HTML.
pub fn rtf_to_html(input: &str) -> String {
    rtf::render_html(&rtf::parse_segments(input))
}

/// Convert RTF bytes to HTML, validating the encoding first.
pub fn rtf_bytes_to_html(input: &[u8]) -> Result<String> {
    Ok(rtf_to_html(std::str::from_utf8(input)?))
}

/// Strip an RTF document down to plain text.
pub fn rtf_to_text(input: &str) -> String {
    html_to_text(&rtf_to_html(input))
}

/// Wrap plain text in an RTF document, one `\pard` paragraph per
/// blank-line-separated block.
pub fn text_to_rtf(input: &str) -> String {
    let mut body = String::new();
    for paragraph in PARAGRAPH_SPLIT.split(input) {
        body.push_str("\\pard ");
        body.push_str(&escape_paragraph(paragraph));
        body.push_str("\\par\n");
    }
    format!("{TEXT_RTF_HEADER}{}}}", body.trim())
}

/// Wrap plain text in HTML paragraphs, single newlines becoming `<br>`.
pub fn text_to_html(input: &str) -> String {
    PARAGRAPH_SPLIT
        .split(input)
        .map(|p| format!("<p>{}</p>", escape_html(p).replace('\n', "<br>\n")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Escape a plain-text paragraph for RTF, keeping interior line breaks
/// as `\line`.
fn escape_paragraph(paragraph: &str) -> String {
    let mut out = String::with_capacity(paragraph.len());
    let mut digits = itoa::Buffer::new();
    for ch in paragraph.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '\n' => out.push_str("\\line\n"),
            c if (c as u32) > 127 => {
                out.push_str("\\u");
                out.push_str(digits.format(c as u32));
                out.push('?');
            },
            c => out.push(c),
        }
    }
    out
}

/// Convert between two formats.
///
/// Identity conversions return the input unchanged. Every pair over
/// RTF, HTML and plain text is supported; Markdown pairs are not.
pub fn convert(input: &str, from: Format, to: Format) -> Result<String> {
    if from == to {
        return Ok(input.to_owned());
    }
    match (from, to) {
        (Format::Rtf, Format::Html) => Ok(rtf_to_html(input)),
        (Format::Rtf, Format::Text) => Ok(rtf_to_text(input)),
        (Format::Html, Format::Rtf) => Ok(html_to_rtf(input)),
        (Format::Html, Format::Text) => Ok(html_to_text(input)),
        (Format::Text, Format::Rtf) => Ok(text_to_rtf(input)),
        (Format::Text, Format::Html) => Ok(text_to_html(input)),
        (from, to) => Err(Error::UnsupportedConversion { from, to }),
    }
}
