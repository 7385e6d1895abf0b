//! Bidirectional Rich Text Format conversion.
//!
//! Pomelo reads RTF into a flat sequence of formatted text runs and
//! paragraph breaks, projects that to minimal HTML or plain text, and
//! generates RTF back from HTML or plain text. Malformed RTF never
//! fails to parse: unknown control words are ignored, broken escapes
//! are dropped and unbalanced braces are tolerated.
//!
//! # Example
//!
//! ```
//! use pomelo::{Format, convert};
//!
//! let html = convert(r"{\rtf1 Hello \b world\b0!\par}", Format::Rtf, Format::Html)?;
//! assert_eq!(html, "<p>Hello <strong>world</strong>!</p>");
//!
//! let rtf = convert("<p>Hello <strong>world</strong>!</p>", Format::Html, Format::Rtf)?;
//! assert!(rtf.starts_with("{\\rtf1\\ansi"));
//! # Ok::<(), pomelo::Error>(())
//! ```
//!
//! Input format sniffing is available through [`detect_format`]:
//!
//! ```
//! use pomelo::{Format, detect_format};
//!
//! assert_eq!(detect_format(r"{\rtf1 x}"), Some(Format::Rtf));
//! assert_eq!(detect_format("<p>x</p>"), Some(Format::Html));
//! ```

/// Shared infrastructure: errors and format detection
pub mod common;
/// Conversion entry points
pub mod convert;
/// HTML parsing and the plain-text projector
pub mod html;
/// RTF lexer, parser, renderer and generator
pub mod rtf;

pub use common::{Error, Format, Result, detect_format};
pub use convert::{
    convert, html_to_rtf, html_to_text, rtf_bytes_to_html, rtf_to_html, rtf_to_text, text_to_html,
    text_to_rtf,
};
