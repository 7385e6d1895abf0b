//! Rich Text Format support.
//!
//! The reading side is a lexer/parser pipeline producing a flat
//! [`Segment`] sequence which [`render::render_html`] projects to HTML.
//! The writing side ([`writer`]) walks an HTML DOM and emits a complete
//! RTF document.

/// Escape codec for `\'hh`, `\uN` and generated text
pub mod escape;
/// Tokenizer
pub mod lexer;
/// Token stream to segments
pub mod parser;
/// Segments to HTML
pub mod render;
/// Segment model
pub mod types;
/// HTML to RTF generation
pub mod writer;

pub use parser::parse_segments;
pub use render::render_html;
pub use types::{Formatting, Run, Segment};
pub use writer::html_to_rtf;
