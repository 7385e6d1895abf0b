//! Segment model for parsed RTF content.

/// Character formatting active for a run of text.
///
/// Copied onto the parser's group stack at each `{` and restored at `}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Formatting {
    /// Bold
    pub bold: bool,
    /// Italic
    pub italic: bool,
    /// Underline
    pub underline: bool,
}

/// A contiguous run of text with uniform formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    /// Text content
    pub text: String,
    /// Character formatting
    pub formatting: Formatting,
}

impl Run {
    /// Create a new run.
    #[inline]
    pub fn new(text: String, formatting: Formatting) -> Self {
        Self { text, formatting }
    }
}

/// A unit of parsed document output, in document order.
///
/// Adjacent runs with identical formatting are always coalesced into a
/// single `Run`; a boundary exists only where formatting changed or a
/// paragraph break occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A formatted text run
    Run(Run),
    /// A paragraph break (`\par` or `\line`)
    ParagraphBreak,
}
