//! RTF parser that folds tokens into styled segments.
//!
//! The parser owns a stack of [`Formatting`] frames mirroring RTF group
//! nesting, discards non-content destination groups (font tables, color
//! tables, embedded pictures, ...), and coalesces adjacent text with
//! identical formatting into single runs. Malformed input degrades, it
//! never fails: unmatched closing braces are no-ops and unterminated
//! groups parse to end of input.

use smallvec::SmallVec;

use super::escape;
use super::lexer::{ControlWord, Token};
use super::types::{Formatting, Run, Segment};

/// Group-introducing keywords whose entire group is discarded without
/// emitting any segment.
static SKIP_GROUPS: phf::Set<&'static str> = phf::phf_set! {
    "fonttbl",
    "colortbl",
    "stylesheet",
    "info",
    "pict",
    "object",
    "header",
    "footer",
    "footnote",
    "xmlnstbl",
    "listtable",
    "listoverridetable",
    "revtbl",
    "rsidtbl",
    "generator",
    "mmathPr",
    "themedata",
    "colorschememapping",
    "datastore",
    "latentstyles",
    "datafield",
    "fldinst",
    "bkmkstart",
    "bkmkend",
};

/// RTF parser.
pub struct Parser<'a> {
    /// Token stream
    tokens: &'a [Token<'a>],
    /// Current position in token stream
    pos: usize,
    /// Formatting stack (one frame per unmatched `{`)
    states: SmallVec<[Formatting; 8]>,
    /// Formatting in effect at the current position
    current: Formatting,
    /// Formatting recorded at the start of the pending run
    pending_format: Formatting,
    /// Text accumulated for the pending run
    pending: String,
    /// Emitted segments
    segments: Vec<Segment>,
}

impl<'a> Parser<'a> {
    /// Create a new parser.
    pub fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            states: SmallVec::new(),
            current: Formatting::default(),
            pending_format: Formatting::default(),
            pending: String::new(),
            segments: Vec::new(),
        }
    }

    /// Parse the token stream into an ordered segment sequence.
    pub fn parse(mut self) -> Vec<Segment> {
        while self.pos < self.tokens.len() {
            match &self.tokens[self.pos] {
                Token::OpenBrace => {
                    self.pos += 1;
                    self.states.push(self.current);
                    if self.group_should_be_skipped() {
                        self.skip_balanced_group();
                        if let Some(state) = self.states.pop() {
                            self.current = state;
                        }
                    }
                },
                Token::CloseBrace => {
                    self.pos += 1;
                    self.flush();
                    // Popping an empty stack is a no-op
                    if let Some(state) = self.states.pop() {
                        self.current = state;
                    }
                    self.pending_format = self.current;
                },
                Token::Control(control) => {
                    let control = *control;
                    self.pos += 1;
                    self.apply_control_word(control);
                },
                Token::Text(text) => {
                    self.pos += 1;
                    if !text.is_empty() {
                        self.add_text(text);
                    }
                },
            }
        }

        self.flush();
        self.segments
    }

    /// Whether the group just opened starts with `\*` or a skip-set
    /// keyword.
    fn group_should_be_skipped(&self) -> bool {
        match self.tokens.get(self.pos) {
            Some(Token::Control(ControlWord::IgnorableDestination)) => true,
            Some(Token::Control(ControlWord::Unknown(word, _))) => SKIP_GROUPS.contains(word),
            _ => false,
        }
    }

    /// Consume a balanced group, including nested sub-groups, without
    /// emitting anything. The opening brace has already been consumed.
    fn skip_balanced_group(&mut self) {
        let mut depth = 1;
        while self.pos < self.tokens.len() && depth > 0 {
            match &self.tokens[self.pos] {
                Token::OpenBrace => depth += 1,
                Token::CloseBrace => depth -= 1,
                _ => {},
            }
            self.pos += 1;
        }
    }

    /// Apply a control word to the current state.
    fn apply_control_word(&mut self, control: ControlWord<'_>) {
        match control {
            // Redundant toggles are no-ops so runs only split where the
            // flag actually changes
            ControlWord::Bold(on) => {
                if self.current.bold != on {
                    self.flush();
                    self.current.bold = on;
                    self.pending_format = self.current;
                }
            },
            ControlWord::Italic(on) => {
                if self.current.italic != on {
                    self.flush();
                    self.current.italic = on;
                    self.pending_format = self.current;
                }
            },
            ControlWord::Underline(on) => {
                if self.current.underline != on {
                    self.flush();
                    self.current.underline = on;
                    self.pending_format = self.current;
                }
            },
            ControlWord::UnderlineNone => {
                if self.current.underline {
                    self.flush();
                    self.current.underline = false;
                    self.pending_format = self.current;
                }
            },
            ControlWord::Par | ControlWord::Line => {
                self.flush();
                self.segments.push(Segment::ParagraphBreak);
            },
            ControlWord::Pard => {
                // \pard clears character formatting here too, an
                // approximation of real RTF paragraph-reset semantics.
                self.flush();
                self.current = Formatting::default();
                self.pending_format = self.current;
            },
            ControlWord::Tab => self.add_char('\t'),
            ControlWord::Bullet => self.add_char('\u{2022}'),
            ControlWord::EnDash => self.add_char('\u{2013}'),
            ControlWord::EmDash => self.add_char('\u{2014}'),
            ControlWord::LeftQuote => self.add_char('\u{2018}'),
            ControlWord::RightQuote => self.add_char('\u{2019}'),
            ControlWord::LeftDoubleQuote => self.add_char('\u{201C}'),
            ControlWord::RightDoubleQuote => self.add_char('\u{201D}'),
            ControlWord::Unicode(value) => {
                if let Some(ch) = escape::decode_unicode(value) {
                    self.add_char(ch);
                }
            },
            // Stray \* outside group position, unknown keywords: ignored
            ControlWord::IgnorableDestination | ControlWord::Unknown(..) => {},
        }
    }

    /// Append text to the pending run, starting a new run first if the
    /// active formatting differs from the run's.
    fn add_text(&mut self, text: &str) {
        if self.current != self.pending_format {
            self.flush();
        }
        self.pending.push_str(text);
    }

    #[inline]
    fn add_char(&mut self, ch: char) {
        if self.current != self.pending_format {
            self.flush();
        }
        self.pending.push(ch);
    }

    /// Emit the pending run, if any, and re-anchor the run formatting at
    /// the current state.
    fn flush(&mut self) {
        if !self.pending.is_empty() {
            let text = std::mem::take(&mut self.pending);
            self.segments
                .push(Segment::Run(Run::new(text, self.pending_format)));
        }
        self.pending_format = self.current;
    }
}

/// Parse an RTF string into its segment sequence.
pub fn parse_segments(input: &str) -> Vec<Segment> {
    let arena = bumpalo::Bump::new();
    let tokens = super::lexer::Lexer::new(input, &arena).tokenize();
    Parser::new(&tokens).parse()
}
