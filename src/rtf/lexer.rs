//! RTF lexer/tokenizer.
//!
//! Tokenizes raw RTF input into braces, control words, and text runs.
//! RTF from the wild is frequently hand-edited or produced by unknown
//! writers, so lexing never fails: malformed escapes and stray control
//! symbols are dropped and lexing continues.

use super::escape;
use bumpalo::Bump;
use std::borrow::Cow;

/// Control word with optional parameter.
///
/// Only the keywords this converter acts on get variants; everything else
/// is carried as [`ControlWord::Unknown`] so group skipping can still see
/// the keyword, and is otherwise ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlWord<'a> {
    // Character formatting
    Bold(bool),
    Italic(bool),
    Underline(bool),
    UnderlineNone,

    // Paragraph structure
    Par,
    Line,
    Pard,

    // Inline special characters
    Tab,
    Bullet,
    EnDash,
    EmDash,
    LeftQuote,
    RightQuote,
    LeftDoubleQuote,
    RightDoubleQuote,

    // Unicode escape (signed 16-bit parameter)
    Unicode(i32),

    // `\*` ignorable destination marker
    IgnorableDestination,

    // Unrecognized control word
    Unknown(&'a str, Option<i32>),
}

/// Token types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// Opening brace
    OpenBrace,
    /// Closing brace
    CloseBrace,
    /// Control word
    Control(ControlWord<'a>),
    /// Plain text
    Text(Cow<'a, str>),
}

/// RTF lexer using arena allocation for decoded escape text.
pub struct Lexer<'a> {
    /// Source input
    input: &'a str,
    /// Current position in bytes
    pos: usize,
    /// Arena allocator for temporary strings
    arena: &'a Bump,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer.
    #[inline]
    pub fn new(input: &'a str, arena: &'a Bump) -> Self {
        Self {
            input,
            pos: 0,
            arena,
        }
    }

    /// Tokenize the entire input.
    pub fn tokenize(&mut self) -> Vec<Token<'a>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        tokens
    }

    /// Get the next token, or `None` at end of input.
    fn next_token(&mut self) -> Option<Token<'a>> {
        while self.pos < self.input.len() {
            match self.current_char() {
                '{' => {
                    self.advance();
                    return Some(Token::OpenBrace);
                },
                '}' => {
                    self.advance();
                    return Some(Token::CloseBrace);
                },
                '\\' => {
                    if let Some(token) = self.lex_control() {
                        return Some(token);
                    }
                    // Dropped escape (optional hyphen, bad hex pair, ...)
                },
                '\r' | '\n' => self.advance(),
                _ => return Some(self.lex_text()),
            }
        }
        None
    }

    /// Lex a control word or control symbol after a backslash.
    ///
    /// Returns `None` when the escape produces no token (it is consumed
    /// and dropped).
    fn lex_control(&mut self) -> Option<Token<'a>> {
        self.advance(); // Skip '\'

        if self.pos >= self.input.len() {
            return None;
        }

        let ch = self.current_char();

        // Control symbols come before the alphabetic branch.
        match ch {
            '\\' | '{' | '}' => {
                let start = self.pos;
                self.advance();
                return Some(Token::Text(Cow::Borrowed(&self.input[start..self.pos])));
            },
            '\'' => return self.lex_hex_escape(),
            '*' => {
                self.advance();
                return Some(Token::Control(ControlWord::IgnorableDestination));
            },
            '~' => {
                self.advance();
                return Some(Token::Text(Cow::Borrowed("\u{00A0}")));
            },
            '-' => {
                // Optional hyphen, dropped
                self.advance();
                return None;
            },
            '_' => {
                self.advance();
                return Some(Token::Text(Cow::Borrowed("\u{2011}")));
            },
            c if !c.is_ascii_alphabetic() => {
                // Unknown control symbol, dropped
                self.advance();
                return None;
            },
            _ => {},
        }

        // Control word: one or more letters
        let start = self.pos;
        while self.pos < self.input.len() && self.current_char().is_ascii_alphabetic() {
            self.advance();
        }
        let word = &self.input[start..self.pos];

        // Optional signed numeric parameter
        let param = self.lex_numeric_parameter();

        // One trailing space is a delimiter, not content
        if self.pos < self.input.len() && self.current_char() == ' ' {
            self.advance();
        }

        // `\uN` may carry one ASCII fallback glyph; consume and discard it
        if word == "u"
            && let Some(value) = param
        {
            if self.pos < self.input.len() && self.current_char() == '?' {
                self.advance();
            }
            return Some(Token::Control(ControlWord::Unicode(value)));
        }

        Some(Token::Control(Self::match_control_word(word, param)))
    }

    /// Parse the optional numeric parameter after a control word.
    fn lex_numeric_parameter(&mut self) -> Option<i32> {
        if self.pos >= self.input.len() {
            return None;
        }

        let ch = self.current_char();
        if !ch.is_ascii_digit() && ch != '-' {
            return None;
        }

        let start = self.pos;
        if ch == '-' {
            self.advance();
        }
        while self.pos < self.input.len() && self.current_char().is_ascii_digit() {
            self.advance();
        }

        self.input[start..self.pos].parse::<i32>().ok()
    }

    /// Match a control word string to its enum variant.
    fn match_control_word(word: &'a str, param: Option<i32>) -> ControlWord<'a> {
        // Absence of a parameter means "on"
        let param_bool = param.unwrap_or(1) != 0;

        match word {
            "b" => ControlWord::Bold(param_bool),
            "i" => ControlWord::Italic(param_bool),
            "ul" => ControlWord::Underline(param_bool),
            "ulnone" => ControlWord::UnderlineNone,
            "par" => ControlWord::Par,
            "line" => ControlWord::Line,
            "pard" => ControlWord::Pard,
            "tab" => ControlWord::Tab,
            "bullet" => ControlWord::Bullet,
            "endash" => ControlWord::EnDash,
            "emdash" => ControlWord::EmDash,
            "lquote" => ControlWord::LeftQuote,
            "rquote" => ControlWord::RightQuote,
            "ldblquote" => ControlWord::LeftDoubleQuote,
            "rdblquote" => ControlWord::RightDoubleQuote,
            _ => ControlWord::Unknown(word, param),
        }
    }

    /// Lex a hexadecimal character escape (`\'hh`).
    fn lex_hex_escape(&mut self) -> Option<Token<'a>> {
        self.advance(); // Skip '\''

        let hex = self.input.get(self.pos..self.pos + 2)?;
        self.pos += 2;

        let ch = escape::decode_hex(hex)?;
        let text = self.arena.alloc_str(ch.encode_utf8(&mut [0u8; 4]));
        Some(Token::Text(Cow::Borrowed(text)))
    }

    /// Lex plain text until a special character.
    ///
    /// Bare newlines and carriage returns in the source are skipped; they
    /// are line-wrapping in the RTF file, not content.
    fn lex_text(&mut self) -> Token<'a> {
        let start = self.pos;
        let mut rewrapped: Option<String> = None;

        while self.pos < self.input.len() {
            match self.current_char() {
                '\\' | '{' | '}' => break,
                '\r' | '\n' => {
                    if rewrapped.is_none() {
                        rewrapped = Some(self.input[start..self.pos].to_string());
                    }
                    self.advance();
                },
                ch => {
                    if let Some(buf) = rewrapped.as_mut() {
                        buf.push(ch);
                    }
                    self.advance();
                },
            }
        }

        match rewrapped {
            // No newline seen: borrow the input slice directly
            None => Token::Text(Cow::Borrowed(&self.input[start..self.pos])),
            Some(buf) => Token::Text(Cow::Borrowed(self.arena.alloc_str(&buf))),
        }
    }

    /// Get current character without advancing.
    #[inline]
    fn current_char(&self) -> char {
        self.input[self.pos..].chars().next().unwrap_or('\0')
    }

    /// Advance position by one character.
    #[inline]
    fn advance(&mut self) {
        if self.pos < self.input.len() {
            let ch = self.current_char();
            self.pos += ch.len_utf8();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_tokenization() {
        let arena = Bump::new();
        let mut lexer = Lexer::new(r"{\rtf1\ansi Hello}", &arena);
        let tokens = lexer.tokenize();

        assert_eq!(tokens.len(), 5);
        assert!(matches!(tokens[0], Token::OpenBrace));
        assert!(matches!(
            tokens[1],
            Token::Control(ControlWord::Unknown("rtf", Some(1)))
        ));
        assert!(matches!(
            tokens[2],
            Token::Control(ControlWord::Unknown("ansi", None))
        ));
        assert_eq!(tokens[3], Token::Text(Cow::Borrowed("Hello")));
        assert!(matches!(tokens[4], Token::CloseBrace));
    }

    #[test]
    fn test_formatting_parameters() {
        let arena = Bump::new();
        let tokens = Lexer::new(r"\b text\b0", &arena).tokenize();
        assert_eq!(tokens[0], Token::Control(ControlWord::Bold(true)));
        assert_eq!(tokens[1], Token::Text(Cow::Borrowed("text")));
        assert_eq!(tokens[2], Token::Control(ControlWord::Bold(false)));
    }

    #[test]
    fn test_delimiter_space_consumed() {
        let arena = Bump::new();
        let tokens = Lexer::new(r"\fs24 Hello", &arena).tokenize();
        assert_eq!(
            tokens[0],
            Token::Control(ControlWord::Unknown("fs", Some(24)))
        );
        // Only the single delimiter space is eaten
        assert_eq!(tokens[1], Token::Text(Cow::Borrowed("Hello")));
    }

    #[test]
    fn test_unicode_consumes_fallback() {
        let arena = Bump::new();
        let tokens = Lexer::new(r"\u232? is", &arena).tokenize();
        assert_eq!(tokens[0], Token::Control(ControlWord::Unicode(232)));
        assert_eq!(tokens[1], Token::Text(Cow::Borrowed(" is")));
    }

    #[test]
    fn test_hex_escape() {
        let arena = Bump::new();
        let tokens = Lexer::new(r"\'e9t\'zz", &arena).tokenize();
        assert_eq!(tokens[0], Token::Text(Cow::Borrowed("é")));
        assert_eq!(tokens[1], Token::Text(Cow::Borrowed("t")));
        // Bad hex pair is consumed and dropped
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_literal_escapes() {
        let arena = Bump::new();
        let tokens = Lexer::new(r"\\a\{b\}", &arena).tokenize();
        assert_eq!(tokens[0], Token::Text(Cow::Borrowed("\\")));
        assert_eq!(tokens[1], Token::Text(Cow::Borrowed("a")));
        assert_eq!(tokens[2], Token::Text(Cow::Borrowed("{")));
        assert_eq!(tokens[3], Token::Text(Cow::Borrowed("b")));
        assert_eq!(tokens[4], Token::Text(Cow::Borrowed("}")));
    }

    #[test]
    fn test_newlines_skipped_inside_text() {
        let arena = Bump::new();
        let tokens = Lexer::new("Hello\nworld", &arena).tokenize();
        assert_eq!(tokens, vec![Token::Text(Cow::Borrowed("Helloworld"))]);
    }

    #[test]
    fn test_negative_parameter() {
        let arena = Bump::new();
        let tokens = Lexer::new(r"\fi-360", &arena).tokenize();
        assert_eq!(
            tokens[0],
            Token::Control(ControlWord::Unknown("fi", Some(-360)))
        );
    }

    #[test]
    fn test_trailing_backslash() {
        let arena = Bump::new();
        let tokens = Lexer::new("a\\", &arena).tokenize();
        assert_eq!(tokens, vec![Token::Text(Cow::Borrowed("a"))]);
    }

    #[test]
    fn test_nonbreaking_space_symbol() {
        let arena = Bump::new();
        let tokens = Lexer::new(r"a\~b\-c", &arena).tokenize();
        assert_eq!(tokens[0], Token::Text(Cow::Borrowed("a")));
        assert_eq!(tokens[1], Token::Text(Cow::Borrowed("\u{00A0}")));
        assert_eq!(tokens[2], Token::Text(Cow::Borrowed("b")));
        // \- dropped entirely
        assert_eq!(tokens[3], Token::Text(Cow::Borrowed("c")));
    }
}
