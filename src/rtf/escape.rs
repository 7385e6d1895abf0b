//! RTF escape codec.
//!
//! Decoding for `\'hh` hex escapes and `\uN` Unicode escapes, and the
//! escaping applied to text content when generating RTF.

/// Decode a two-digit hex escape payload (the `hh` in `\'hh`).
///
/// The byte value is taken directly as a Unicode code point (Latin-1
/// projection). Returns `None` for a non-hex pair; the caller drops the
/// character rather than failing.
#[inline]
pub fn decode_hex(hex: &str) -> Option<char> {
    u8::from_str_radix(hex, 16).ok().map(|byte| byte as char)
}

/// Decode a `\uN` Unicode escape parameter.
///
/// RTF Unicode escapes carry signed 16-bit values; negative values denote
/// code points >= 0x8000 and are normalized by adding 65536. Returns `None`
/// when the normalized value is not a valid scalar.
#[inline]
pub fn decode_unicode(value: i32) -> Option<char> {
    let code = if value < 0 { value + 65536 } else { value };
    u32::try_from(code).ok().and_then(char::from_u32)
}

/// Escape text content for emission inside an RTF document.
///
/// Backslashes and braces get a leading backslash, newlines and carriage
/// returns are dropped (paragraph structure is expressed via control
/// words), and any character above 0x7F becomes a `\uN?` escape with the
/// unsigned code point.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut digits = itoa::Buffer::new();
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '\n' | '\r' => {},
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
