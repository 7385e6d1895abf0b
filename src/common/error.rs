//! Unified error type.
//!
//! Parsing itself never fails (malformed input degrades to best-effort
//! output); errors arise only at the byte-input boundary and when a
//! conversion pair is not implemented.

use thiserror::Error;

use super::detection::Format;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Conversion error.
#[derive(Debug, Error)]
pub enum Error {
    /// Input bytes are not valid UTF-8
    #[error("input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// The requested conversion pair is not implemented
    #[error("unsupported conversion: {from} to {to}")]
    UnsupportedConversion {
        /// Source format
        from: Format,
        /// Target format
        to: Format,
    },
}
