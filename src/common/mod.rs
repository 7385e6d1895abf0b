//! Shared infrastructure used across the conversion surfaces.

/// Input format detection
pub mod detection;
/// Unified error type
pub mod error;

pub use detection::{Format, detect_format};
pub use error::{Error, Result};
