//! LUT error types.

use thiserror::Error;

/// Result type for LUT operations.
pub type LutResult<T> = Result<T, LutError>;

/// Errors raised by LUT parsing, baking, and sampling.
///
/// Malformed input is always a hard error; a truncated table is never
/// silently accepted.
#[derive(Debug, Error)]
pub enum LutError {
    /// The table body is malformed: unparsable token or a row count that
    /// is not a perfect cube.
    #[error("malformed LUT: {0}")]
    Malformed(String),

    /// Unsupported or inconsistent cube size.
    #[error("invalid LUT size: {0}")]
    InvalidSize(String),

    /// I/O error while reading or writing a LUT file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
