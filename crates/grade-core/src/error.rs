//! Core error types.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by the core buffer types.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invalid buffer dimensions.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Unsupported channel count (only RGB and RGBA are handled).
    #[error("unsupported channel count: {0} (expected 3 or 4)")]
    InvalidChannels(u8),
}
