//! History error types.

use thiserror::Error;

/// Result type for history persistence.
pub type HistoryResult<T> = Result<T, HistoryError>;

/// Errors raised while persisting history.
///
/// Loading never errors: missing, stale, or unparsable cache entries are
/// treated as empty history.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Serializing the history payload failed.
    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}
