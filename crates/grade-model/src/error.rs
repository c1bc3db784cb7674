//! Model error types.

use thiserror::Error;

/// Result type for model validation.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised by adjustment record validation.
///
/// The pixel pipeline itself never validates (it clamps); this error is for
/// the layer above that may reject a record before submission.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A parameter is outside its documented range.
    #[error("parameter {name} = {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f32,
        /// Minimum allowed.
        min: f32,
        /// Maximum allowed.
        max: f32,
    },
}
