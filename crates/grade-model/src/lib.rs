//! # grade-model
//!
//! The canonical adjustment record for the color grading engine: a flat,
//! versioned set of named parameters, each a scalar in a fixed range or a
//! hue/saturation/luminance wheel scoped to a luminance zone.
//!
//! Records are plain `Copy` values; every change is a copy-with-override.
//! That value semantics is what keeps undo/redo snapshots and debounced
//! supersession free of aliasing hazards.
//!
//! # Example
//!
//! ```rust
//! use grade_model::AdjustmentRecord;
//!
//! let base = AdjustmentRecord::default();
//! let warmer = AdjustmentRecord { temperature: 30.0, ..base };
//! assert!(base.is_identity());
//! assert!(!warmer.is_identity());
//! ```

#![warn(missing_docs)]

mod error;
mod patch;
mod record;

pub use error::{ModelError, ModelResult};
pub use patch::AdjustmentPatch;
pub use record::{ADJUSTMENT_VERSION, AdjustmentRecord, Wheel};
