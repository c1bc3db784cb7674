//! # grade-ops
//!
//! The transform pipeline: applies an [`AdjustmentRecord`] to a
//! [`PixelBuffer`] in a fixed, documented order.
//!
//! The application order is part of the engine's contract - downstream
//! visual behavior depends on order, not just final values:
//!
//! 1. Exposure
//! 2. Brightness
//! 3. Contrast
//! 4. Temperature
//! 5. Saturation
//! 6. Vibrance
//! 7. Hue rotation
//! 8. Clarity
//! 9. Lift/Gamma/Gain/Offset
//! 10. Luminance-zone color wheels
//! 11. Film grain
//! 12. Vignette
//! 13. Clamp to [0, 255]
//!
//! The pipeline is infallible by contract: all arithmetic is bounded and
//! every channel is clamped on write-back. Callers validate or clamp the
//! record before submission; the hot loop does not re-check ranges.
//!
//! # Example
//!
//! ```rust
//! use grade_core::PixelBuffer;
//! use grade_model::AdjustmentRecord;
//!
//! let src = PixelBuffer::filled(16, 16, 4, [128, 128, 128, 255]).unwrap();
//! let rec = AdjustmentRecord { contrast: 50.0, ..Default::default() };
//! let out = grade_ops::apply(&src, &rec);
//! assert_eq!(out.width(), 16);
//! ```
//!
//! [`AdjustmentRecord`]: grade_model::AdjustmentRecord
//! [`PixelBuffer`]: grade_core::PixelBuffer

#![warn(missing_docs)]

pub mod basic;
pub mod effects;
pub mod grade;
pub mod pipeline;
pub mod zones;

pub use pipeline::{apply, apply_cancellable, apply_rgb};
pub use zones::Zone;
