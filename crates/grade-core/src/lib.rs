//! # grade-core
//!
//! Core types shared by the color grading engine crates:
//!
//! - [`PixelBuffer`] - Owned 8-bit RGB/RGBA raster buffer
//! - [`ImageIdent`] - Stable identity key for an open image
//!
//! # Example
//!
//! ```rust
//! use grade_core::PixelBuffer;
//!
//! let mut buf = PixelBuffer::new(64, 64, 4).unwrap();
//! buf.set_pixel(10, 10, &[255, 128, 0, 255]);
//! assert_eq!(buf.pixel(10, 10)[0], 255);
//! ```

#![warn(missing_docs)]

mod error;
mod ident;
mod image;

pub use error::{CoreError, CoreResult};
pub use ident::ImageIdent;
pub use image::PixelBuffer;

/// Red luma weight (BT.601), used for gray-point computation.
pub const LUMA_R: f32 = 0.299;
/// Green luma weight (BT.601).
pub const LUMA_G: f32 = 0.587;
/// Blue luma weight (BT.601).
pub const LUMA_B: f32 = 0.114;

/// Luminance of an RGB triple using the BT.601 weights.
#[inline]
pub fn luma(rgb: [f32; 3]) -> f32 {
    LUMA_R * rgb[0] + LUMA_G * rgb[1] + LUMA_B * rgb[2]
}
