//! # grade-lut
//!
//! 3D lookup table support for the grading engine:
//!
//! - [`Lut3D`] - the cubic grid type
//! - [`cube`] - text codec for the `.cube` format (parse and write)
//! - [`bake`] - sample an adjustment record into a portable LUT
//! - [`sampler`] - resolve pixels through an imported LUT with a blend
//!   intensity
//!
//! # Example
//!
//! ```rust
//! use grade_lut::{bake, cube, Lut3D};
//! use grade_model::AdjustmentRecord;
//!
//! let rec = AdjustmentRecord { temperature: 30.0, ..Default::default() };
//! let lut = bake(&rec, 16).unwrap();
//! let text = cube::to_cube_string(&lut, "Warm");
//! let parsed = cube::parse(text.as_bytes()).unwrap();
//! assert_eq!(parsed.size(), 16);
//! ```

#![warn(missing_docs)]

mod bake;
pub mod cube;
mod error;
mod lut3d;
pub mod sampler;

pub use bake::{BAKE_SIZES, bake};
pub use error::{LutError, LutResult};
pub use lut3d::Lut3D;
pub use sampler::sample;
