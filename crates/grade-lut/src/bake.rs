//! Baking an adjustment record into a 3D LUT.

use crate::{Lut3D, LutError, LutResult};
use grade_model::AdjustmentRecord;
use grade_ops::basic;

/// Cube sizes supported for export.
pub const BAKE_SIZES: [usize; 2] = [16, 17];

/// Samples `rec` over a `size^3` grid, producing an exportable LUT.
///
/// Only the tonal subset (exposure, brightness, contrast, temperature) is
/// baked: zone-wheel luminance masking and lift/gamma/gain cannot be
/// encoded losslessly at 16^3 resolution, so the export is a documented
/// approximation of the on-screen look rather than a defect.
///
/// # Example
///
/// ```rust
/// use grade_lut::bake;
/// use grade_model::AdjustmentRecord;
///
/// let lut = bake(&AdjustmentRecord::default(), 16).unwrap();
/// assert_eq!(lut.rows().len(), 4096);
/// ```
pub fn bake(rec: &AdjustmentRecord, size: usize) -> LutResult<Lut3D> {
    if !BAKE_SIZES.contains(&size) {
        return Err(LutError::InvalidSize(format!(
            "bake size must be one of {BAKE_SIZES:?}, got {size}"
        )));
    }

    let last = (size - 1) as f32;
    let mut data = Vec::with_capacity(size * size * size);

    for b in 0..size {
        for g in 0..size {
            for r in 0..size {
                let rgb = [
                    r as f32 / last * 255.0,
                    g as f32 / last * 255.0,
                    b as f32 / last * 255.0,
                ];
                let out = basic::apply_tonal(rec, rgb);
                data.push([
                    (out[0] / 255.0).clamp(0.0, 1.0),
                    (out[1] / 255.0).clamp(0.0, 1.0),
                    (out[2] / 255.0).clamp(0.0, 1.0),
                ]);
            }
        }
    }

    Lut3D::from_rows(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_record_bakes_identity() {
        let lut = bake(&AdjustmentRecord::default(), 16).unwrap();
        let identity = Lut3D::identity(16);
        for (a, b) in lut.rows().iter().zip(identity.rows()) {
            for c in 0..3 {
                assert_relative_eq!(a[c], b[c], epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn values_stay_normalized_under_extremes() {
        let rec = AdjustmentRecord {
            exposure: 100.0,
            contrast: 100.0,
            brightness: -100.0,
            temperature: 100.0,
            ..Default::default()
        };
        let lut = bake(&rec, 17).unwrap();
        assert_eq!(lut.rows().len(), 17 * 17 * 17);
        for row in lut.rows() {
            for &v in row {
                assert!((0.0..=1.0).contains(&v));
            }
        }
    }

    #[test]
    fn rejects_unsupported_sizes() {
        assert!(bake(&AdjustmentRecord::default(), 33).is_err());
        assert!(bake(&AdjustmentRecord::default(), 0).is_err());
    }

    #[test]
    fn wheel_and_grade_terms_do_not_leak_into_export() {
        use grade_model::Wheel;
        let rec = AdjustmentRecord {
            lift: 80.0,
            midtones_wheel: Wheel {
                hue: 90.0,
                saturation: 100.0,
                luminance: 40.0,
            },
            ..Default::default()
        };
        let lut = bake(&rec, 16).unwrap();
        let identity = Lut3D::identity(16);
        for (a, b) in lut.rows().iter().zip(identity.rows()) {
            for c in 0..3 {
                assert_relative_eq!(a[c], b[c], epsilon = 1e-5);
            }
        }
    }
}
