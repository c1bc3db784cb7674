//! Resolving pixels through an imported 3D LUT.
//!
//! Nearest-neighbour lookup with a linear blend against the original
//! color. Nearest-neighbour is an explicit simplification versus trilinear
//! interpolation; boundary indices clamp to the last valid row instead of
//! erroring.

use crate::Lut3D;
use grade_core::PixelBuffer;

/// Maps `src` through `lut`, blending with the original by
/// `intensity/100`.
///
/// `intensity` is clamped to [0, 100]. At 0 the result is an exact copy of
/// the input; at 100 it is the pure LUT color. Alpha passes through.
///
/// # Example
///
/// ```rust
/// use grade_core::PixelBuffer;
/// use grade_lut::{sample, Lut3D};
///
/// let src = PixelBuffer::filled(2, 2, 4, [64, 128, 192, 255]).unwrap();
/// let out = sample(&src, &Lut3D::identity(16), 100.0);
/// assert_eq!(out.width(), 2);
/// ```
pub fn sample(src: &PixelBuffer, lut: &Lut3D, intensity: f32) -> PixelBuffer {
    let blend = intensity.clamp(0.0, 100.0) / 100.0;
    if blend == 0.0 || src.data().is_empty() {
        return src.clone();
    }

    let size = lut.size();
    let last = (size - 1) as f32;
    let channels = src.channels() as usize;
    let mut out = src.data().to_vec();

    for px in out.chunks_exact_mut(channels) {
        let r_idx = (px[0] as f32 / 255.0 * last).round() as usize;
        let g_idx = (px[1] as f32 / 255.0 * last).round() as usize;
        let b_idx = (px[2] as f32 / 255.0 * last).round() as usize;
        let row = lut.row_clamped(lut.index(r_idx, g_idx, b_idx));

        for c in 0..3 {
            let original = px[c] as f32;
            let mapped = row[c] * 255.0;
            px[c] = (original + (mapped - original) * blend)
                .clamp(0.0, 255.0)
                .round() as u8;
        }
    }

    // Length and dimensions are taken from the source, so this holds.
    PixelBuffer::from_data(out, src.width(), src.height(), src.channels())
        .unwrap_or_else(|_| src.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(rgb: [u8; 3]) -> PixelBuffer {
        PixelBuffer::filled(2, 2, 4, [rgb[0], rgb[1], rgb[2], 255]).unwrap()
    }

    #[test]
    fn zero_intensity_is_exact_noop() {
        let src = solid([13, 130, 250]);
        let inverted = invert_lut(8);
        assert_eq!(sample(&src, &inverted, 0.0), src);
    }

    #[test]
    fn full_intensity_is_pure_lut_color() {
        let src = solid([0, 0, 0]);
        let inverted = invert_lut(8);
        let out = sample(&src, &inverted, 100.0);
        assert_eq!(&out.pixel(0, 0)[..3], &[255, 255, 255]);
    }

    #[test]
    fn half_intensity_blends() {
        let src = solid([0, 0, 0]);
        let inverted = invert_lut(8);
        let out = sample(&src, &inverted, 50.0);
        for c in 0..3 {
            assert!((out.pixel(0, 0)[c] as i16 - 128).abs() <= 1);
        }
    }

    #[test]
    fn identity_lut_at_grid_points_is_stable() {
        // 255 sits exactly on the last grid point of any size.
        let src = solid([255, 0, 255]);
        let out = sample(&src, &Lut3D::identity(16), 100.0);
        assert_eq!(&out.pixel(1, 1)[..3], &[255, 0, 255]);
    }

    #[test]
    fn alpha_is_untouched() {
        let mut src = PixelBuffer::new(1, 1, 4).unwrap();
        src.set_pixel(0, 0, &[10, 20, 30, 77]);
        let out = sample(&src, &invert_lut(4), 100.0);
        assert_eq!(out.pixel(0, 0)[3], 77);
    }

    fn invert_lut(size: usize) -> Lut3D {
        let identity = Lut3D::identity(size);
        let rows = identity
            .rows()
            .iter()
            .map(|rgb| [1.0 - rgb[0], 1.0 - rgb[1], 1.0 - rgb[2]])
            .collect();
        Lut3D::from_rows(rows).unwrap()
    }
}
