//! Primary tonal and color steps (pipeline steps 1-8).
//!
//! All functions work on one RGB triple in f32 255-space. Nothing here
//! clamps; the pipeline clamps once on write-back.

use grade_core::luma;
use grade_model::AdjustmentRecord;

/// Tonal subset: exposure, brightness, contrast, temperature (steps 1-4).
///
/// This is also the subset baked into exported 3D LUTs; zone wheels and
/// lift/gamma/gain cannot be encoded losslessly at 16^3 resolution, so LUT
/// export stops here.
#[inline]
pub fn apply_tonal(rec: &AdjustmentRecord, mut rgb: [f32; 3]) -> [f32; 3] {
    // 1. Exposure
    if rec.exposure != 0.0 {
        let factor = 1.0 + rec.exposure / 50.0;
        for v in &mut rgb {
            *v *= factor;
        }
    }

    // 2. Brightness
    if rec.brightness != 0.0 {
        let offset = rec.brightness * 255.0 / 100.0;
        for v in &mut rgb {
            *v += offset;
        }
    }

    // 3. Contrast
    if rec.contrast != 0.0 {
        let factor = (rec.contrast + 100.0) / 100.0;
        for v in &mut rgb {
            *v = ((*v / 255.0 - 0.5) * factor + 0.5) * 255.0;
        }
    }

    // 4. Temperature: warm boosts red, slightly lifts green, damps blue.
    if rec.temperature != 0.0 {
        let shift = rec.temperature / 50.0 * 30.0;
        rgb[0] += shift;
        rgb[1] += shift * 0.25;
        rgb[2] -= shift;
    }

    rgb
}

/// Color subset: saturation, vibrance, hue, clarity (steps 5-8).
#[inline]
pub fn apply_color(rec: &AdjustmentRecord, mut rgb: [f32; 3]) -> [f32; 3] {
    // 5. Saturation: blend toward luminance-weighted gray.
    if rec.saturation != 0.0 {
        let factor = (rec.saturation + 100.0) / 100.0;
        let gray = luma(rgb);
        for v in &mut rgb {
            *v = gray + (*v - gray) * factor;
        }
    }

    // 6. Vibrance: boost inversely proportional to existing saturation.
    if rec.vibrance != 0.0 {
        let amount = rec.vibrance / 100.0;
        let max = rgb[0].max(rgb[1]).max(rgb[2]);
        let min = rgb[0].min(rgb[1]).min(rgb[2]);
        let range = max - min;
        let factor = 1.0 + amount * (1.0 - range / 255.0);
        let gray = luma(rgb);
        for v in &mut rgb {
            *v = gray + (*v - gray) * factor;
        }
    }

    // 7. Hue: simplified shift, a 2D rotation of the (R, G) pair.
    if rec.hue != 0.0 {
        rgb = rotate_rg(rgb, rec.hue);
    }

    // 8. Clarity: local contrast around mid-gray.
    if rec.clarity != 0.0 {
        let factor = 1.0 + rec.clarity / 100.0 * 0.5;
        for v in &mut rgb {
            *v = 127.5 + (*v - 127.5) * factor;
        }
    }

    rgb
}

/// Rotates the (R, G) pair by `degrees`.
///
/// A deliberate simplification versus full HSL hue rotation; blue is left
/// untouched.
#[inline]
pub fn rotate_rg(rgb: [f32; 3], degrees: f32) -> [f32; 3] {
    let rad = degrees.to_radians();
    let (sin, cos) = rad.sin_cos();
    [
        rgb[0] * cos - rgb[1] * sin,
        rgb[0] * sin + rgb[1] * cos,
        rgb[2],
    ]
}
