//! Luminance-zone color wheels (pipeline step 10).
//!
//! A pixel is classified by normalized luminance into shadows, midtones,
//! or highlights and receives only the matching wheel. The thresholds are
//! hard by design; softening them would change visual output.

use crate::basic::rotate_rg;
use grade_core::luma;
use grade_model::{AdjustmentRecord, Wheel};

/// Upper bound (exclusive) of the shadows zone, normalized luminance.
pub const SHADOWS_MAX: f32 = 0.33;
/// Upper bound (exclusive) of the midtones zone, normalized luminance.
pub const MIDTONES_MAX: f32 = 0.66;

/// Luminance zone of a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// Normalized luminance below 0.33.
    Shadows,
    /// Normalized luminance in [0.33, 0.66).
    Midtones,
    /// Normalized luminance at or above 0.66.
    Highlights,
}

/// Classifies a normalized luminance value into its zone.
#[inline]
pub fn classify(luma_norm: f32) -> Zone {
    if luma_norm < SHADOWS_MAX {
        Zone::Shadows
    } else if luma_norm < MIDTONES_MAX {
        Zone::Midtones
    } else {
        Zone::Highlights
    }
}

/// Applies the wheel matching the pixel's zone.
///
/// Exactly one wheel affects a given pixel. Per-wheel order: luminance
/// offset, then saturation blend toward the zone's gray point, then hue
/// rotation.
#[inline]
pub fn apply_wheels(rec: &AdjustmentRecord, rgb: [f32; 3]) -> [f32; 3] {
    if rec.wheels_are_neutral() {
        return rgb;
    }

    let zone = classify(luma(rgb) / 255.0);
    let wheel = match zone {
        Zone::Shadows => &rec.shadows_wheel,
        Zone::Midtones => &rec.midtones_wheel,
        Zone::Highlights => &rec.highlights_wheel,
    };
    apply_wheel(wheel, rgb)
}

/// Applies a single wheel to one RGB triple (255-space).
#[inline]
pub fn apply_wheel(wheel: &Wheel, mut rgb: [f32; 3]) -> [f32; 3] {
    if wheel.is_neutral() {
        return rgb;
    }

    // Luminance offset, scaled like the temperature shift (max +-30).
    if wheel.luminance != 0.0 {
        let offset = wheel.luminance / 50.0 * 30.0;
        for v in &mut rgb {
            *v += offset;
        }
    }

    // Saturation boost around the zone's own gray point.
    if wheel.saturation != 0.0 {
        let factor = 1.0 + wheel.saturation / 100.0;
        let gray = luma(rgb);
        for v in &mut rgb {
            *v = gray + (*v - gray) * factor;
        }
    }

    if wheel.hue != 0.0 {
        rgb = rotate_rg(rgb, wheel.hue);
    }

    rgb
}
