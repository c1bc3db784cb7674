//! Partial adjustment patches.
//!
//! The orchestration layer (sliders, AI keyword mapping) often produces a
//! change to a handful of parameters rather than a full record. A patch is
//! that sparse change: every field optional, merged onto a base record to
//! produce the next immutable snapshot.

use crate::{AdjustmentRecord, Wheel};
use serde::{Deserialize, Serialize};

/// A sparse set of parameter overrides.
///
/// # Example
///
/// ```rust
/// use grade_model::{AdjustmentPatch, AdjustmentRecord};
///
/// let patch = AdjustmentPatch {
///     exposure: Some(20.0),
///     vignette: Some(35.0),
///     ..Default::default()
/// };
/// let rec = patch.apply_to(&AdjustmentRecord::default());
/// assert_eq!(rec.exposure, 20.0);
/// assert_eq!(rec.contrast, 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustmentPatch {
    /// Exposure override.
    pub exposure: Option<f32>,
    /// Contrast override.
    pub contrast: Option<f32>,
    /// Highlights override.
    pub highlights: Option<f32>,
    /// Shadows override.
    pub shadows: Option<f32>,
    /// Saturation override.
    pub saturation: Option<f32>,
    /// Temperature override.
    pub temperature: Option<f32>,
    /// Brightness override.
    pub brightness: Option<f32>,
    /// Vibrance override.
    pub vibrance: Option<f32>,
    /// Clarity override.
    pub clarity: Option<f32>,
    /// Hue override.
    pub hue: Option<f32>,
    /// Lift override.
    pub lift: Option<f32>,
    /// Gamma override.
    pub gamma: Option<f32>,
    /// Gain override.
    pub gain: Option<f32>,
    /// Offset override.
    pub offset: Option<f32>,
    /// Shadows wheel override (whole wheel).
    pub shadows_wheel: Option<Wheel>,
    /// Midtones wheel override (whole wheel).
    pub midtones_wheel: Option<Wheel>,
    /// Highlights wheel override (whole wheel).
    pub highlights_wheel: Option<Wheel>,
    /// Film grain override.
    pub film_grain: Option<f32>,
    /// Vignette override.
    pub vignette: Option<f32>,
    /// Bleach bypass override.
    pub bleach_bypass: Option<f32>,
    /// Orange/teal override.
    pub orange_teal: Option<f32>,
    /// Highlight roll-off override.
    pub highlight_rolloff: Option<f32>,
    /// Shadow roll-off override.
    pub shadow_rolloff: Option<f32>,
    /// Color balance override.
    pub color_balance: Option<f32>,
    /// Skin tone protection override.
    pub skin_tone_protect: Option<f32>,
    /// Luminance smoothing override.
    pub luminance_smoothing: Option<f32>,
    /// Color smoothing override.
    pub color_smoothing: Option<f32>,
}

impl AdjustmentPatch {
    /// Merges the patch onto `base`, returning the new record.
    pub fn apply_to(&self, base: &AdjustmentRecord) -> AdjustmentRecord {
        let mut rec = *base;
        rec.exposure = self.exposure.unwrap_or(rec.exposure);
        rec.contrast = self.contrast.unwrap_or(rec.contrast);
        rec.highlights = self.highlights.unwrap_or(rec.highlights);
        rec.shadows = self.shadows.unwrap_or(rec.shadows);
        rec.saturation = self.saturation.unwrap_or(rec.saturation);
        rec.temperature = self.temperature.unwrap_or(rec.temperature);
        rec.brightness = self.brightness.unwrap_or(rec.brightness);
        rec.vibrance = self.vibrance.unwrap_or(rec.vibrance);
        rec.clarity = self.clarity.unwrap_or(rec.clarity);
        rec.hue = self.hue.unwrap_or(rec.hue);
        rec.lift = self.lift.unwrap_or(rec.lift);
        rec.gamma = self.gamma.unwrap_or(rec.gamma);
        rec.gain = self.gain.unwrap_or(rec.gain);
        rec.offset = self.offset.unwrap_or(rec.offset);
        rec.shadows_wheel = self.shadows_wheel.unwrap_or(rec.shadows_wheel);
        rec.midtones_wheel = self.midtones_wheel.unwrap_or(rec.midtones_wheel);
        rec.highlights_wheel = self.highlights_wheel.unwrap_or(rec.highlights_wheel);
        rec.film_grain = self.film_grain.unwrap_or(rec.film_grain);
        rec.vignette = self.vignette.unwrap_or(rec.vignette);
        rec.bleach_bypass = self.bleach_bypass.unwrap_or(rec.bleach_bypass);
        rec.orange_teal = self.orange_teal.unwrap_or(rec.orange_teal);
        rec.highlight_rolloff = self.highlight_rolloff.unwrap_or(rec.highlight_rolloff);
        rec.shadow_rolloff = self.shadow_rolloff.unwrap_or(rec.shadow_rolloff);
        rec.color_balance = self.color_balance.unwrap_or(rec.color_balance);
        rec.skin_tone_protect = self.skin_tone_protect.unwrap_or(rec.skin_tone_protect);
        rec.luminance_smoothing = self.luminance_smoothing.unwrap_or(rec.luminance_smoothing);
        rec.color_smoothing = self.color_smoothing.unwrap_or(rec.color_smoothing);
        rec
    }

    /// True when the patch overrides nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_patch_is_noop() {
        let base = AdjustmentRecord {
            exposure: 12.0,
            ..Default::default()
        };
        let patched = AdjustmentPatch::default().apply_to(&base);
        assert_eq!(patched, base);
        assert!(AdjustmentPatch::default().is_empty());
    }

    #[test]
    fn patch_overrides_only_named_fields() {
        let base = AdjustmentRecord {
            exposure: 12.0,
            contrast: -5.0,
            ..Default::default()
        };
        let patch = AdjustmentPatch {
            contrast: Some(40.0),
            midtones_wheel: Some(Wheel {
                hue: 15.0,
                ..Default::default()
            }),
            ..Default::default()
        };
        let patched = patch.apply_to(&base);
        assert_eq!(patched.exposure, 12.0);
        assert_eq!(patched.contrast, 40.0);
        assert_eq!(patched.midtones_wheel.hue, 15.0);
    }

    #[test]
    fn patch_deserializes_sparsely() {
        let patch: AdjustmentPatch =
            serde_json::from_str(r#"{"temperature": -20.0}"#).unwrap();
        assert_eq!(patch.temperature, Some(-20.0));
        assert_eq!(patch.exposure, None);
    }
}
