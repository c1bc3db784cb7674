//! The adjustment record and its parameter ranges.

use crate::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};

/// Current record layout version, stored with every serialized record.
pub const ADJUSTMENT_VERSION: u32 = 1;

/// Range for the bipolar sliders (exposure, contrast, ...).
const BIPOLAR: (f32, f32) = (-100.0, 100.0);
/// Range for the unipolar amounts (film grain, vignette, ...).
const UNIPOLAR: (f32, f32) = (0.0, 100.0);
/// Range for hue angles, in degrees.
const HUE: (f32, f32) = (-180.0, 180.0);
/// Range for wheel luminance offsets.
const WHEEL_LUM: (f32, f32) = (-50.0, 50.0);

/// A hue/saturation/luminance wheel scoped to one luminance zone.
///
/// Ranges: hue in [-180, 180] degrees, saturation in [0, 100],
/// luminance in [-50, 50]. All-zero is neutral.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Wheel {
    /// Hue rotation in degrees.
    pub hue: f32,
    /// Saturation boost amount.
    pub saturation: f32,
    /// Luminance offset.
    pub luminance: f32,
}

impl Wheel {
    /// True when the wheel has no effect.
    #[inline]
    pub fn is_neutral(&self) -> bool {
        self.hue == 0.0 && self.saturation == 0.0 && self.luminance == 0.0
    }

    fn validate(&self, names: [&'static str; 3]) -> ModelResult<()> {
        check(names[0], self.hue, HUE)?;
        check(names[1], self.saturation, UNIPOLAR)?;
        check(names[2], self.luminance, WHEEL_LUM)?;
        Ok(())
    }

    fn clamped(self) -> Self {
        Self {
            hue: self.hue.clamp(HUE.0, HUE.1),
            saturation: self.saturation.clamp(UNIPOLAR.0, UNIPOLAR.1),
            luminance: self.luminance.clamp(WHEEL_LUM.0, WHEEL_LUM.1),
        }
    }
}

/// The full set of tunable color grading parameters.
///
/// Every scalar slider lives in [-100, 100] (bipolar) or [0, 100]
/// (unipolar amounts), except `hue` which is an angle in [-180, 180].
/// Defaults are all-neutral: `apply(buffer, default)` is the identity
/// transform.
///
/// The record is immutable by convention: change a field by building a new
/// record with struct update syntax, never by mutating a shared one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustmentRecord {
    /// Record layout version.
    pub version: u32,

    // Primary
    /// Exposure; multiplies each channel by `1 + exposure/50`.
    pub exposure: f32,
    /// Contrast around mid-gray; factor `(contrast + 100) / 100`.
    pub contrast: f32,
    /// Highlight recovery (reserved; not applied by the fixed pipeline).
    pub highlights: f32,
    /// Shadow recovery (reserved; not applied by the fixed pipeline).
    pub shadows: f32,
    /// Saturation blend toward luminance-weighted gray.
    pub saturation: f32,
    /// Warm/cool bias; positive boosts red and damps blue.
    pub temperature: f32,
    /// Additive brightness offset.
    pub brightness: f32,
    /// Selective saturation boost for muted pixels.
    pub vibrance: f32,
    /// Local contrast around mid-gray.
    pub clarity: f32,
    /// Global hue rotation in degrees.
    pub hue: f32,

    // Professional (lift/gamma/gain/offset)
    /// Shadow-weighted additive lift.
    pub lift: f32,
    /// Midtone power curve; exponent `1 / (1 + gamma/100)`.
    pub gamma: f32,
    /// Highlight-weighted multiplicative gain.
    pub gain: f32,
    /// Flat additive offset.
    pub offset: f32,

    // Luminance-zone wheels
    /// Wheel for pixels with normalized luminance below 0.33.
    pub shadows_wheel: Wheel,
    /// Wheel for pixels in [0.33, 0.66).
    pub midtones_wheel: Wheel,
    /// Wheel for pixels at or above 0.66.
    pub highlights_wheel: Wheel,

    // Film emulation
    /// Film grain amount.
    pub film_grain: f32,
    /// Vignette strength.
    pub vignette: f32,
    /// Bleach bypass amount (reserved; not applied by the fixed pipeline).
    pub bleach_bypass: f32,
    /// Orange/teal split amount (reserved; not applied by the fixed pipeline).
    pub orange_teal: f32,

    // Fine detail
    /// Highlight roll-off (reserved).
    pub highlight_rolloff: f32,
    /// Shadow roll-off (reserved).
    pub shadow_rolloff: f32,
    /// Warm/cool color balance (reserved).
    pub color_balance: f32,
    /// Skin tone protection amount (reserved).
    pub skin_tone_protect: f32,
    /// Luminance noise smoothing (reserved).
    pub luminance_smoothing: f32,
    /// Color noise smoothing (reserved).
    pub color_smoothing: f32,
}

impl Default for AdjustmentRecord {
    fn default() -> Self {
        Self {
            version: ADJUSTMENT_VERSION,
            exposure: 0.0,
            contrast: 0.0,
            highlights: 0.0,
            shadows: 0.0,
            saturation: 0.0,
            temperature: 0.0,
            brightness: 0.0,
            vibrance: 0.0,
            clarity: 0.0,
            hue: 0.0,
            lift: 0.0,
            gamma: 0.0,
            gain: 0.0,
            offset: 0.0,
            shadows_wheel: Wheel::default(),
            midtones_wheel: Wheel::default(),
            highlights_wheel: Wheel::default(),
            film_grain: 0.0,
            vignette: 0.0,
            bleach_bypass: 0.0,
            orange_teal: 0.0,
            highlight_rolloff: 0.0,
            shadow_rolloff: 0.0,
            color_balance: 0.0,
            skin_tone_protect: 0.0,
            luminance_smoothing: 0.0,
            color_smoothing: 0.0,
        }
    }
}

impl AdjustmentRecord {
    /// True when every parameter is at its neutral default.
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    /// True when lift/gamma/gain/offset are all neutral.
    #[inline]
    pub fn grade_is_neutral(&self) -> bool {
        self.lift == 0.0 && self.gamma == 0.0 && self.gain == 0.0 && self.offset == 0.0
    }

    /// True when all three zone wheels are neutral.
    #[inline]
    pub fn wheels_are_neutral(&self) -> bool {
        self.shadows_wheel.is_neutral()
            && self.midtones_wheel.is_neutral()
            && self.highlights_wheel.is_neutral()
    }

    /// Checks every parameter against its documented range.
    ///
    /// Returns the first violation found. The pipeline does not call this;
    /// it is for the submission layer above.
    pub fn validate(&self) -> ModelResult<()> {
        for (name, value) in self.bipolar_fields() {
            check(name, value, BIPOLAR)?;
        }
        for (name, value) in self.unipolar_fields() {
            check(name, value, UNIPOLAR)?;
        }
        check("hue", self.hue, HUE)?;
        self.shadows_wheel.validate([
            "shadows_wheel.hue",
            "shadows_wheel.saturation",
            "shadows_wheel.luminance",
        ])?;
        self.midtones_wheel.validate([
            "midtones_wheel.hue",
            "midtones_wheel.saturation",
            "midtones_wheel.luminance",
        ])?;
        self.highlights_wheel.validate([
            "highlights_wheel.hue",
            "highlights_wheel.saturation",
            "highlights_wheel.luminance",
        ])?;
        Ok(())
    }

    /// Returns a copy with every parameter clamped into range.
    pub fn clamped(&self) -> Self {
        let mut rec = *self;
        rec.exposure = rec.exposure.clamp(BIPOLAR.0, BIPOLAR.1);
        rec.contrast = rec.contrast.clamp(BIPOLAR.0, BIPOLAR.1);
        rec.highlights = rec.highlights.clamp(BIPOLAR.0, BIPOLAR.1);
        rec.shadows = rec.shadows.clamp(BIPOLAR.0, BIPOLAR.1);
        rec.saturation = rec.saturation.clamp(BIPOLAR.0, BIPOLAR.1);
        rec.temperature = rec.temperature.clamp(BIPOLAR.0, BIPOLAR.1);
        rec.brightness = rec.brightness.clamp(BIPOLAR.0, BIPOLAR.1);
        rec.vibrance = rec.vibrance.clamp(BIPOLAR.0, BIPOLAR.1);
        rec.clarity = rec.clarity.clamp(BIPOLAR.0, BIPOLAR.1);
        rec.hue = rec.hue.clamp(HUE.0, HUE.1);
        rec.lift = rec.lift.clamp(BIPOLAR.0, BIPOLAR.1);
        rec.gamma = rec.gamma.clamp(BIPOLAR.0, BIPOLAR.1);
        rec.gain = rec.gain.clamp(BIPOLAR.0, BIPOLAR.1);
        rec.offset = rec.offset.clamp(BIPOLAR.0, BIPOLAR.1);
        rec.shadows_wheel = rec.shadows_wheel.clamped();
        rec.midtones_wheel = rec.midtones_wheel.clamped();
        rec.highlights_wheel = rec.highlights_wheel.clamped();
        rec.film_grain = rec.film_grain.clamp(UNIPOLAR.0, UNIPOLAR.1);
        rec.vignette = rec.vignette.clamp(UNIPOLAR.0, UNIPOLAR.1);
        rec.bleach_bypass = rec.bleach_bypass.clamp(UNIPOLAR.0, UNIPOLAR.1);
        rec.orange_teal = rec.orange_teal.clamp(UNIPOLAR.0, UNIPOLAR.1);
        rec.highlight_rolloff = rec.highlight_rolloff.clamp(UNIPOLAR.0, UNIPOLAR.1);
        rec.shadow_rolloff = rec.shadow_rolloff.clamp(UNIPOLAR.0, UNIPOLAR.1);
        rec.color_balance = rec.color_balance.clamp(BIPOLAR.0, BIPOLAR.1);
        rec.skin_tone_protect = rec.skin_tone_protect.clamp(UNIPOLAR.0, UNIPOLAR.1);
        rec.luminance_smoothing = rec.luminance_smoothing.clamp(UNIPOLAR.0, UNIPOLAR.1);
        rec.color_smoothing = rec.color_smoothing.clamp(UNIPOLAR.0, UNIPOLAR.1);
        rec
    }

    fn bipolar_fields(&self) -> [(&'static str, f32); 14] {
        [
            ("exposure", self.exposure),
            ("contrast", self.contrast),
            ("highlights", self.highlights),
            ("shadows", self.shadows),
            ("saturation", self.saturation),
            ("temperature", self.temperature),
            ("brightness", self.brightness),
            ("vibrance", self.vibrance),
            ("clarity", self.clarity),
            ("lift", self.lift),
            ("gamma", self.gamma),
            ("gain", self.gain),
            ("offset", self.offset),
            ("color_balance", self.color_balance),
        ]
    }

    fn unipolar_fields(&self) -> [(&'static str, f32); 8] {
        [
            ("film_grain", self.film_grain),
            ("vignette", self.vignette),
            ("bleach_bypass", self.bleach_bypass),
            ("orange_teal", self.orange_teal),
            ("highlight_rolloff", self.highlight_rolloff),
            ("shadow_rolloff", self.shadow_rolloff),
            ("skin_tone_protect", self.skin_tone_protect),
            ("luminance_smoothing", self.luminance_smoothing),
        ]
    }
}

fn check(name: &'static str, value: f32, range: (f32, f32)) -> ModelResult<()> {
    if value.is_nan() || value < range.0 || value > range.1 {
        return Err(ModelError::OutOfRange {
            name,
            value,
            min: range.0,
            max: range.1,
        });
    }
    Ok(())
}
