//! Lift/Gamma/Gain/Offset (pipeline step 9).
//!
//! The classic shadows/midtones/highlights grading quartet, applied in
//! normalized [0, 1] space in that fixed order. Lift is weighted toward
//! shadows by `1 - averageLuminance`, gain toward highlights by
//! `averageLuminance`, offset is a flat shift.

use grade_model::AdjustmentRecord;

/// Smallest allowed gamma value; avoids a degenerate power curve when the
/// slider sits at its low stop.
const MIN_GAMMA: f32 = 0.1;

/// Applies lift/gamma/gain/offset in normalized space.
///
/// Skipped entirely when all four sliders are at their defaults.
/// Input and output are 255-space.
#[inline]
pub fn apply_grade(rec: &AdjustmentRecord, rgb: [f32; 3]) -> [f32; 3] {
    if rec.grade_is_neutral() {
        return rgb;
    }

    let avg_lum = ((rgb[0] + rgb[1] + rgb[2]) / 3.0 / 255.0).clamp(0.0, 1.0);
    let lift = rec.lift / 100.0;
    let gamma = (1.0 + rec.gamma / 100.0).max(MIN_GAMMA);
    let gain = 1.0 + rec.gain / 100.0 * avg_lum;
    let offset = rec.offset / 100.0;

    let mut out = [0.0f32; 3];
    for (o, v) in out.iter_mut().zip(rgb) {
        let mut n = v / 255.0;
        n += lift * (1.0 - avg_lum);
        n = n.max(0.0).powf(1.0 / gamma);
        n *= gain;
        n += offset;
        *o = n * 255.0;
    }
    out
}
