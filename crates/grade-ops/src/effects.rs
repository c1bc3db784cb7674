//! Film grain and vignette (pipeline steps 11-12).
//!
//! Grain uses hash-based per-pixel noise rather than a stateful RNG: the
//! perturbation is deterministic for a given position and seed, which
//! keeps row-parallel output stable, and its magnitude is bounded by the
//! documented `amount * 0.05 / 2` envelope.

/// Deterministic per-pixel noise in [-1, 1].
#[inline]
pub fn pixel_noise(x: u32, y: u32, seed: u32) -> f32 {
    let mut h = x
        .wrapping_mul(374_761_393)
        .wrapping_add(y.wrapping_mul(668_265_263))
        .wrapping_add(seed.wrapping_mul(2_246_822_519));
    h = (h ^ (h >> 13)).wrapping_mul(1_274_126_177);
    h ^= h >> 16;
    (h as f32 / u32::MAX as f32) * 2.0 - 1.0
}

/// Grain offset for one pixel, in 255-space units.
///
/// Uniform noise in the range `+-amount * 0.05 / 2`, applied to all
/// channels independently by the pipeline (each channel passes a distinct
/// seed).
#[inline]
pub fn grain_offset(amount: f32, x: u32, y: u32, seed: u32) -> f32 {
    pixel_noise(x, y, seed) * amount * 0.05 / 2.0
}

/// Vignette multiplier for one pixel.
///
/// `1 - strength/100 * (d / d_max)^2` where `d` is the Euclidean distance
/// from the image center and `d_max` the center-to-corner distance.
#[inline]
pub fn vignette_factor(strength: f32, x: u32, y: u32, width: u32, height: u32) -> f32 {
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    let dx = x as f32 + 0.5 - cx;
    let dy = y as f32 + 0.5 - cy;
    let max_sq = cx * cx + cy * cy;
    if max_sq <= 0.0 {
        return 1.0;
    }
    1.0 - strength / 100.0 * ((dx * dx + dy * dy) / max_sq)
}
