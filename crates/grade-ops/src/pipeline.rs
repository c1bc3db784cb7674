//! The fixed-order transform pipeline.
//!
//! Rows of the output buffer are partitioned across the rayon pool (one
//! output allocation, workers write disjoint row ranges). Cancellation is
//! cooperative and coarse: the token is checked once per row, and a
//! cancelled run yields `None` so partial results are never delivered.

use crate::{basic, effects, grade, zones};
use grade_core::PixelBuffer;
use grade_model::AdjustmentRecord;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::trace;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Channel seeds for grain noise, one per RGB channel.
const GRAIN_SEEDS: [u32; 3] = [0x9E37_79B9, 0x85EB_CA6B, 0xC2B2_AE35];

/// Applies the full adjustment chain to a single RGB triple.
///
/// `(x, y)` locate the pixel for the grain and vignette terms; `width` and
/// `height` are the full image dimensions. Input is 255-space; the result
/// is clamped to [0, 255] (step 13).
#[inline]
pub fn apply_rgb(
    rec: &AdjustmentRecord,
    rgb: [f32; 3],
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> [f32; 3] {
    let rgb = basic::apply_tonal(rec, rgb);
    let rgb = basic::apply_color(rec, rgb);
    let rgb = grade::apply_grade(rec, rgb);
    let mut rgb = zones::apply_wheels(rec, rgb);

    // 11. Film grain
    if rec.film_grain > 0.0 {
        for (c, v) in rgb.iter_mut().enumerate() {
            *v += effects::grain_offset(rec.film_grain, x, y, GRAIN_SEEDS[c]);
        }
    }

    // 12. Vignette
    if rec.vignette > 0.0 {
        let factor = effects::vignette_factor(rec.vignette, x, y, width, height);
        for v in &mut rgb {
            *v *= factor;
        }
    }

    // 13. Clamp
    [
        rgb[0].clamp(0.0, 255.0),
        rgb[1].clamp(0.0, 255.0),
        rgb[2].clamp(0.0, 255.0),
    ]
}

/// Applies `rec` to `src`, returning a new buffer.
///
/// The source is only borrowed; "original" and "processed" buffers can
/// coexist for comparison views. Alpha passes through untouched.
pub fn apply(src: &PixelBuffer, rec: &AdjustmentRecord) -> PixelBuffer {
    // Token never fires, so the run always completes.
    let token = AtomicBool::new(false);
    apply_cancellable(src, rec, &token).unwrap_or_else(|| src.clone())
}

/// Applies `rec` to `src` under a cancellation token.
///
/// Returns `None` if `cancel` was raised before the run finished; the
/// partially written output is discarded. Raising the token after
/// completion has no effect on the returned buffer.
pub fn apply_cancellable(
    src: &PixelBuffer,
    rec: &AdjustmentRecord,
    cancel: &AtomicBool,
) -> Option<PixelBuffer> {
    if cancel.load(Ordering::Relaxed) {
        return None;
    }
    if src.data().is_empty() || rec.is_identity() {
        trace!(
            width = src.width(),
            height = src.height(),
            "identity or empty transform, returning copy"
        );
        return Some(src.clone());
    }

    let width = src.width();
    let height = src.height();
    let channels = src.channels() as usize;
    let stride = src.stride();
    let mut out = vec![0u8; src.data().len()];

    let process_row = |y: usize, row: &mut [u8]| {
        if cancel.load(Ordering::Relaxed) {
            return;
        }
        let src_row = src.row(y as u32);
        for x in 0..width as usize {
            let i = x * channels;
            let rgb = [
                src_row[i] as f32,
                src_row[i + 1] as f32,
                src_row[i + 2] as f32,
            ];
            let rgb = apply_rgb(rec, rgb, x as u32, y as u32, width, height);
            row[i] = rgb[0].round() as u8;
            row[i + 1] = rgb[1].round() as u8;
            row[i + 2] = rgb[2].round() as u8;
            if channels == 4 {
                row[i + 3] = src_row[i + 3];
            }
        }
    };

    #[cfg(feature = "parallel")]
    out.par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row)| process_row(y, row));

    #[cfg(not(feature = "parallel"))]
    out.chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row)| process_row(y, row));

    if cancel.load(Ordering::Relaxed) {
        trace!(width, height, "transform cancelled, discarding output");
        return None;
    }

    // Dimensions come from the source buffer, so this cannot fail.
    PixelBuffer::from_data(out, width, height, src.channels()).ok()
}
