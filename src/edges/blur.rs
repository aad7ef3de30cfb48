//! Separable Gaussian pre-blur applied before multi-signal detection.

use crate::image::{ImageF32, ImageView, ImageViewMut};

/// Normalised 3-tap Gaussian `[1, 2, 1] / 4`.
const GAUSSIAN_3TAP: [f32; 3] = [0.25, 0.5, 0.25];

/// Apply the 3-tap Gaussian horizontally then vertically.
///
/// Border samples clamp to the image extents. Suppresses single-pixel noise
/// ahead of the hysteresis operator without widening separator lines.
pub fn gaussian3(src: &ImageF32) -> ImageF32 {
    let w = src.w;
    let h = src.h;
    if w == 0 || h == 0 {
        return ImageF32::new(w, h);
    }

    // Horizontal pass.
    let mut tmp = ImageF32::new(w, h);
    for y in 0..h {
        let src_row = src.row(y);
        let dst_row = tmp.row_mut(y);
        for (x, dst_px) in dst_row.iter_mut().enumerate() {
            let left = src_row[x.saturating_sub(1)];
            let right = src_row[(x + 1).min(w - 1)];
            *dst_px = GAUSSIAN_3TAP[0] * left
                + GAUSSIAN_3TAP[1] * src_row[x]
                + GAUSSIAN_3TAP[2] * right;
        }
    }

    // Vertical pass.
    let mut out = ImageF32::new(w, h);
    for y in 0..h {
        let up = tmp.row(y.saturating_sub(1));
        let mid = tmp.row(y);
        let down = tmp.row((y + 1).min(h - 1));
        let dst_row = out.row_mut(y);
        for (x, dst_px) in dst_row.iter_mut().enumerate() {
            *dst_px =
                GAUSSIAN_3TAP[0] * up[x] + GAUSSIAN_3TAP[1] * mid[x] + GAUSSIAN_3TAP[2] * down[x];
        }
    }
    out
}
