//! First- and second-derivative responses with border clamping.
//!
//! - Sobel 3×3 kernel pair producing per-pixel `gx`, `gy` and
//!   `mag = sqrt(gx^2 + gy^2)`.
//! - 4-neighbour Laplacian magnitude for second-derivative edges.
//!
//! Complexity: O(W·H) per pass.
use crate::image::{ImageF32, ImageView, ImageViewMut};

type Kernel3 = [[f32; 3]; 3];

const SOBEL_KERNEL_X: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_KERNEL_Y: Kernel3 = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Per-pixel first-derivative buffers.
#[derive(Clone, Debug)]
pub struct Grad {
    /// Horizontal derivative (convolution with kernel X)
    pub gx: ImageF32,
    /// Vertical derivative (convolution with kernel Y)
    pub gy: ImageF32,
    /// Euclidean magnitude per pixel: `sqrt(gx^2 + gy^2)`
    pub mag: ImageF32,
}

/// Compute Sobel gradients on a single-channel float image.
pub fn sobel_gradients(l: &ImageF32) -> Grad {
    let w = l.w;
    let h = l.h;
    let mut gx = ImageF32::new(w, h);
    let mut gy = ImageF32::new(w, h);
    let mut mag = ImageF32::new(w, h);

    if w == 0 || h == 0 {
        return Grad { gx, gy, mag };
    }

    for y in 0..h {
        let y_idx = [y.saturating_sub(1), y, (y + 1).min(h - 1)];
        let rows = [l.row(y_idx[0]), l.row(y_idx[1]), l.row(y_idx[2])];
        let out_gx = gx.row_mut(y);
        for x in 0..w {
            let x_idx = [x.saturating_sub(1), x, (x + 1).min(w - 1)];
            let mut sum_x = 0.0;
            for (ky, src_row) in rows.iter().enumerate() {
                let kx_row = &SOBEL_KERNEL_X[ky];
                sum_x += src_row[x_idx[0]] * kx_row[0]
                    + src_row[x_idx[1]] * kx_row[1]
                    + src_row[x_idx[2]] * kx_row[2];
            }
            out_gx[x] = sum_x;
        }
        let out_gy = gy.row_mut(y);
        for x in 0..w {
            let x_idx = [x.saturating_sub(1), x, (x + 1).min(w - 1)];
            let mut sum_y = 0.0;
            for (ky, src_row) in rows.iter().enumerate() {
                let ky_row = &SOBEL_KERNEL_Y[ky];
                sum_y += src_row[x_idx[0]] * ky_row[0]
                    + src_row[x_idx[1]] * ky_row[1]
                    + src_row[x_idx[2]] * ky_row[2];
            }
            out_gy[x] = sum_y;
        }
        let gx_row = gx.row(y);
        let gy_row = gy.row(y);
        let mut mag_row = vec![0.0f32; w];
        for x in 0..w {
            mag_row[x] = (gx_row[x] * gx_row[x] + gy_row[x] * gy_row[x]).sqrt();
        }
        mag.row_mut(y).copy_from_slice(&mag_row);
    }

    Grad { gx, gy, mag }
}

/// Absolute response of the 4-neighbour Laplacian.
pub fn laplacian_response(l: &ImageF32) -> ImageF32 {
    let w = l.w;
    let h = l.h;
    let mut out = ImageF32::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }
    for y in 0..h {
        let up = l.row(y.saturating_sub(1));
        let row = l.row(y);
        let down = l.row((y + 1).min(h - 1));
        let dst = out.row_mut(y);
        for (x, dst_px) in dst.iter_mut().enumerate() {
            let left = row[x.saturating_sub(1)];
            let right = row[(x + 1).min(w - 1)];
            *dst_px = (up[x] + down[x] + left + right - 4.0 * row[x]).abs();
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Vertical step edge at x = half width.
    fn step_image(w: usize, h: usize) -> ImageF32 {
        let mut img = ImageF32::new(w, h);
        for y in 0..h {
            let row = img.row_mut(y);
            for (x, px) in row.iter_mut().enumerate() {
                *px = if x < w / 2 { 0.0 } else { 200.0 };
            }
        }
        img
    }

    #[test]
    fn sobel_peaks_on_step_edge() {
        let img = step_image(16, 8);
        let grad = sobel_gradients(&img);
        let edge_x = 16 / 2;
        let mag_edge = grad.mag.get(edge_x, 4);
        let mag_flat = grad.mag.get(2, 4);
        assert!(mag_edge > 100.0, "edge magnitude {mag_edge}");
        assert_eq!(mag_flat, 0.0);
        // Horizontal step has no vertical gradient in the interior.
        assert!(grad.gy.get(edge_x, 4).abs() < 1e-3);
    }

    #[test]
    fn laplacian_zero_on_flat_regions() {
        let img = step_image(16, 8);
        let lap = laplacian_response(&img);
        assert_eq!(lap.get(2, 4), 0.0);
        assert!(lap.get(7, 4) > 0.0);
    }

    #[test]
    fn empty_image_yields_empty_buffers() {
        let grad = sobel_gradients(&ImageF32::new(0, 0));
        assert!(grad.mag.data.is_empty());
    }
}
