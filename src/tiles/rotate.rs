//! Rotation about the image centre with an expanded canvas.
//!
//! The output canvas grows to the rotated bounding box so corners are never
//! cropped. Each destination pixel is inverse-mapped into the source and
//! bilinearly resampled; samples falling outside the source stay fully
//! transparent.

use crate::image::ImageRgba8;
use nalgebra::{Rotation2, Vector2};

/// Rotate counter-clockwise by `angle_deg` about the image centre.
///
/// Angles are normalized modulo 360; a zero angle returns a plain copy.
pub fn rotate_about_center(src: &ImageRgba8, angle_deg: f32) -> ImageRgba8 {
    let angle = angle_deg.rem_euclid(360.0);
    if angle == 0.0 || src.w == 0 || src.h == 0 {
        return src.clone();
    }

    let theta = angle.to_radians();
    let (sin, cos) = theta.sin_cos();
    let (w, h) = (src.w as f32, src.h as f32);

    // Expanded canvas holding the rotated bounding box. The small bias
    // absorbs floating-point noise at the axis-aligned angles so a 90°
    // rotation swaps dimensions exactly.
    let out_w = (w * cos.abs() + h * sin.abs() - 1e-3).ceil() as usize;
    let out_h = (w * sin.abs() + h * cos.abs() - 1e-3).ceil() as usize;

    let src_center = Vector2::new(w * 0.5, h * 0.5);
    let dst_center = Vector2::new(out_w as f32 * 0.5, out_h as f32 * 0.5);
    let inverse = Rotation2::new(-theta);

    let mut out = ImageRgba8::new(out_w, out_h);
    for y in 0..out_h {
        let row = out.row_mut(y);
        for (x, dst_px) in row.iter_mut().enumerate() {
            let dst = Vector2::new(x as f32 + 0.5, y as f32 + 0.5);
            let sample = inverse * (dst - dst_center) + src_center;
            *dst_px = bilinear(src, sample.x - 0.5, sample.y - 0.5);
        }
    }
    out
}

/// Bilinear sample at fractional coordinates; outside pixels contribute
/// transparent black.
fn bilinear(src: &ImageRgba8, x: f32, y: f32) -> [u8; 4] {
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;

    let mut acc = [0.0f32; 4];
    for (dy, wy) in [(0.0, 1.0 - fy), (1.0, fy)] {
        for (dx, wx) in [(0.0, 1.0 - fx), (1.0, fx)] {
            let weight = wx * wy;
            if weight == 0.0 {
                continue;
            }
            let sx = x0 + dx;
            let sy = y0 + dy;
            if sx < 0.0 || sy < 0.0 || sx >= src.w as f32 || sy >= src.h as f32 {
                continue;
            }
            let px = src.get(sx as usize, sy as usize);
            for (a, &c) in acc.iter_mut().zip(px.iter()) {
                *a += weight * c as f32;
            }
        }
    }
    [
        acc[0].round().clamp(0.0, 255.0) as u8,
        acc[1].round().clamp(0.0, 255.0) as u8,
        acc[2].round().clamp(0.0, 255.0) as u8,
        acc[3].round().clamp(0.0, 255.0) as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(w: usize, h: usize, px: [u8; 4]) -> ImageRgba8 {
        let mut img = ImageRgba8::new(w, h);
        img.data.fill(px);
        img
    }

    #[test]
    fn zero_angle_is_identity() {
        let img = filled(10, 6, [1, 2, 3, 255]);
        assert_eq!(rotate_about_center(&img, 0.0), img);
        assert_eq!(rotate_about_center(&img, 360.0), img);
    }

    #[test]
    fn ninety_degrees_swaps_dimensions() {
        let img = filled(10, 6, [9, 9, 9, 255]);
        let rotated = rotate_about_center(&img, 90.0);
        assert_eq!((rotated.w, rotated.h), (6, 10));
    }

    #[test]
    fn forty_five_degrees_expands_canvas() {
        let img = filled(10, 10, [9, 9, 9, 255]);
        let rotated = rotate_about_center(&img, 45.0);
        assert!(rotated.w >= 14 && rotated.h >= 14);
        // Corners of the expanded canvas are uncovered, hence transparent.
        assert_eq!(rotated.get(0, 0)[3], 0);
        // The centre keeps the source colour.
        let c = rotated.get(rotated.w / 2, rotated.h / 2);
        assert_eq!(c, [9, 9, 9, 255]);
    }
}
