//! Hysteresis-threshold edge operator with direction-aligned suppression.
//!
//! A Canny-style two-stage classifier:
//!
//! 1. Non-maximum suppression on the gradient magnitude, comparing each pixel
//!    against its two neighbours along the quantized gradient direction
//!    (4 bins: 0°, 45°, 90°, 135°).
//! 2. Hysteresis: pixels at or above `high` seed the edge set and recruit
//!    8-connected neighbours that clear `low`.
//!
//! Border handling ignores the outermost 1-pixel frame in NMS to avoid
//! out-of-bounds checks in neighbour lookup. Both stages are linear in the
//! pixel count; the flood fill visits each pixel at most once.

use super::grad::Grad;
use super::map::EdgeMap;
use crate::image::ImageView;

const TAN_22_5_DEG: f32 = 0.41421356237;

/// Classify edges from precomputed gradients using hysteresis thresholds.
pub fn hysteresis_edges(grad: &Grad, low: f32, high: f32) -> EdgeMap {
    let w = grad.mag.w;
    let h = grad.mag.h;
    if w < 3 || h < 3 {
        // Too small for neighbour comparisons; a plain threshold is the best
        // available answer.
        return EdgeMap::from_threshold(&grad.mag, high);
    }

    // Stage 1: direction-aligned NMS, keeping candidate strength classes.
    const NONE: u8 = 0;
    const WEAK: u8 = 1;
    const STRONG: u8 = 2;
    let mut class = vec![NONE; w * h];
    for y in 1..h - 1 {
        let mag_prev = grad.mag.row(y - 1);
        let mag_row = grad.mag.row(y);
        let mag_next = grad.mag.row(y + 1);
        let gx_row = grad.gx.row(y);
        let gy_row = grad.gy.row(y);

        for x in 1..w - 1 {
            let mag = mag_row[x];
            if mag < low {
                continue;
            }

            let gx = gx_row[x];
            let gy = gy_row[x];
            let abs_gx = gx.abs();
            let abs_gy = gy.abs();
            let same_sign = (gx >= 0.0 && gy >= 0.0) || (gx <= 0.0 && gy <= 0.0);

            let (neighbor1, neighbor2) = if abs_gx >= abs_gy {
                if abs_gy <= abs_gx * TAN_22_5_DEG {
                    (mag_row[x - 1], mag_row[x + 1])
                } else if same_sign {
                    (mag_prev[x + 1], mag_next[x - 1])
                } else {
                    (mag_prev[x - 1], mag_next[x + 1])
                }
            } else if abs_gx <= abs_gy * TAN_22_5_DEG {
                (mag_prev[x], mag_next[x])
            } else if same_sign {
                (mag_prev[x + 1], mag_next[x - 1])
            } else {
                (mag_prev[x - 1], mag_next[x + 1])
            };

            if mag < neighbor1 || mag < neighbor2 {
                continue;
            }

            class[y * w + x] = if mag >= high { STRONG } else { WEAK };
        }
    }

    // Stage 2: flood from strong pixels through 8-connected weak ones.
    let mut out = EdgeMap::new(w, h);
    let mut stack: Vec<(usize, usize)> = Vec::new();
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            if class[y * w + x] == STRONG && !out.get(x, y) {
                out.set(x, y);
                stack.push((x, y));
                while let Some((cx, cy)) = stack.pop() {
                    for dy in -1i32..=1 {
                        for dx in -1i32..=1 {
                            if dx == 0 && dy == 0 {
                                continue;
                            }
                            let nx = cx as i32 + dx;
                            let ny = cy as i32 + dy;
                            if nx < 1 || ny < 1 || nx >= w as i32 - 1 || ny >= h as i32 - 1 {
                                continue;
                            }
                            let (nx, ny) = (nx as usize, ny as usize);
                            if class[ny * w + nx] != NONE && !out.get(nx, ny) {
                                out.set(nx, ny);
                                stack.push((nx, ny));
                            }
                        }
                    }
                }
            }
        }
    }
    out
}
