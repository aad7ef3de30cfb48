//! Binary morphology over edge masks.
//!
//! Closing (dilation followed by erosion) merges nearby edge fragments —
//! dashed or frayed separator lines — into continuous runs. The square
//! structuring element is applied separably (rows, then columns), so each
//! operation is two passes over the mask with a bounded kernel radius.

use super::map::EdgeMap;

/// Morphological closing with a `kernel × kernel` square element.
///
/// `kernel` must be odd; validated parameters guarantee 3–9.
pub fn close(map: &EdgeMap, kernel: usize) -> EdgeMap {
    debug_assert!(kernel % 2 == 1, "structuring element must be odd");
    let radius = kernel / 2;
    erode(&dilate(map, radius), radius)
}

fn erode(map: &EdgeMap, radius: usize) -> EdgeMap {
    // Erosion of the foreground is dilation of the background.
    let mut inverted = map.clone();
    for v in &mut inverted.data {
        *v ^= 1;
    }
    let mut out = dilate(&inverted, radius);
    for v in &mut out.data {
        *v ^= 1;
    }
    out
}

/// Horizontal then vertical window-OR with clamped borders.
fn dilate(map: &EdgeMap, radius: usize) -> EdgeMap {
    let w = map.w;
    let h = map.h;
    if w == 0 || h == 0 || radius == 0 {
        return map.clone();
    }

    let mut horiz = EdgeMap::new(w, h);
    for y in 0..h {
        let src = map.row(y);
        let dst = &mut horiz.data[y * w..(y + 1) * w];
        for (x, dst_px) in dst.iter_mut().enumerate() {
            let lo = x.saturating_sub(radius);
            let hi = (x + radius).min(w - 1);
            *dst_px = src[lo..=hi].iter().any(|&v| v != 0) as u8;
        }
    }

    let mut out = EdgeMap::new(w, h);
    for y in 0..h {
        let lo = y.saturating_sub(radius);
        let hi = (y + radius).min(h - 1);
        let dst = &mut out.data[y * w..(y + 1) * w];
        for (x, dst_px) in dst.iter_mut().enumerate() {
            *dst_px = (lo..=hi).any(|yy| horiz.data[yy * w + x] != 0) as u8;
        }
    }
    out
}
