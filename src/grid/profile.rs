//! 1-D edge-density profiles and separator peak selection.
//!
//! The edge map is projected onto each axis as a density profile (fraction of
//! edge pixels per row or column). A moving average suppresses single-pixel
//! noise, then local maxima are accepted as separator candidates under two
//! rules:
//!
//! - prominence: density above the profile mean must reach `min_ratio` of the
//!   strongest peak's prominence;
//! - anti-crowding: accepted peaks keep a minimum spacing from each other and
//!   from the profile ends; within one spacing window the strictly denser
//!   candidate wins, an exact tie keeps the first in scan order.

use crate::edges::EdgeMap;

/// Moving-average window applied to density profiles.
const SMOOTH_WINDOW: usize = 5;

/// An accepted separator candidate on one axis.
#[derive(Clone, Copy, Debug)]
pub struct Peak {
    /// Profile coordinate (row y or column x).
    pub pos: usize,
    /// Smoothed edge density at `pos`.
    pub density: f32,
    /// Density above the profile mean.
    pub prominence: f32,
}

/// Fraction of edge pixels per row.
pub fn project_rows(map: &EdgeMap) -> Vec<f32> {
    if map.w == 0 {
        return vec![0.0; map.h];
    }
    (0..map.h)
        .map(|y| map.row(y).iter().filter(|&&v| v != 0).count() as f32 / map.w as f32)
        .collect()
}

/// Fraction of edge pixels per column.
pub fn project_cols(map: &EdgeMap) -> Vec<f32> {
    let mut counts = vec![0u32; map.w];
    for y in 0..map.h {
        for (count, &v) in counts.iter_mut().zip(map.row(y)) {
            *count += (v != 0) as u32;
        }
    }
    if map.h == 0 {
        return vec![0.0; map.w];
    }
    counts
        .into_iter()
        .map(|c| c as f32 / map.h as f32)
        .collect()
}

/// Centred moving average with clamped borders.
pub fn smooth(profile: &[f32]) -> Vec<f32> {
    let n = profile.len();
    if n == 0 {
        return Vec::new();
    }
    let radius = SMOOTH_WINDOW / 2;
    (0..n)
        .map(|i| {
            let lo = i.saturating_sub(radius);
            let hi = (i + radius).min(n - 1);
            profile[lo..=hi].iter().sum::<f32>() / (hi - lo + 1) as f32
        })
        .collect()
}

/// Select separator peaks from a smoothed profile.
///
/// `min_ratio` is the prominence acceptance fraction (derived from
/// `min_area_ratio`), `min_spacing` the anti-crowding distance in pixels.
pub fn find_separators(profile: &[f32], min_ratio: f32, min_spacing: usize) -> Vec<Peak> {
    let n = profile.len();
    if n < 3 {
        return Vec::new();
    }
    let background = profile.iter().sum::<f32>() / n as f32;

    // Local maxima as plateau runs; the candidate position is the run centre
    // so a symmetric separator band maps to its midline.
    let mut candidates: Vec<Peak> = Vec::new();
    let mut run_start = 0usize;
    for i in 1..=n {
        if i < n && profile[i] == profile[run_start] {
            continue;
        }
        let run_end = i - 1;
        let rising = run_start > 0 && profile[run_start] > profile[run_start - 1];
        let falling = i < n && profile[run_end] > profile[i];
        if rising && falling {
            let pos = (run_start + run_end) / 2;
            let prominence = profile[pos] - background;
            if prominence > 0.0 {
                candidates.push(Peak {
                    pos,
                    density: profile[pos],
                    prominence,
                });
            }
        }
        run_start = i;
    }

    if candidates.is_empty() {
        return Vec::new();
    }
    let max_prominence = candidates
        .iter()
        .map(|p| p.prominence)
        .fold(f32::MIN, f32::max);
    if max_prominence <= 0.0 {
        return Vec::new();
    }

    let spacing = min_spacing.max(1);
    let mut accepted: Vec<Peak> = Vec::new();
    for peak in candidates {
        if peak.prominence < min_ratio * max_prominence {
            continue;
        }
        // Interior lines stay clear of the extremes, which are always
        // appended by the locator.
        if peak.pos < spacing || peak.pos + spacing > n - 1 {
            continue;
        }
        match accepted.last_mut() {
            Some(last) if peak.pos - last.pos < spacing => {
                // Crowded window: strictly denser wins, a tie keeps the
                // earlier candidate.
                if peak.density > last.density {
                    *last = peak;
                }
            }
            _ => accepted.push(peak),
        }
    }
    accepted
}

/// Normalized mean prominence of accepted peaks, the per-axis confidence.
pub fn mean_normalized_prominence(peaks: &[Peak]) -> f32 {
    if peaks.is_empty() {
        return 0.0;
    }
    let max = peaks
        .iter()
        .map(|p| p.prominence)
        .fold(f32::MIN, f32::max)
        .max(f32::EPSILON);
    let mean = peaks.iter().map(|p| p.prominence).sum::<f32>() / peaks.len() as f32;
    (mean / max).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smooth_preserves_flat_profiles() {
        let smoothed = smooth(&[0.5; 9]);
        assert!(smoothed.iter().all(|&v| (v - 0.5).abs() < 1e-6));
    }

    #[test]
    fn plateau_peak_maps_to_its_centre() {
        let mut profile = vec![0.1f32; 41];
        for v in profile.iter_mut().skip(18).take(5) {
            *v = 0.9;
        }
        let peaks = find_separators(&profile, 0.5, 4);
        assert_eq!(peaks.len(), 1);
        assert_eq!(peaks[0].pos, 20);
    }

    #[test]
    fn weak_peaks_are_rejected_by_prominence() {
        let mut profile = vec![0.0f32; 60];
        profile[20] = 1.0;
        profile[40] = 0.2;
        let peaks = find_separators(&profile, 0.5, 3);
        assert_eq!(peaks.len(), 1);
        assert_eq!(peaks[0].pos, 20);
    }

    #[test]
    fn crowded_peaks_resolve_to_denser_one() {
        let mut profile = vec![0.0f32; 60];
        profile[20] = 0.8;
        profile[23] = 0.9;
        let peaks = find_separators(&profile, 0.1, 10);
        assert_eq!(peaks.len(), 1);
        assert_eq!(peaks[0].pos, 23);
    }

    #[test]
    fn crowded_exact_tie_keeps_first_in_scan_order() {
        let mut profile = vec![0.0f32; 60];
        profile[20] = 0.8;
        profile[24] = 0.8;
        let peaks = find_separators(&profile, 0.1, 10);
        assert_eq!(peaks.len(), 1);
        assert_eq!(peaks[0].pos, 20);
    }

    #[test]
    fn peaks_near_ends_are_dropped() {
        let mut profile = vec![0.0f32; 30];
        profile[1] = 1.0;
        profile[28] = 1.0;
        assert!(find_separators(&profile, 0.1, 5).is_empty());
    }

    #[test]
    fn flat_profile_yields_nothing() {
        assert!(find_separators(&[0.3; 50], 0.5, 5).is_empty());
    }

    #[test]
    fn projections_count_density() {
        let mut map = EdgeMap::new(4, 2);
        map.set(0, 0);
        map.set(1, 0);
        assert_eq!(project_rows(&map), vec![0.5, 0.0]);
        assert_eq!(project_cols(&map), vec![0.5, 0.5, 0.0, 0.0]);
    }
}
