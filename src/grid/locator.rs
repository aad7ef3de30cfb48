//! Reduce an edge map to ordered separator coordinates.

use super::profile::{
    find_separators, mean_normalized_prominence, project_cols, project_rows, smooth,
};
use super::spec::{suggest_grid, GridSpec};
use crate::edges::EdgeMap;
use crate::params::{DetectionParams, MAX_DIVISIONS};
use crate::types::DetectionResult;
use log::debug;

/// Locate row and column separator lines.
///
/// Manual grids are deterministic by construction and report confidence 1.0.
/// Auto mode degrades softly: an axis without a confident separator falls
/// back to uniform division with the configured fallback count, and a fully
/// failed detection reports confidence 0 with the grid shape the sheet
/// aspect ratio suggests, rather than an error.
pub fn locate(map: &EdgeMap, spec: &GridSpec, params: &DetectionParams) -> DetectionResult {
    match spec {
        GridSpec::Manual { rows, cols } => DetectionResult {
            row_lines: uniform_lines(map.h, *rows),
            col_lines: uniform_lines(map.w, *cols),
            confidence: 1.0,
        },
        GridSpec::Auto => locate_auto(map, params),
    }
}

/// Uniform fractions `i * dim / n`, extremes included.
///
/// `n` is clamped to `dim` so the sequence stays strictly increasing even
/// when the requested division count exceeds the available pixels.
pub fn uniform_lines(dim: usize, n: u32) -> Vec<u32> {
    let n = (n.max(1) as usize).min(dim.max(1));
    (0..=n).map(|i| (i * dim / n) as u32).collect()
}

fn locate_auto(map: &EdgeMap, params: &DetectionParams) -> DetectionResult {
    let row_peaks = axis_peaks(&project_rows(map), map.h, params);
    let col_peaks = axis_peaks(&project_cols(map), map.w, params);

    debug!(
        "auto locate: {} row / {} col separators",
        row_peaks.len(),
        col_peaks.len()
    );

    if row_peaks.is_empty() && col_peaks.is_empty() {
        // Nothing convincing on either axis; use the grid shape the sheet
        // geometry suggests.
        let (rows, cols) = match suggest_grid(map.w, map.h) {
            GridSpec::Manual { rows, cols } => (rows, cols),
            GridSpec::Auto => (params.fallback_rows, params.fallback_cols),
        };
        return DetectionResult {
            row_lines: uniform_lines(map.h, rows),
            col_lines: uniform_lines(map.w, cols),
            confidence: 0.0,
        };
    }

    let confidence = match (row_peaks.is_empty(), col_peaks.is_empty()) {
        (true, true) => 0.0,
        (false, true) => mean_normalized_prominence(&row_peaks),
        (true, false) => mean_normalized_prominence(&col_peaks),
        (false, false) => {
            0.5 * (mean_normalized_prominence(&row_peaks) + mean_normalized_prominence(&col_peaks))
        }
    };

    let row_lines = if row_peaks.is_empty() {
        uniform_lines(map.h, params.fallback_rows)
    } else {
        bracket(map.h, row_peaks.iter().map(|p| p.pos as u32))
    };
    let col_lines = if col_peaks.is_empty() {
        uniform_lines(map.w, params.fallback_cols)
    } else {
        bracket(map.w, col_peaks.iter().map(|p| p.pos as u32))
    };

    DetectionResult {
        row_lines,
        col_lines,
        confidence,
    }
}

fn axis_peaks(
    profile: &[f32],
    dim: usize,
    params: &DetectionParams,
) -> Vec<super::profile::Peak> {
    let min_spacing = (dim / MAX_DIVISIONS as usize).max(2);
    find_separators(&smooth(profile), params.min_area_ratio, min_spacing)
}

/// Append the two image extremes around interior lines.
fn bracket(dim: usize, interior: impl Iterator<Item = u32>) -> Vec<u32> {
    let mut lines = Vec::with_capacity(4);
    lines.push(0);
    lines.extend(interior);
    lines.push(dim as u32);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_lines_are_strictly_increasing() {
        let lines = uniform_lines(300, 3);
        assert_eq!(lines, vec![0, 100, 200, 300]);
    }

    #[test]
    fn uniform_lines_stay_increasing_when_divisions_exceed_pixels() {
        let lines = uniform_lines(10, 18);
        assert_eq!(lines, (0..=10).collect::<Vec<u32>>());
        assert!(lines.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn manual_spec_is_deterministic_with_full_confidence() {
        let map = EdgeMap::new(200, 100);
        let spec = GridSpec::Manual { rows: 2, cols: 4 };
        let result = locate(&map, &spec, &DetectionParams::default());
        assert_eq!(result.row_lines, vec![0, 50, 100]);
        assert_eq!(result.col_lines, vec![0, 50, 100, 150, 200]);
        assert_eq!(result.confidence, 1.0);
        assert_eq!(result.tile_count(), 8);
    }

    #[test]
    fn empty_map_falls_back_to_uniform_grid() {
        let map = EdgeMap::new(120, 120);
        let result = locate(&map, &GridSpec::Auto, &DetectionParams::default());
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.row_lines, vec![0, 60, 120]);
        assert_eq!(result.col_lines, vec![0, 60, 120]);
    }

    #[test]
    fn full_fallback_follows_the_aspect_suggestion() {
        // Large square sheets suggest a 3x3 collage.
        let map = EdgeMap::new(600, 600);
        let result = locate(&map, &GridSpec::Auto, &DetectionParams::default());
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.row_lines, vec![0, 200, 400, 600]);
        assert_eq!(result.col_lines, vec![0, 200, 400, 600]);
    }

    #[test]
    fn solid_cross_is_located_at_midlines() {
        // Edge band of 4 px at both midlines of a 120×120 map.
        let mut map = EdgeMap::new(120, 120);
        for c in 58..62 {
            for i in 0..120 {
                map.set(i, c);
                map.set(c, i);
            }
        }
        let result = locate(&map, &GridSpec::Auto, &DetectionParams::default());
        assert_eq!(result.row_lines.len(), 3);
        assert_eq!(result.col_lines.len(), 3);
        let row_mid = result.row_lines[1] as i64;
        let col_mid = result.col_lines[1] as i64;
        assert!((row_mid - 60).abs() <= 2, "row line at {row_mid}");
        assert!((col_mid - 60).abs() <= 2, "col line at {col_mid}");
        assert!(result.confidence > 0.8);
    }
}
