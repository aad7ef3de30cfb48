//! Result types produced by the detection pipeline.

use serde::Serialize;

/// Scalar image-quality signals used to tune detection sensitivity.
///
/// All three are pure functions of the grayscale input; a flat image scores
/// zero on every signal.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct FeatureScores {
    /// Variance of the Laplacian response; higher means sharper.
    pub blur_score: f32,
    /// Normalized row-gradient/row-variance blend in `[0, 1]`.
    pub texture_score: f32,
    /// Standard deviation of pixel intensities on the 0–255 scale.
    pub contrast_score: f32,
}

/// Located separator coordinates plus a confidence estimate.
///
/// Both sequences are strictly increasing and always bracketed by the image
/// extremes, so `(row_lines.len() - 1) * (col_lines.len() - 1)` is the number
/// of tiles the extractor will produce.
#[derive(Clone, Debug, Default, Serialize)]
pub struct DetectionResult {
    /// Horizontal separator y-coordinates, `0` and `height` included.
    pub row_lines: Vec<u32>,
    /// Vertical separator x-coordinates, `0` and `width` included.
    pub col_lines: Vec<u32>,
    /// Normalized mean prominence of the accepted interior lines in `[0, 1]`.
    /// `1.0` for manual grids, `0.0` when auto-detection fell back to a
    /// uniform grid.
    pub confidence: f32,
}

impl DetectionResult {
    pub fn rows(&self) -> usize {
        self.row_lines.len().saturating_sub(1)
    }

    pub fn cols(&self) -> usize {
        self.col_lines.len().saturating_sub(1)
    }

    pub fn tile_count(&self) -> usize {
        self.rows() * self.cols()
    }
}
