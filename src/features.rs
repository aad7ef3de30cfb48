//! Image-quality signals driving adaptive detection.
//!
//! `analyze` is a pure function of the grayscale buffer: no side effects and
//! byte-identical output for byte-identical input. The three scores feed
//! [`DetectionParams::adapt`](crate::params::DetectionParams::adapt).
//!
//! Complexity: O(W·H), three passes over the image.

use crate::image::{ImageF32, ImageView};
use crate::types::FeatureScores;

/// Clamp normalization denominators away from zero so flat images score
/// zero instead of producing NaN.
const DENOM_EPS: f32 = 1e-6;

/// Weight of the gradient component in the texture blend.
const TEXTURE_GRADIENT_WEIGHT: f32 = 0.7;
/// Weight of the variance component in the texture blend.
const TEXTURE_VARIANCE_WEIGHT: f32 = 0.3;

/// Compute blur, texture and contrast scores for a grayscale image.
pub fn analyze(gray: &ImageF32) -> FeatureScores {
    if gray.w == 0 || gray.h == 0 {
        return FeatureScores::default();
    }
    FeatureScores {
        blur_score: laplacian_variance(gray),
        texture_score: texture_score(gray),
        contrast_score: intensity_stddev(gray),
    }
}

/// Variance of the 4-neighbour Laplacian response. Sharp images have strong
/// second derivatives around content boundaries, blurred ones do not.
fn laplacian_variance(gray: &ImageF32) -> f32 {
    let w = gray.w;
    let h = gray.h;
    let n = (w * h) as f64;

    let mut sum = 0.0f64;
    let mut sum_sq = 0.0f64;
    for y in 0..h {
        let up = gray.row(y.saturating_sub(1));
        let row = gray.row(y);
        let down = gray.row((y + 1).min(h - 1));
        for x in 0..w {
            let left = row[x.saturating_sub(1)];
            let right = row[(x + 1).min(w - 1)];
            let v = (up[x] + down[x] + left + right - 4.0 * row[x]) as f64;
            sum += v;
            sum_sq += v * v;
        }
    }
    let mean = sum / n;
    ((sum_sq / n) - mean * mean).max(0.0) as f32
}

/// Blend of per-row gradient energy and per-row intensity variance.
///
/// Each per-row profile is normalized by its image-wide maximum before the
/// `0.7 / 0.3` combination, so the score lands in `[0, 1]` regardless of the
/// absolute dynamic range. The weights are calibration heuristics, not
/// derived constants.
fn texture_score(gray: &ImageF32) -> f32 {
    let w = gray.w;
    let h = gray.h;
    if w < 2 {
        return 0.0;
    }

    let mut grad_means = Vec::with_capacity(h);
    let mut variances = Vec::with_capacity(h);
    for row in gray.rows() {
        let mut grad_sum = 0.0f32;
        for x in 1..w {
            grad_sum += (row[x] - row[x - 1]).abs();
        }
        grad_means.push(grad_sum / (w - 1) as f32);

        let mean = row.iter().sum::<f32>() / w as f32;
        let var = row.iter().map(|&v| (v - mean) * (v - mean)).sum::<f32>() / w as f32;
        variances.push(var);
    }

    let grad_max = grad_means.iter().cloned().fold(0.0f32, f32::max).max(DENOM_EPS);
    let var_max = variances.iter().cloned().fold(0.0f32, f32::max).max(DENOM_EPS);

    let mut acc = 0.0f32;
    for (g, v) in grad_means.iter().zip(&variances) {
        acc += TEXTURE_GRADIENT_WEIGHT * (g / grad_max) + TEXTURE_VARIANCE_WEIGHT * (v / var_max);
    }
    (acc / h as f32).clamp(0.0, 1.0)
}

/// Spread of the intensity histogram, measured as the standard deviation of
/// pixel values on the 0–255 scale.
fn intensity_stddev(gray: &ImageF32) -> f32 {
    let n = (gray.w * gray.h) as f64;
    let mut sum = 0.0f64;
    let mut sum_sq = 0.0f64;
    for row in gray.rows() {
        for &v in row {
            sum += v as f64;
            sum_sq += (v as f64) * (v as f64);
        }
    }
    let mean = sum / n;
    (((sum_sq / n) - mean * mean).max(0.0) as f32).sqrt()
}
