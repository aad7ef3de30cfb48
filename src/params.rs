//! Detection parameters and the adaptive derivation rules.
//!
//! All thresholds live on the 8-bit intensity scale used by [`ImageF32`]
//! buffers, so the documented defaults apply to pixel values directly. They
//! are heuristic tuning points, not physical constants; every one of them
//! can be overridden by the caller.
//!
//! [`ImageF32`]: crate::image::ImageF32

use crate::error::{Error, Result};
use crate::types::FeatureScores;
use serde::Deserialize;

/// Hard cap on grid divisions per axis, shared with request validation.
pub const MAX_DIVISIONS: u32 = 18;

/// Largest morphological kernel the adaptation may grow to.
const MORPH_KERNEL_MAX: usize = 9;
/// Smallest supported morphological kernel.
const MORPH_KERNEL_MIN: usize = 3;
/// Canny thresholds never drop below this fraction of their base value.
const CANNY_FLOOR_SCALE: f32 = 0.4;
/// `min_area_ratio` is never relaxed below this floor.
const MIN_AREA_FLOOR: f32 = 0.5;

/// Immutable parameter set consumed by one pipeline invocation.
///
/// Adaptive mode derives a *new* value via [`DetectionParams::adapt`] instead
/// of mutating a shared configuration, which keeps batch runs free of
/// cross-image interference.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DetectionParams {
    /// Lower hysteresis threshold of the Canny-style operator.
    pub canny_low: f32,
    /// Upper hysteresis threshold of the Canny-style operator.
    pub canny_high: f32,
    /// Binarization threshold for the Sobel gradient magnitude.
    pub sobel_threshold: f32,
    /// Binarization threshold for the Laplacian magnitude.
    pub laplacian_threshold: f32,
    /// Side length of the square closing kernel (odd, 3–9).
    pub morph_kernel_size: usize,
    /// Fraction of the strongest peak prominence a profile maximum must reach
    /// to be accepted as a separator, in `[0, 1]`.
    pub min_area_ratio: f32,
    /// Blur adaptation pivot (Laplacian variance).
    pub blur_threshold: f32,
    /// Texture adaptation pivot (normalized texture score).
    pub texture_threshold: f32,
    /// Contrast adaptation pivot (intensity standard deviation).
    pub contrast_threshold: f32,
    /// Row count used when auto-detection finds vertical separators but no
    /// horizontal ones. A fully failed detection falls back to the grid
    /// shape suggested by the sheet aspect ratio instead.
    pub fallback_rows: u32,
    /// Column count used when auto-detection finds horizontal separators but
    /// no vertical ones.
    pub fallback_cols: u32,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            canny_low: 50.0,
            canny_high: 150.0,
            sobel_threshold: 50.0,
            laplacian_threshold: 20.0,
            morph_kernel_size: 5,
            min_area_ratio: 0.6,
            blur_threshold: 100.0,
            texture_threshold: 0.5,
            contrast_threshold: 30.0,
            fallback_rows: 2,
            fallback_cols: 2,
        }
    }
}

impl DetectionParams {
    /// Reject out-of-range values before any pixel processing starts.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("canny_low", self.canny_low),
            ("canny_high", self.canny_high),
            ("sobel_threshold", self.sobel_threshold),
            ("laplacian_threshold", self.laplacian_threshold),
            ("blur_threshold", self.blur_threshold),
            ("texture_threshold", self.texture_threshold),
            ("contrast_threshold", self.contrast_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::parameter(name, format!("must be non-negative, got {value}")));
            }
        }
        if self.canny_low > self.canny_high {
            return Err(Error::parameter(
                "canny_low",
                format!(
                    "must not exceed canny_high ({} > {})",
                    self.canny_low, self.canny_high
                ),
            ));
        }
        if self.morph_kernel_size % 2 == 0
            || !(MORPH_KERNEL_MIN..=MORPH_KERNEL_MAX).contains(&self.morph_kernel_size)
        {
            return Err(Error::parameter(
                "morph_kernel_size",
                format!(
                    "must be odd and within {MORPH_KERNEL_MIN}-{MORPH_KERNEL_MAX}, got {}",
                    self.morph_kernel_size
                ),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_area_ratio) {
            return Err(Error::parameter(
                "min_area_ratio",
                format!("must be within [0, 1], got {}", self.min_area_ratio),
            ));
        }
        for (name, value) in [
            ("fallback_rows", self.fallback_rows),
            ("fallback_cols", self.fallback_cols),
        ] {
            if value == 0 || value > MAX_DIVISIONS {
                return Err(Error::parameter(
                    name,
                    format!("must be within 1-{MAX_DIVISIONS}, got {value}"),
                ));
            }
        }
        Ok(())
    }

    /// Derive a parameter set tuned to the measured image features.
    ///
    /// - Blurry input (`blur_score < blur_threshold`) lowers both Canny
    ///   thresholds proportionally so faint separators still respond.
    /// - Heavy texture grows the closing kernel, merging noise fragments so
    ///   they stop masquerading as lines.
    /// - Low contrast relaxes `min_area_ratio` so weak candidates survive
    ///   the prominence gate.
    pub fn adapt(&self, scores: &FeatureScores) -> Self {
        let mut out = self.clone();

        if scores.blur_score < self.blur_threshold {
            let ratio = scores.blur_score / self.blur_threshold.max(f32::EPSILON);
            out.canny_low = (self.canny_low * ratio).max(self.canny_low * CANNY_FLOOR_SCALE);
            out.canny_high = (self.canny_high * ratio).max(self.canny_high * CANNY_FLOOR_SCALE);
        }

        if scores.texture_score > self.texture_threshold {
            let ratio = scores.texture_score / self.texture_threshold.max(f32::EPSILON);
            let grown = self.morph_kernel_size + (2.0 * ratio) as usize;
            // Closing kernels stay odd so the anchor pixel is centred.
            out.morph_kernel_size = (grown | 1).min(MORPH_KERNEL_MAX);
        }

        if scores.contrast_score < self.contrast_threshold {
            let ratio = scores.contrast_score / self.contrast_threshold.max(f32::EPSILON);
            out.min_area_ratio =
                (self.min_area_ratio * ratio).max(MIN_AREA_FLOOR.min(self.min_area_ratio));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        DetectionParams::default().validate().expect("defaults are valid");
    }

    #[test]
    fn even_kernel_is_rejected() {
        let params = DetectionParams {
            morph_kernel_size: 4,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(Error::Parameter { name: "morph_kernel_size", .. })
        ));
    }

    #[test]
    fn negative_threshold_is_rejected() {
        let params = DetectionParams {
            sobel_threshold: -1.0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn adapt_does_not_mutate_base() {
        let base = DetectionParams::default();
        let scores = FeatureScores {
            blur_score: 25.0,
            texture_score: 0.9,
            contrast_score: 10.0,
        };
        let tuned = base.adapt(&scores);

        assert_eq!(base.canny_low, 50.0);
        assert!(tuned.canny_low < base.canny_low);
        assert!(tuned.canny_low >= base.canny_low * 0.4 - 1e-6);
        assert!(tuned.morph_kernel_size > base.morph_kernel_size);
        assert_eq!(tuned.morph_kernel_size % 2, 1);
        assert!(tuned.min_area_ratio < base.min_area_ratio);
        assert!(tuned.min_area_ratio >= 0.5);
    }

    #[test]
    fn adapt_is_identity_on_good_input() {
        let base = DetectionParams::default();
        let scores = FeatureScores {
            blur_score: 500.0,
            texture_score: 0.1,
            contrast_score: 60.0,
        };
        let tuned = base.adapt(&scores);
        assert_eq!(tuned.canny_low, base.canny_low);
        assert_eq!(tuned.morph_kernel_size, base.morph_kernel_size);
        assert_eq!(tuned.min_area_ratio, base.min_area_ratio);
    }

    #[test]
    fn adapted_kernel_never_exceeds_cap() {
        let base = DetectionParams::default();
        let scores = FeatureScores {
            blur_score: 500.0,
            texture_score: 10.0,
            contrast_score: 60.0,
        };
        assert_eq!(base.adapt(&scores).morph_kernel_size, 9);
    }
}
