//! Detector variants behind a single `detect` contract.

use super::blur::gaussian3;
use super::canny::hysteresis_edges;
use super::grad::{laplacian_response, sobel_gradients};
use super::map::EdgeMap;
use super::morph::close;
use crate::features;
use crate::image::ImageF32;
use crate::params::DetectionParams;
use log::debug;
use serde::Deserialize;

/// Edge detection mode, resolved once per invocation.
///
/// Every variant honours `detect(image, params) -> EdgeMap`, so the line
/// locator never needs to know which one ran.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeDetectorKind {
    /// Single Sobel-magnitude threshold. Fastest, lowest accuracy; manual
    /// fallback mode.
    Basic,
    /// Hysteresis + Sobel + Laplacian responses OR-combined, then closed.
    #[default]
    MultiAlgorithm,
    /// Feature analysis first, then [`MultiAlgorithm`] with a derived
    /// parameter set.
    ///
    /// [`MultiAlgorithm`]: EdgeDetectorKind::MultiAlgorithm
    Adaptive,
}

impl EdgeDetectorKind {
    /// Convert a grayscale image into a binary edge map.
    ///
    /// Deterministic for identical `(image, params)`; every variant runs a
    /// bounded number of linear passes.
    pub fn detect(&self, gray: &ImageF32, params: &DetectionParams) -> EdgeMap {
        match self {
            Self::Basic => basic_threshold(gray, params),
            Self::MultiAlgorithm => multi_algorithm(gray, params),
            Self::Adaptive => {
                let scores = features::analyze(gray);
                let tuned = params.adapt(&scores);
                debug!(
                    "adaptive detect: blur={:.1} texture={:.2} contrast={:.1} \
                     -> canny=({:.0},{:.0}) kernel={}",
                    scores.blur_score,
                    scores.texture_score,
                    scores.contrast_score,
                    tuned.canny_low,
                    tuned.canny_high,
                    tuned.morph_kernel_size
                );
                multi_algorithm(gray, &tuned)
            }
        }
    }
}

/// Gradient-magnitude threshold without any post-processing.
pub fn basic_threshold(gray: &ImageF32, params: &DetectionParams) -> EdgeMap {
    let grad = sobel_gradients(gray);
    EdgeMap::from_threshold(&grad.mag, params.sobel_threshold)
}

/// Three independent responses against the same blurred input, OR-combined
/// and morphologically closed into continuous lines.
pub fn multi_algorithm(gray: &ImageF32, params: &DetectionParams) -> EdgeMap {
    let blurred = gaussian3(gray);
    let grad = sobel_gradients(&blurred);

    let mut combined = hysteresis_edges(&grad, params.canny_low, params.canny_high);
    combined.or_with(&EdgeMap::from_threshold(&grad.mag, params.sobel_threshold));
    combined.or_with(&EdgeMap::from_threshold(
        &laplacian_response(&blurred),
        params.laplacian_threshold,
    ));

    close(&combined, params.morph_kernel_size)
}
