//! Edge extraction: gradients, hysteresis thresholding, morphology and the
//! detector variants built from them.
//!
//! The three detector variants share one contract — grayscale in, binary
//! [`EdgeMap`] out — and differ only in how many signals they combine:
//!
//! - [`EdgeDetectorKind::Basic`] thresholds the Sobel magnitude once.
//! - [`EdgeDetectorKind::MultiAlgorithm`] ORs a hysteresis operator, the
//!   Sobel magnitude and the Laplacian magnitude, then closes gaps
//!   morphologically.
//! - [`EdgeDetectorKind::Adaptive`] measures the image first and delegates to
//!   the multi-algorithm path with a derived parameter set.
//!
//! Design goals
//! - Favor clarity and cache-friendly row access over micro-optimizations.
//! - Handle borders by clamping indices (replicate).
//! - Every pass is linear in the pixel count.

pub mod blur;
pub mod canny;
pub mod detector;
pub mod grad;
pub mod map;
pub mod morph;

pub use blur::gaussian3;
pub use canny::hysteresis_edges;
pub use detector::EdgeDetectorKind;
pub use grad::{laplacian_response, sobel_gradients, Grad};
pub use map::EdgeMap;
pub use morph::close;
