#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod error;
pub mod image;
pub mod params;
pub mod splitter;
pub mod types;

// Stage modules – public for tools and advanced callers, but considered
// unstable internals.
pub mod edges;
pub mod features;
pub mod grid;
pub mod tiles;

// --- High-level re-exports -------------------------------------------------

// Main entry points: splitter + results.
pub use crate::splitter::{SheetSplitter, SplitOutcome, SplitRequest};
pub use crate::types::{DetectionResult, FeatureScores};

// Request vocabulary.
pub use crate::edges::EdgeDetectorKind;
pub use crate::error::{Error, Result};
pub use crate::grid::GridSpec;
pub use crate::params::DetectionParams;
pub use crate::tiles::OutputFormat;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use sheet_splitter::prelude::*;
///
/// let mut sheet = ImageRgba8::new(64, 64);
/// sheet.data.fill([230, 230, 230, 255]);
///
/// let splitter = SheetSplitter::default();
/// let outcome = splitter
///     .process(
///         &sheet,
///         &SplitRequest {
///             grid: GridSpec::Manual { rows: 2, cols: 2 },
///             ..Default::default()
///         },
///     )
///     .unwrap();
/// println!(
///     "tiles={} confidence={:.2} latency_ms={:.3}",
///     outcome.tiles.len(),
///     outcome.detection.confidence,
///     outcome.latency_ms
/// );
/// ```
pub mod prelude {
    pub use crate::image::ImageRgba8;
    pub use crate::{
        DetectionParams, EdgeDetectorKind, GridSpec, OutputFormat, SheetSplitter, SplitOutcome,
        SplitRequest,
    };
}

// --- Batch API -------------------------------------------------------------

pub use crate::splitter::{process_batch, process_batch_with, MAX_BATCH};
