//! Single-image splitting pipeline.

use super::progress::{Checkpoint, NoProgress, ProgressSink};
use crate::edges::{EdgeDetectorKind, EdgeMap};
use crate::error::{Error, Result};
use crate::features;
use crate::grid::{self, GridSpec};
use crate::image::ImageRgba8;
use crate::params::DetectionParams;
use crate::tiles::{extract_with, OutputFormat, Tile};
use crate::types::DetectionResult;
use log::{debug, warn};
use std::time::Instant;

/// Inputs below this edge length still work but get a reliability warning.
const SMALL_DIMENSION: usize = 100;

/// Per-image request: what to split and how.
#[derive(Clone, Copy, Debug)]
pub struct SplitRequest {
    pub grid: GridSpec,
    pub detector: EdgeDetectorKind,
    /// Counter-clockwise rotation applied before any detection, in degrees.
    pub rotation_deg: f32,
    pub format: OutputFormat,
}

impl Default for SplitRequest {
    fn default() -> Self {
        Self {
            grid: GridSpec::Auto,
            detector: EdgeDetectorKind::default(),
            rotation_deg: 0.0,
            format: OutputFormat::default(),
        }
    }
}

impl SplitRequest {
    pub fn validate(&self) -> Result<()> {
        self.grid.validate()?;
        if !self.rotation_deg.is_finite() {
            return Err(Error::parameter(
                "rotation_deg",
                format!("must be finite, got {}", self.rotation_deg),
            ));
        }
        Ok(())
    }
}

/// Everything one successful invocation produced.
#[derive(Clone, Debug)]
pub struct SplitOutcome {
    pub detection: DetectionResult,
    /// Row-major tiles, `detection.tile_count()` of them.
    pub tiles: Vec<Tile>,
    /// Wall-clock duration of the invocation.
    pub latency_ms: f64,
}

/// Stateless splitting engine.
///
/// Holds only the validated parameter set; every invocation is a pure
/// function of `(image, request)`, so one instance can serve a parallel
/// batch without synchronization.
#[derive(Clone, Debug)]
pub struct SheetSplitter {
    params: DetectionParams,
}

impl Default for SheetSplitter {
    fn default() -> Self {
        Self {
            params: DetectionParams::default(),
        }
    }
}

impl SheetSplitter {
    /// Build a splitter from a parameter set, rejecting invalid values up
    /// front so batch workers never need to re-validate.
    pub fn new(params: DetectionParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &DetectionParams {
        &self.params
    }

    /// Split one sheet without progress reporting.
    pub fn process(&self, image: &ImageRgba8, request: &SplitRequest) -> Result<SplitOutcome> {
        self.process_with(image, request, &NoProgress)
    }

    /// Split one sheet, reporting progress and honouring cancellation.
    ///
    /// Cancellation is cooperative: the sink is consulted after feature
    /// analysis, edge detection, line location and each extracted tile, and
    /// a `false` response surfaces as [`Error::Cancelled`] with the
    /// checkpoint that was reached.
    pub fn process_with(
        &self,
        image: &ImageRgba8,
        request: &SplitRequest,
        progress: &dyn ProgressSink,
    ) -> Result<SplitOutcome> {
        let started = Instant::now();

        request.validate()?;
        if image.w == 0 || image.h == 0 {
            return Err(Error::input("image has no pixels"));
        }
        if image.w.min(image.h) < SMALL_DIMENSION {
            warn!(
                "small input {}x{}; detection may be unreliable",
                image.w, image.h
            );
        }

        // Detection always runs on the rotated canvas so located lines are
        // valid crop coordinates.
        let canvas = crate::tiles::rotate_about_center(image, request.rotation_deg);
        let gray = canvas.to_luma_f32();

        // A manual grid must fit the rotated canvas, otherwise the uniform
        // lines would collapse onto each other and emit zero-sized tiles.
        if let GridSpec::Manual { rows, cols } = request.grid {
            if rows as usize > gray.h {
                return Err(Error::parameter(
                    "rows",
                    format!("must not exceed image height {}, got {rows}", gray.h),
                ));
            }
            if cols as usize > gray.w {
                return Err(Error::parameter(
                    "cols",
                    format!("must not exceed image width {}, got {cols}", gray.w),
                ));
            }
        }

        // Adaptive mode is resolved here so the analysis checkpoint sits
        // between feature measurement and the (much costlier) detection.
        let (tuned, detector) = match request.detector {
            EdgeDetectorKind::Adaptive => {
                let scores = features::analyze(&gray);
                debug!(
                    "features: blur={:.1} texture={:.2} contrast={:.1}",
                    scores.blur_score, scores.texture_score, scores.contrast_score
                );
                (self.params.adapt(&scores), EdgeDetectorKind::MultiAlgorithm)
            }
            other => (self.params.clone(), other),
        };
        checkpoint(progress, Checkpoint::FeaturesAnalyzed)?;

        // Manual grids never consult pixel content; skip detection entirely.
        let map = match request.grid {
            GridSpec::Manual { .. } => EdgeMap::new(gray.w, gray.h),
            GridSpec::Auto => detector.detect(&gray, &tuned),
        };
        checkpoint(progress, Checkpoint::EdgesDetected)?;

        let detection = grid::locate(&map, &request.grid, &tuned);
        checkpoint(progress, Checkpoint::LinesLocated)?;

        let mut cancelled_at = 0;
        let tiles = extract_with(&canvas, &detection, 0.0, request.format, |i| {
            if progress.checkpoint(Checkpoint::TileExtracted(i)) {
                true
            } else {
                cancelled_at = i;
                false
            }
        })
        .ok_or(Error::Cancelled {
            checkpoint: Checkpoint::TileExtracted(cancelled_at),
        })?;

        let latency_ms = started.elapsed().as_secs_f64() * 1e3;
        debug!(
            "split {}x{} into {} tiles (confidence {:.2}) in {:.1} ms",
            image.w,
            image.h,
            tiles.len(),
            detection.confidence,
            latency_ms
        );

        Ok(SplitOutcome {
            detection,
            tiles,
            latency_ms,
        })
    }
}

fn checkpoint(progress: &dyn ProgressSink, at: Checkpoint) -> Result<()> {
    if progress.checkpoint(at) {
        Ok(())
    } else {
        Err(Error::Cancelled { checkpoint: at })
    }
}
