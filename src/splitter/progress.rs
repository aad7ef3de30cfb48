//! Progress reporting and cooperative cancellation.

/// Pipeline checkpoints at which cancellation is honoured.
///
/// A cancelled image produces no output at all; there is no partially
/// written result to clean up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Checkpoint {
    /// Feature analysis finished (fires even when no analysis was needed).
    FeaturesAnalyzed,
    /// The binary edge map is available.
    EdgesDetected,
    /// Separator lines have been located.
    LinesLocated,
    /// Tile with this sequence index has been produced.
    TileExtracted(usize),
}

/// Callback invoked at each [`Checkpoint`].
///
/// Returning `false` requests cancellation; the pipeline stops at the
/// current checkpoint and reports [`Error::Cancelled`].
///
/// [`Error::Cancelled`]: crate::error::Error::Cancelled
pub trait ProgressSink: Sync {
    fn checkpoint(&self, checkpoint: Checkpoint) -> bool;
}

/// Default sink: never cancels, reports nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn checkpoint(&self, _checkpoint: Checkpoint) -> bool {
        true
    }
}
