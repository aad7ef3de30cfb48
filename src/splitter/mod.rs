//! Pipeline orchestration: per-image splitting, cooperative cancellation and
//! batch execution.
//!
//! The pipeline is a pure, stateless transformation
//! `image × request × params → tiles + detection result`; no state survives
//! between invocations, so batches parallelise without locking.

mod batch;
mod pipeline;
mod progress;

pub use batch::{process_batch, process_batch_with, MAX_BATCH};
pub use pipeline::{SheetSplitter, SplitOutcome, SplitRequest};
pub use progress::{Checkpoint, NoProgress, ProgressSink};
