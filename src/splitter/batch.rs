//! Parallel batch execution with per-image fault isolation.

use super::pipeline::{SheetSplitter, SplitOutcome, SplitRequest};
use super::progress::{NoProgress, ProgressSink};
use crate::error::{Error, Result};
use crate::image::ImageRgba8;
use log::debug;
use rayon::prelude::*;

/// Hard cap on images per batch.
pub const MAX_BATCH: usize = 10;

/// Split every image in the batch with the same request.
///
/// Images are processed in parallel; the result vector keeps the input
/// order. One failing image does not affect the others, so the outer
/// `Result` only reports problems with the batch itself (currently just the
/// size cap).
pub fn process_batch(
    splitter: &SheetSplitter,
    images: &[ImageRgba8],
    request: &SplitRequest,
) -> Result<Vec<Result<SplitOutcome>>> {
    process_batch_with(splitter, images, request, &NoProgress)
}

/// Like [`process_batch`], with a shared progress sink.
///
/// All workers consult the same sink, so checkpoints from different images
/// interleave; a `false` response cancels whichever image asked, and
/// eventually the whole batch, without tearing down images that already
/// finished.
pub fn process_batch_with(
    splitter: &SheetSplitter,
    images: &[ImageRgba8],
    request: &SplitRequest,
    progress: &dyn ProgressSink,
) -> Result<Vec<Result<SplitOutcome>>> {
    if images.len() > MAX_BATCH {
        return Err(Error::parameter(
            "batch",
            format!("at most {MAX_BATCH} images per batch, got {}", images.len()),
        ));
    }

    let outcomes: Vec<Result<SplitOutcome>> = images
        .par_iter()
        .map(|image| splitter.process_with(image, request, progress))
        .collect();

    debug!(
        "batch of {}: {} ok, {} failed",
        images.len(),
        outcomes.iter().filter(|r| r.is_ok()).count(),
        outcomes.iter().filter(|r| r.is_err()).count()
    );
    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridSpec;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sheet(w: usize, h: usize, shade: u8) -> ImageRgba8 {
        let mut img = ImageRgba8::new(w, h);
        img.data.fill([shade, shade, shade, 255]);
        img
    }

    fn manual_request() -> SplitRequest {
        SplitRequest {
            grid: GridSpec::Manual { rows: 2, cols: 2 },
            ..Default::default()
        }
    }

    #[test]
    fn oversized_batch_is_rejected_whole() {
        let images: Vec<ImageRgba8> = (0..11).map(|_| sheet(8, 8, 200)).collect();
        let err = process_batch(&SheetSplitter::default(), &images, &manual_request())
            .unwrap_err();
        assert!(matches!(err, Error::Parameter { name: "batch", .. }));
    }

    #[test]
    fn failing_image_does_not_poison_the_batch() {
        let images = vec![sheet(40, 40, 200), ImageRgba8::new(0, 0), sheet(40, 40, 100)];
        let outcomes = process_batch(&SheetSplitter::default(), &images, &manual_request())
            .expect("batch itself is valid");
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].is_ok());
        assert!(matches!(outcomes[1], Err(Error::Input { .. })));
        assert!(outcomes[2].is_ok());
    }

    #[test]
    fn results_keep_input_order() {
        let images: Vec<ImageRgba8> =
            (0..4).map(|i| sheet(20 + 10 * i, 20, 180)).collect();
        let outcomes = process_batch(&SheetSplitter::default(), &images, &manual_request())
            .expect("batch succeeds");
        for (i, outcome) in outcomes.iter().enumerate() {
            let outcome = outcome.as_ref().expect("image splits");
            let width: usize = outcome
                .tiles
                .iter()
                .filter(|t| t.row == 0)
                .map(|t| t.image.w)
                .sum();
            assert_eq!(width, 20 + 10 * i);
        }
    }

    #[test]
    fn shared_sink_sees_every_image() {
        struct Counter(AtomicUsize);
        impl ProgressSink for Counter {
            fn checkpoint(&self, _checkpoint: crate::splitter::Checkpoint) -> bool {
                self.0.fetch_add(1, Ordering::Relaxed);
                true
            }
        }

        let images = vec![sheet(16, 16, 220), sheet(16, 16, 60)];
        let counter = Counter(AtomicUsize::new(0));
        let outcomes =
            process_batch_with(&SheetSplitter::default(), &images, &manual_request(), &counter)
                .expect("batch succeeds");
        assert!(outcomes.iter().all(|r| r.is_ok()));
        // 3 stage checkpoints + 4 tile checkpoints per image.
        assert_eq!(counter.0.load(Ordering::Relaxed), 14);
    }
}
