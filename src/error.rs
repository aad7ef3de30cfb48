//! Error taxonomy for the splitting pipeline.
//!
//! Validation problems fail fast and affect only the offending image.
//! Ambiguous detection is *not* an error: the locator degrades to a uniform
//! grid with low confidence instead. Persistence failures are reported per
//! file and never abort the remaining batch.

use crate::splitter::Checkpoint;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Unsupported, zero-sized or corrupt input buffer.
    #[error("invalid input image: {reason}")]
    Input { reason: String },

    /// Out-of-range request parameter, rejected before any pixel work.
    #[error("invalid parameter `{name}`: {reason}")]
    Parameter { name: &'static str, reason: String },

    /// Cooperative cancellation honoured at a pipeline checkpoint.
    #[error("cancelled at {checkpoint:?}")]
    Cancelled { checkpoint: Checkpoint },

    /// Failure while reading or writing a file on behalf of the caller.
    #[error("I/O failure for {path}: {reason}")]
    Io { path: String, reason: String },
}

impl Error {
    pub(crate) fn input(reason: impl Into<String>) -> Self {
        Self::Input {
            reason: reason.into(),
        }
    }

    pub(crate) fn parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::Parameter {
            name,
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<String>, reason: impl ToString) -> Self {
        Self::Io {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
