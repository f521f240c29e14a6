use std::error::Error;

use crate::bucket::{BatchSummary, BucketError};

/// Error type crossing the [`ETLPipeline`](super::ETLPipeline) stage boundary.
pub type StageError = Box<dyn Error + Send + Sync>;

/// Errors that end an ETL run
#[derive(Debug, thiserror::Error)]
pub enum ETLError {
    #[error("extract failed")]
    Extract(#[source] StageError),

    #[error("load failed")]
    Load(#[source] BucketError),

    #[error("run cancelled before {stage}")]
    Cancelled { stage: &'static str },
}

impl ETLError {
    /// Records confirmed by the destination before the run stopped.
    pub fn committed(&self) -> usize {
        match self {
            ETLError::Load(e) => e.committed(),
            _ => 0,
        }
    }
}

/// What happened when the destination was asked to drop its old rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClearOutcome {
    Cleared,
    /// The clear was rejected; old rows may still sit next to the new ones.
    ClearFailed { reason: String },
}

impl ClearOutcome {
    pub fn is_cleared(&self) -> bool {
        matches!(self, ClearOutcome::Cleared)
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub extracted: usize,
    pub transformed: usize,
    pub clear: ClearOutcome,
    pub load: BatchSummary,
}

impl RunReport {
    pub fn inserted(&self) -> usize {
        self.load.confirmed_total()
    }
}
