use thiserror::Error;

/// Errors that can occur during bucket processing.
#[derive(Debug, Error)]
pub enum BucketError {
    /// A processor failed with an error.
    ///
    /// Preserves the source error for debugging.
    #[error("processor failed")]
    ProcessorError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A batch failed; every batch before it stays applied.
    #[error("batch {batch} of {total} failed after {committed} record(s) were confirmed")]
    BatchFailed {
        batch: usize,
        total: usize,
        committed: usize,
        #[source]
        source: Box<BucketError>,
    },

    /// Processing was cancelled via the cancellation token.
    #[error("operation cancelled before batch {batch} of {total}")]
    Cancelled {
        batch: usize,
        total: usize,
        committed: usize,
    },

    #[error("invalid bucket config: {0}")]
    InvalidConfig(String),
}

impl BucketError {
    /// Records confirmed by the destination before the run stopped.
    pub fn committed(&self) -> usize {
        match self {
            BucketError::BatchFailed { committed, .. } | BucketError::Cancelled { committed, .. } => {
                *committed
            }
            _ => 0,
        }
    }
}

/// Result of submitting one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    /// 1-based position of the batch.
    pub index: usize,
    pub submitted: usize,
    pub confirmed: Option<usize>,
}

impl BatchOutcome {
    pub fn is_mismatch(&self) -> bool {
        self.confirmed != Some(self.submitted)
    }
}

/// Per-batch accounting for a completed bucket run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub batches: Vec<BatchOutcome>,
}

impl BatchSummary {
    pub fn submitted_total(&self) -> usize {
        self.batches.iter().map(|b| b.submitted).sum()
    }

    /// Confirmed rows; a batch without confirmation data counts as zero.
    pub fn confirmed_total(&self) -> usize {
        self.batches.iter().filter_map(|b| b.confirmed).sum()
    }

    pub fn mismatches(&self) -> impl Iterator<Item = &BatchOutcome> {
        self.batches.iter().filter(|b| b.is_mismatch())
    }
}
