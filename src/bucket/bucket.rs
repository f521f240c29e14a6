use std::marker::PhantomData;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::config::Config;
use super::processor::Processor;
use super::types::{BatchOutcome, BatchSummary, BucketError};

/// Splits a data set into fixed-size batches and feeds them to a
/// [`Processor`] one after another.
pub struct Bucket<T> {
    config: Arc<Config>,
    _items: PhantomData<fn(&T)>,
}

impl<T> Bucket<T>
where
    T: Sync,
{
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            _items: PhantomData,
        }
    }

    /// Number of processor calls needed for `len` items.
    pub fn batch_count(&self, len: usize) -> usize {
        len.div_ceil(self.config.batch_size)
    }

    /// Submits `items` in order, `batch_size` at a time.
    ///
    /// Stops at the first failing batch. Batches handled before the failure
    /// are not undone; their confirmed count is carried in the error.
    pub async fn run<P>(
        &self,
        cancel: &CancellationToken,
        items: &[T],
        process: &P,
    ) -> Result<BatchSummary, BucketError>
    where
        P: Processor<T> + ?Sized,
    {
        let batch_size = self.config.batch_size;
        if batch_size == 0 {
            return Err(BucketError::InvalidConfig(
                "batch_size must be greater than zero".to_string(),
            ));
        }

        let total = self.batch_count(items.len());
        let mut summary = BatchSummary {
            batches: Vec::with_capacity(total),
        };

        for (offset, chunk) in items.chunks(batch_size).enumerate() {
            let index = offset + 1;
            if cancel.is_cancelled() {
                return Err(BucketError::Cancelled {
                    batch: index,
                    total,
                    committed: summary.confirmed_total(),
                });
            }

            debug!(batch = index, total, size = chunk.len(), "submitting batch");
            let confirmed = process.process(cancel, chunk).await.map_err(|e| {
                BucketError::BatchFailed {
                    batch: index,
                    total,
                    committed: summary.confirmed_total(),
                    source: Box::new(e),
                }
            })?;

            let outcome = BatchOutcome {
                index,
                submitted: chunk.len(),
                confirmed,
            };
            if outcome.is_mismatch() {
                match outcome.confirmed {
                    Some(n) => warn!(
                        batch = index,
                        submitted = outcome.submitted,
                        confirmed = n,
                        "batch confirmation does not match submitted rows"
                    ),
                    None => warn!(
                        batch = index,
                        submitted = outcome.submitted,
                        "batch returned no confirmation data"
                    ),
                }
            }
            summary.batches.push(outcome);
        }

        Ok(summary)
    }
}
