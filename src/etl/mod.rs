use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::bucket::{Bucket, BucketError, Config, Processor};

pub mod types;

pub use types::{ClearOutcome, ETLError, RunReport, StageError};

/// Defines a full-replace ETL (Extract-Transform-Load) pipeline.
///
/// # Type Parameters
///
/// * `E` - Type of rows extracted from the source
/// * `T` - Type of records after transformation
///
/// # Lifecycle
///
/// 1. `extract()` - Fetch the complete source data set
/// 2. `transform()` - Clean the whole data set in memory
/// 3. `clear()` - Remove the destination's current rows
/// 4. `load()` - Insert one batch of transformed records
#[async_trait]
pub trait ETLPipeline<E, T>: Send + Sync {
    /// Extracts every row from the data source.
    async fn extract(&self, cancel: &CancellationToken) -> Result<Vec<E>, StageError>;

    /// Transforms the extracted data set.
    ///
    /// Must be deterministic and free of side effects; an empty input is valid.
    fn transform(&self, items: Vec<E>) -> Vec<T>;

    /// Clears the destination before loading.
    async fn clear(&self, cancel: &CancellationToken) -> Result<(), StageError>;

    /// Loads one batch and returns how many rows the destination confirmed,
    /// or `None` if it returned no confirmation data.
    async fn load(
        &self,
        cancel: &CancellationToken,
        items: &[T],
    ) -> Result<Option<usize>, StageError>;
}

/// Executor for ETL pipelines.
///
/// Runs `START → EXTRACTED → TRANSFORMED → DELETING → INSERTING → DONE`
/// once, in order. A failed clear is recorded and the run goes on to insert.
pub struct ETL<E, T> {
    etl: Arc<dyn ETLPipeline<E, T>>,
}

impl<E, T> ETL<E, T>
where
    E: Send + 'static,
    T: Send + Sync + 'static,
{
    pub fn new(etl: Arc<dyn ETLPipeline<E, T>>) -> Self {
        ETL { etl }
    }

    /// Creates a new ETL from a boxed pipeline implementation.
    pub fn from_box(etl: Box<dyn ETLPipeline<E, T>>) -> Self {
        ETL {
            etl: Arc::from(etl),
        }
    }

    pub async fn run(
        &self,
        config: Arc<Config>,
        cancel: &CancellationToken,
    ) -> Result<RunReport, ETLError> {
        info!("starting extraction");
        let raw = match self.etl.extract(cancel).await {
            Ok(raw) => raw,
            Err(e) => {
                error!(error = %e, "extraction failed");
                return Err(ETLError::Extract(e));
            }
        };
        let extracted = raw.len();
        info!(rows = extracted, "extraction finished");

        let records = self.etl.transform(raw);
        info!(records = records.len(), "records after transformation");

        if cancel.is_cancelled() {
            return Err(ETLError::Cancelled { stage: "delete" });
        }

        info!("deleting existing destination rows");
        let clear = match self.etl.clear(cancel).await {
            Ok(()) => {
                info!("existing destination rows deleted");
                ClearOutcome::Cleared
            }
            Err(e) => {
                warn!(error = %e, "failed to delete existing rows, continuing with insert");
                ClearOutcome::ClearFailed {
                    reason: e.to_string(),
                }
            }
        };

        let bucket: Bucket<T> = Bucket::new(config);
        info!(
            records = records.len(),
            batches = bucket.batch_count(records.len()),
            "inserting records"
        );
        let stage = LoadStage {
            etl: Arc::clone(&self.etl),
        };
        let load = match bucket.run(cancel, &records, &stage).await {
            Ok(load) => load,
            Err(e) => {
                error!(error = %e, "insert failed");
                return Err(ETLError::Load(e));
            }
        };
        info!(inserted = load.confirmed_total(), "insert finished");

        Ok(RunReport {
            extracted,
            transformed: records.len(),
            clear,
            load,
        })
    }
}

/// Feeds bucket batches into [`ETLPipeline::load`].
struct LoadStage<E, T> {
    etl: Arc<dyn ETLPipeline<E, T>>,
}

#[async_trait]
impl<E, T> Processor<T> for LoadStage<E, T>
where
    E: Send + 'static,
    T: Send + Sync + 'static,
{
    async fn process(
        &self,
        cancel: &CancellationToken,
        items: &[T],
    ) -> Result<Option<usize>, BucketError> {
        self.etl
            .load(cancel, items)
            .await
            .map_err(BucketError::ProcessorError)
    }
}
