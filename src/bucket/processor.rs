// src/bucket/processor.rs

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::types::BucketError;

/// Handles one batch handed out by a [`Bucket`](super::Bucket).
///
/// Returns how many items the receiving side confirmed, or `None` when it
/// gave no confirmation at all.
#[async_trait]
pub trait Processor<T>: Send + Sync {
    async fn process(
        &self,
        cancel: &CancellationToken,
        items: &[T],
    ) -> Result<Option<usize>, BucketError>;
}
