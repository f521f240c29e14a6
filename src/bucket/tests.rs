use crate::bucket::{Bucket, BucketError, Config, ConfigBuilder, Processor};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

// Records every batch and confirms all of it
struct BatchSizeTracker {
    sizes: Arc<tokio::sync::Mutex<Vec<usize>>>,
}

#[async_trait]
impl Processor<i32> for BatchSizeTracker {
    async fn process(
        &self,
        _ctx: &CancellationToken,
        items: &[i32],
    ) -> Result<Option<usize>, BucketError> {
        self.sizes.lock().await.push(items.len());
        Ok(Some(items.len()))
    }
}

// Fails on the given 1-based call
struct FailingProcessor {
    calls: Arc<AtomicUsize>,
    fail_on: usize,
}

#[async_trait]
impl Processor<i32> for FailingProcessor {
    async fn process(
        &self,
        _ctx: &CancellationToken,
        items: &[i32],
    ) -> Result<Option<usize>, BucketError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.fail_on {
            return Err(BucketError::ProcessorError("Test error".into()));
        }
        Ok(Some(items.len()))
    }
}

// Never confirms anything
struct SilentProcessor;

#[async_trait]
impl Processor<i32> for SilentProcessor {
    async fn process(
        &self,
        _ctx: &CancellationToken,
        _items: &[i32],
    ) -> Result<Option<usize>, BucketError> {
        Ok(None)
    }
}

// Cancels the token while handling the first batch
struct CancellingProcessor {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Processor<i32> for CancellingProcessor {
    async fn process(
        &self,
        ctx: &CancellationToken,
        items: &[i32],
    ) -> Result<Option<usize>, BucketError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        ctx.cancel();
        Ok(Some(items.len()))
    }
}

fn bucket(batch_size: usize) -> Bucket<i32> {
    let config = ConfigBuilder::default()
        .batch_size(batch_size)
        .build()
        .unwrap();
    Bucket::new(Arc::new(config))
}

async fn batch_sizes(len: usize, batch_size: usize) -> Vec<usize> {
    let items: Vec<i32> = (0..len as i32).collect();
    let sizes = Arc::new(tokio::sync::Mutex::new(Vec::new()));
    let tracker = BatchSizeTracker {
        sizes: Arc::clone(&sizes),
    };

    let summary = bucket(batch_size)
        .run(&CancellationToken::new(), &items, &tracker)
        .await
        .unwrap();
    assert_eq!(summary.confirmed_total(), len);

    let sizes = sizes.lock().await.clone();
    sizes
}

#[tokio::test]
async fn test_batches_are_fixed_size_with_remainder_last() {
    let sizes = batch_sizes(2500, 1000).await;
    assert_eq!(sizes, vec![1000, 1000, 500]);
}

#[tokio::test]
async fn test_exact_multiple_has_full_last_batch() {
    let sizes = batch_sizes(3000, 1000).await;
    assert_eq!(sizes, vec![1000, 1000, 1000]);
}

#[tokio::test]
async fn test_call_count_is_ceil_of_len_over_batch_size() {
    for len in [1usize, 7, 999, 1000, 1001, 4321] {
        let sizes = batch_sizes(len, 1000).await;
        assert_eq!(sizes.len(), len.div_ceil(1000), "len = {}", len);
        assert!(sizes.iter().all(|s| *s <= 1000));
        assert_eq!(bucket(1000).batch_count(len), sizes.len());
    }
}

#[tokio::test]
async fn test_empty_input_makes_no_calls() {
    let sizes = batch_sizes(0, 1000).await;
    assert!(sizes.is_empty());
}

#[tokio::test]
async fn test_stops_at_first_failed_batch() {
    let items: Vec<i32> = (0..25).collect();
    let calls = Arc::new(AtomicUsize::new(0));
    let processor = FailingProcessor {
        calls: Arc::clone(&calls),
        fail_on: 2,
    };

    let err = bucket(10)
        .run(&CancellationToken::new(), &items, &processor)
        .await
        .unwrap_err();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    match err {
        BucketError::BatchFailed {
            batch,
            total,
            committed,
            ..
        } => {
            assert_eq!(batch, 2);
            assert_eq!(total, 3);
            assert_eq!(committed, 10);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_confirmation_counts_as_zero() {
    let items: Vec<i32> = (0..15).collect();

    let summary = bucket(10)
        .run(&CancellationToken::new(), &items, &SilentProcessor)
        .await
        .unwrap();

    assert_eq!(summary.submitted_total(), 15);
    assert_eq!(summary.confirmed_total(), 0);
    assert_eq!(summary.mismatches().count(), 2);
}

#[tokio::test]
async fn test_cancellation_checked_between_batches() {
    let items: Vec<i32> = (0..30).collect();
    let calls = Arc::new(AtomicUsize::new(0));
    let processor = CancellingProcessor {
        calls: Arc::clone(&calls),
    };

    let err = bucket(10)
        .run(&CancellationToken::new(), &items, &processor)
        .await
        .unwrap_err();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(matches!(
        err,
        BucketError::Cancelled {
            batch: 2,
            total: 3,
            committed: 10
        }
    ));
}

#[tokio::test]
async fn test_zero_batch_size_is_rejected_at_run() {
    let bucket: Bucket<i32> = Bucket::new(Arc::new(Config { batch_size: 0 }));
    let err = bucket
        .run(&CancellationToken::new(), &[1, 2, 3], &SilentProcessor)
        .await
        .unwrap_err();
    assert!(matches!(err, BucketError::InvalidConfig(_)));
}
