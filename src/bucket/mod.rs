pub mod bucket;
pub mod config;
pub mod processor;
pub mod types;

pub use bucket::Bucket;
pub use config::{Config, ConfigBuilder, DEFAULT_BATCH_SIZE};
pub use processor::Processor;
pub use types::{BatchOutcome, BatchSummary, BucketError};

#[cfg(test)]
mod tests;
