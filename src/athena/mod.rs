//! Query source backed by Amazon Athena.

use async_trait::async_trait;

pub mod client;
pub mod types;

pub use client::{AthenaSource, AthenaSourceConfig};
pub use types::{AthenaError, QueryResult};

/// Something that can run a SQL statement and hand back the full result.
#[async_trait]
pub trait QuerySource: Send + Sync {
    async fn query(&self, sql: &str) -> Result<QueryResult, AthenaError>;
}
