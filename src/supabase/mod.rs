//! Table access through the Supabase (PostgREST) data API.

use async_trait::async_trait;
use serde_json::Value;

pub mod client;
pub mod types;

pub use client::{SupabaseClient, TableClient};
pub use types::SupabaseError;

/// A single remote table that supports conditional delete and bulk insert.
#[async_trait]
pub trait RestTable: Send + Sync {
    fn name(&self) -> &str;

    /// Deletes every row whose `column` is not equal to `value`.
    async fn delete_neq(&self, column: &str, value: &str) -> Result<(), SupabaseError>;

    /// Inserts `rows` and returns the rows the API echoed back, or `None`
    /// if the response carried no data.
    async fn insert_rows(&self, rows: &[Value]) -> Result<Option<Vec<Value>>, SupabaseError>;
}
