//! The driver-identity job: Athena dimension in, Supabase table out.

pub mod model;
pub mod pipeline;
pub mod transform;

pub use model::{DriverRecord, RawDriverRow, DRIVER_ROLE};
pub use pipeline::{DriverPipeline, DELETE_SENTINEL, EXTRACT_QUERY, KEY_COLUMN};
pub use transform::clean;
