//! # driver-etl
//!
//! Replaces the Supabase `motoristas` table with the driver dimension held
//! in Athena. One run extracts, cleans and reloads the whole table.
//!
//! ## Flow
//!
//! 1. **Extract** - run one fixed SQL query on Athena
//! 2. **Transform** - drop rows with NULLs, drop exact duplicates, stamp `cargo`
//! 3. **Load** - delete the table's rows, then insert in batches of 1000
//!
//! A rejected delete is reported as [`etl::ClearOutcome::ClearFailed`] and
//! the run continues. A failed insert batch stops the run; earlier batches
//! stay in the table.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use driver_etl::athena::AthenaSource;
//! use driver_etl::config::Settings;
//! use driver_etl::driver::DriverPipeline;
//! use driver_etl::etl::ETL;
//! use driver_etl::supabase::SupabaseClient;
//!
//! let settings = Settings::from_env()?;
//! let source = AthenaSource::connect(settings.athena()).await;
//! let table = SupabaseClient::new(&settings.supabase_url, &settings.supabase_api_key)?
//!     .table(&settings.destination_table);
//! let etl = ETL::from_box(Box::new(DriverPipeline::new(source, table)));
//! ```
//!
//! ## Modules
//!
//! - [`bucket`] - Fixed-size sequential batching
//! - [`etl`] - Generic extract/transform/clear/load runner
//! - [`athena`] - Athena query source
//! - [`supabase`] - Supabase REST table client
//! - [`driver`] - The driver pipeline itself
//! - [`config`] - Environment settings

pub mod athena;
pub mod bucket;
pub mod config;
pub mod driver;
pub mod etl;
pub mod supabase;
