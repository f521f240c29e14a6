// src/config.rs

use derive_builder::Builder;
use std::env;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::athena::AthenaSourceConfig;
use crate::bucket::DEFAULT_BATCH_SIZE;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },

    #[error("settings error: {0}")]
    Build(String),
}

/// Job settings, read from the environment.
#[derive(Clone, Builder)]
#[builder(setter(into))]
pub struct Settings {
    pub aws_region: String,

    /// S3 URI Athena stages query results in
    pub athena_staging_dir: String,

    #[builder(default = "\"default\".to_string()")]
    pub athena_database: String,

    #[builder(default)]
    pub athena_workgroup: Option<String>,

    #[builder(default = "Duration::from_millis(500)")]
    pub athena_poll_interval: Duration,

    pub supabase_url: String,

    pub supabase_api_key: String,

    #[builder(default = "\"motoristas\".to_string()")]
    pub destination_table: String,

    #[builder(default = "DEFAULT_BATCH_SIZE")]
    pub batch_size: usize,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("aws_region", &self.aws_region)
            .field("athena_staging_dir", &self.athena_staging_dir)
            .field("athena_database", &self.athena_database)
            .field("athena_workgroup", &self.athena_workgroup)
            .field("athena_poll_interval", &self.athena_poll_interval)
            .field("supabase_url", &self.supabase_url)
            .field("supabase_api_key", &"<redacted>")
            .field("destination_table", &self.destination_table)
            .field("batch_size", &self.batch_size)
            .finish()
    }
}

impl Settings {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let mut builder = SettingsBuilder::default();
        builder
            .aws_region(required("AWS_REGION")?)
            .athena_staging_dir(required("ATHENA_S3_STAGING_DIR")?)
            .supabase_url(required("SUPABASE_URL")?)
            .supabase_api_key(required("SUPABASE_API_KEY")?)
            .athena_workgroup(get("ATHENA_WORKGROUP"));

        if let Some(database) = get("ATHENA_DATABASE") {
            builder.athena_database(database);
        }
        if let Some(table) = get("DESTINATION_TABLE") {
            builder.destination_table(table);
        }
        if let Some(ms) = get("ATHENA_POLL_INTERVAL_MS") {
            let ms: u64 = parse("ATHENA_POLL_INTERVAL_MS", &ms)?;
            builder.athena_poll_interval(Duration::from_millis(ms));
        }
        if let Some(size) = get("LOAD_BATCH_SIZE") {
            let size: usize = parse("LOAD_BATCH_SIZE", &size)?;
            if size == 0 {
                return Err(ConfigError::Invalid {
                    key: "LOAD_BATCH_SIZE",
                    message: "must be greater than zero".to_string(),
                });
            }
            builder.batch_size(size);
        }

        builder.build().map_err(|e| ConfigError::Build(e.to_string()))
    }

    pub fn athena(&self) -> AthenaSourceConfig {
        AthenaSourceConfig {
            region: self.aws_region.clone(),
            staging_dir: self.athena_staging_dir.clone(),
            database: self.athena_database.clone(),
            workgroup: self.athena_workgroup.clone(),
            poll_interval: self.athena_poll_interval,
        }
    }
}

fn parse<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        message: e.to_string(),
    })
}
