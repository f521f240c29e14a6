// src/bucket/config.rs

use derive_builder::Builder;

/// Default number of rows sent to the destination in one request.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

#[derive(Debug, Clone, Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct Config {
    /// Maximum number of items handed to the processor in one call
    #[builder(default = "DEFAULT_BATCH_SIZE")]
    pub(crate) batch_size: usize,
}

impl ConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.batch_size {
            Some(0) => Err("batch_size must be greater than zero".to_string()),
            _ => Ok(()),
        }
    }
}

impl Config {
    /// Returns the batch size for processing
    #[inline]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_batch_size() {
        let config = ConfigBuilder::default().build().unwrap();
        assert_eq!(config.batch_size(), 1000);
        assert_eq!(Config::default().batch_size(), 1000);
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let err = ConfigBuilder::default().batch_size(0usize).build().unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }
}
