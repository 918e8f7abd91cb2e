//! Config management use case

use crate::error::{QuoteError, Result};
use crate::infrastructure::{BookRepository, Config, FileSystemRepository};

const VALID_KEYS: &str = "endpoint, sync_interval_secs, export_filename";

/// Service for managing quote book configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "endpoint" => Ok(config.endpoint),
            "sync_interval_secs" => Ok(config.sync_interval_secs.to_string()),
            "export_filename" => Ok(config.export_filename),
            _ => Err(QuoteError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: {}",
                key, VALID_KEYS
            ))),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "endpoint" => config.endpoint = value.to_string(),
            "sync_interval_secs" => {
                config.sync_interval_secs = value.parse().map_err(|_| {
                    QuoteError::Config(format!(
                        "Invalid sync_interval_secs: '{}' (expected whole seconds)",
                        value
                    ))
                })?;
            }
            "export_filename" => config.export_filename = value.to_string(),
            _ => {
                return Err(QuoteError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: {}",
                    key, VALID_KEYS
                )));
            }
        }

        config.validate()?;
        self.repository.save_config(&config)
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}
