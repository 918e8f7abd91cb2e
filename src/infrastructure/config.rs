//! Configuration management

use crate::error::{QuoteError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/posts";
pub const DEFAULT_SYNC_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_EXPORT_FILENAME: &str = "quotes.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote posts endpoint used for both pull (GET) and push (POST)
    pub endpoint: String,
    pub sync_interval_secs: u64,
    pub export_filename: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            sync_interval_secs: DEFAULT_SYNC_INTERVAL_SECS,
            export_filename: DEFAULT_EXPORT_FILENAME.to_string(),
        }
    }
}

impl Config {
    /// Load config from .quotebook/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(".quotebook").join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                QuoteError::NotQuoteDirectory(path.to_path_buf())
            } else {
                QuoteError::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| QuoteError::Config(format!("Failed to parse config.toml: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to .quotebook/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let book_dir = path.join(".quotebook");
        let config_path = book_dir.join("config.toml");

        if !book_dir.exists() {
            fs::create_dir(&book_dir)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Period between sync cycles
    pub fn sync_interval(&self) -> Duration {
        Duration::from_secs(self.sync_interval_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(QuoteError::Config("endpoint cannot be empty".to_string()));
        }
        if self.sync_interval_secs == 0 {
            return Err(QuoteError::Config(
                "sync_interval_secs must be greater than zero".to_string(),
            ));
        }
        if self.export_filename.trim().is_empty() {
            return Err(QuoteError::Config(
                "export_filename cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
