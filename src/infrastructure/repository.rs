//! File system repository

use crate::error::{QuoteError, Result};
use crate::infrastructure::{Config, PersistentStore};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

const BOOK_DIR: &str = ".quotebook";
const STORE_DIR: &str = "store";

/// Abstract repository for quote book directories
pub trait BookRepository {
    /// Load configuration from .quotebook/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .quotebook/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .quotebook directory exists
    fn is_initialized(&self) -> bool;

    /// Create .quotebook directory structure
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of BookRepository.
///
/// Also serves as the durable [`PersistentStore`]: each key is one file
/// under `.quotebook/store/`.
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Discover the quote book root by walking up from current directory
    /// First checks QUOTEBOOK_ROOT environment variable, then falls back to discovery
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("QUOTEBOOK_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_book_dir(&path) {
                return Ok(FileSystemRepository::new(path));
            } else {
                return Err(QuoteError::Config(format!(
                    "QUOTEBOOK_ROOT is set to '{}' but no .quotebook directory found. \
                    Run 'quotebook init' in that directory or unset QUOTEBOOK_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover the quote book root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_book_dir(&current) {
                return Ok(FileSystemRepository::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Err(QuoteError::NotQuoteDirectory(start.to_path_buf())),
            }
        }
    }

    fn has_book_dir(path: &Path) -> bool {
        path.join(BOOK_DIR).is_dir()
    }

    fn store_dir(&self) -> PathBuf {
        self.root.join(BOOK_DIR).join(STORE_DIR)
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(QuoteError::Config(format!("Invalid store key: '{}'", key)));
        }
        Ok(self.store_dir().join(key))
    }
}

impl BookRepository for FileSystemRepository {
    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_book_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let book_dir = self.root.join(BOOK_DIR);

        if book_dir.exists() {
            return Err(QuoteError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir_all(self.store_dir())?;
        Ok(())
    }
}

impl PersistentStore for FileSystemRepository {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(QuoteError::Io(e)),
        }
    }

    /// Best-effort atomic replace: write a temp file next to the target,
    /// then rename it into place.
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;
        let dir = self.store_dir();
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let tmp_path = dir.join(format!("{}.tmp-{}", key, std::process::id()));
        fs::write(&tmp_path, value)?;

        // On Windows, `rename` does not overwrite existing files.
        #[cfg(windows)]
        if path.exists() {
            fs::remove_file(&path)?;
        }

        fs::rename(&tmp_path, &path)?;
        debug!("Persisted '{}' ({} bytes)", key, value.len());
        Ok(())
    }
}
