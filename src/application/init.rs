//! Initialize quote book use case

use crate::application::QuoteBook;
use crate::error::Result;
use crate::infrastructure::{BookRepository, Config, FileSystemRepository};
use log::info;
use std::fs;
use std::path::Path;

/// Initialize a new quote book at the specified path.
///
/// The store starts empty; opening the book seeds the default quotes until
/// the first mutation writes them out.
pub fn init(path: &Path) -> Result<FileSystemRepository> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let repo = FileSystemRepository::new(path.to_path_buf());
    repo.initialize()?;
    repo.save_config(&Config::default())?;

    info!("Initialized quotebook at {}", path.display());
    Ok(repo)
}

/// Open the book stored in `repo`
pub fn open_book(repo: FileSystemRepository) -> Result<QuoteBook<FileSystemRepository>> {
    QuoteBook::open(repo)
}
