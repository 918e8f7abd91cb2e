//! Error types for quotebook

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for quotebook
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("Not a quotebook directory: {0}")]
    NotQuoteDirectory(PathBuf),

    #[error("Invalid quote: {0}")]
    Validation(String),

    #[error("Malformed quote data: {0}")]
    Parse(String),

    #[error("Remote endpoint error: {0}")]
    Transport(String),

    #[error("No quotes available")]
    EmptyCollection,

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl From<reqwest::Error> for QuoteError {
    fn from(err: reqwest::Error) -> Self {
        QuoteError::Transport(err.to_string())
    }
}

impl QuoteError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            QuoteError::NotQuoteDirectory(_) => 2,
            QuoteError::Validation(_) => 3,
            QuoteError::Parse(_) => 4,
            QuoteError::EmptyCollection => 5,
            QuoteError::UnknownCategory(_) => 6,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            QuoteError::NotQuoteDirectory(path) => {
                format!(
                    "Not a quotebook directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'quotebook init' in this directory to create a new quote book\n\
                    • Navigate to an existing quotebook directory\n\
                    • Set QUOTEBOOK_ROOT environment variable to your quote book path",
                    path.display()
                )
            }
            QuoteError::Validation(msg) => {
                format!(
                    "Invalid quote: {}\n\n\
                    Both a quote text and a category are required.\n\
                    Example: quotebook add \"Stay hungry, stay foolish.\" Motivation",
                    msg
                )
            }
            QuoteError::Parse(msg) => {
                format!(
                    "Malformed quote data: {}\n\n\
                    Expected a JSON array of objects, for example:\n\
                    [{{\"text\": \"...\", \"category\": \"...\"}}]",
                    msg
                )
            }
            QuoteError::EmptyCollection => "No quotes available\n\n\
                Suggestions:\n\
                • Add one with 'quotebook add <TEXT> <CATEGORY>'\n\
                • Import a file with 'quotebook import quotes.json'"
                .to_string(),
            QuoteError::UnknownCategory(category) => {
                format!(
                    "Unknown category: '{}'\n\n\
                    Suggestions:\n\
                    • Use 'quotebook categories' to see available categories\n\
                    • Use 'all' to show every quote",
                    category
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using QuoteError
pub type Result<T> = std::result::Result<T, QuoteError>;
