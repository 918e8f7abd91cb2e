//! Quote record

use crate::error::{QuoteError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single quote with the category it is filed under.
///
/// Quotes have no identity: two quotes with the same text and category are
/// equal, and a collection may hold both.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub category: String,
}

impl Quote {
    /// Create a quote, rejecting empty text or category.
    ///
    /// Only emptiness is checked; whitespace-only values are accepted as-is.
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Result<Self> {
        let quote = Quote {
            text: text.into(),
            category: category.into(),
        };
        quote.validate()?;
        Ok(quote)
    }

    /// Check the non-empty invariant on an already-built record
    pub fn validate(&self) -> Result<()> {
        match (self.text.is_empty(), self.category.is_empty()) {
            (false, false) => Ok(()),
            (true, true) => Err(QuoteError::Validation(
                "quote text and category are empty".to_string(),
            )),
            (true, false) => Err(QuoteError::Validation("quote text is empty".to_string())),
            (false, true) => Err(QuoteError::Validation("category is empty".to_string())),
        }
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" - {}", self.text, self.category)
    }
}
