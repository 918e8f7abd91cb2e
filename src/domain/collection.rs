//! In-memory quote collection

use crate::domain::Quote;
use crate::error::{QuoteError, Result};
use rand::Rng;

/// Ordered sequence of quotes.
///
/// Insertion order is the only ordering guarantee. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteCollection {
    quotes: Vec<Quote>,
}

impl QuoteCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        QuoteCollection::default()
    }

    /// Build a collection from records already in storage order
    pub fn from_quotes(quotes: Vec<Quote>) -> Self {
        QuoteCollection { quotes }
    }

    /// Validate and append a single quote
    pub fn add(&mut self, text: &str, category: &str) -> Result<()> {
        let quote = Quote::new(text, category)?;
        self.quotes.push(quote);
        Ok(())
    }

    /// Append records in order without de-duplication
    pub fn bulk_append<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = Quote>,
    {
        let before = self.quotes.len();
        self.quotes.extend(records);
        self.quotes.len() - before
    }

    /// Current records, in insertion order
    pub fn snapshot(&self) -> &[Quote] {
        &self.quotes
    }

    /// Pick one record uniformly at random
    pub fn random_pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&Quote> {
        if self.quotes.is_empty() {
            return Err(QuoteError::EmptyCollection);
        }
        let index = rng.random_range(0..self.quotes.len());
        Ok(&self.quotes[index])
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Drop records past `len`; used to undo an append whose write failed
    pub(crate) fn truncate(&mut self, len: usize) {
        self.quotes.truncate(len);
    }
}
