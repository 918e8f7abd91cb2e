//! Category index and category filtering
//!
//! The category index is always derived from the collection, never stored.
//! A filter selection is either `all` or one category name from the index.

use crate::domain::Quote;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Text form of [`CategoryFilter::All`], shared with persisted state
pub const ALL_CATEGORIES: &str = "all";

/// Active filter selection
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Show every quote
    #[default]
    All,
    /// Show only quotes in one category
    Category(String),
}

impl CategoryFilter {
    /// Whether a quote belongs in the displayed view
    pub fn matches(&self, quote: &Quote) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(category) => quote.category == *category,
        }
    }

    /// Whether this selection still exists in the given category index
    pub fn is_available_in(&self, categories: &[String]) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(category) => categories.contains(category),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    /// `"all"` always means every category; anything non-empty is a category name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL_CATEGORIES {
            Ok(CategoryFilter::All)
        } else if s.is_empty() {
            Err("Category filter cannot be empty".to_string())
        } else {
            Ok(CategoryFilter::Category(s.to_string()))
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL_CATEGORIES),
            CategoryFilter::Category(category) => f.write_str(category),
        }
    }
}

/// Distinct categories in order of first occurrence
pub fn recompute_categories(quotes: &[Quote]) -> Vec<String> {
    let mut seen = HashSet::new();
    quotes
        .iter()
        .filter(|quote| seen.insert(quote.category.as_str()))
        .map(|quote| quote.category.clone())
        .collect()
}

/// Quotes matching the selection, in collection order
pub fn apply_filter<'a>(quotes: &'a [Quote], selection: &CategoryFilter) -> Vec<&'a Quote> {
    quotes
        .iter()
        .filter(|quote| selection.matches(quote))
        .collect()
}
