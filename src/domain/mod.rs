//! Domain layer - Quote records, collection and category logic

pub mod codec;
pub mod collection;
pub mod filter;
pub mod quote;

pub use collection::QuoteCollection;
pub use filter::{apply_filter, recompute_categories, CategoryFilter, ALL_CATEGORIES};
pub use quote::Quote;
