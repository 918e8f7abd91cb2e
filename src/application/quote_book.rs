//! Quote book use cases
//!
//! [`QuoteBook`] owns the in-memory collection and the store it mirrors to.
//! Every mutation first reloads `quotes` from the store, so writes made by
//! other books on the same store are kept, then writes the full collection
//! back before returning. If that write fails the mutation is undone, so
//! callers never observe memory and storage disagreeing.

use crate::domain::{
    apply_filter, codec, recompute_categories, CategoryFilter, Quote, QuoteCollection,
};
use crate::error::{QuoteError, Result};
use crate::infrastructure::{PersistentStore, QUOTES_KEY, SELECTED_CATEGORY_KEY};
use log::{debug, info, warn};
use rand::Rng;

/// Quotes a brand new book starts with
pub fn default_quotes() -> Vec<Quote> {
    vec![
        Quote {
            text: "The only limit to our realization of tomorrow is our doubts of today."
                .to_string(),
            category: "Inspiration".to_string(),
        },
        Quote {
            text: "Do not wait to strike till the iron is hot; but make it hot by striking."
                .to_string(),
            category: "Motivation".to_string(),
        },
        Quote {
            text: "The best way to predict the future is to create it.".to_string(),
            category: "Future".to_string(),
        },
    ]
}

/// Collection plus its persisted mirror
#[derive(Debug)]
pub struct QuoteBook<S> {
    store: S,
    collection: QuoteCollection,
}

impl<S: PersistentStore> QuoteBook<S> {
    /// Load the collection from `store`, seeding the default quotes when
    /// nothing has been persisted yet.
    pub fn open(store: S) -> Result<Self> {
        let collection = match load_persisted(&store)? {
            Some(collection) => collection,
            None => {
                debug!("No persisted quotes, seeding defaults");
                QuoteCollection::from_quotes(default_quotes())
            }
        };

        Ok(QuoteBook { store, collection })
    }

    /// Replace the in-memory collection with the persisted one, if any.
    ///
    /// Nothing changes when the store has no `quotes` key yet.
    pub fn reload(&mut self) -> Result<()> {
        if let Some(collection) = load_persisted(&self.store)? {
            self.collection = collection;
        }
        Ok(())
    }

    /// Wrap an existing collection without reading the store
    pub fn with_collection(store: S, collection: QuoteCollection) -> Self {
        QuoteBook { store, collection }
    }

    pub fn snapshot(&self) -> &[Quote] {
        self.collection.snapshot()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Add one quote; empty text or category is rejected without mutation
    pub fn add(&mut self, text: &str, category: &str) -> Result<()> {
        Quote::new(text, category)?;
        self.reload()?;
        let before = self.collection.len();
        self.collection.add(text, category)?;
        self.commit(before)
    }

    /// Append records as-is and persist; returns how many were appended
    pub fn bulk_append(&mut self, records: Vec<Quote>) -> Result<usize> {
        self.reload()?;
        let before = self.collection.len();
        let appended = self.collection.bulk_append(records);
        self.commit(before)?;
        Ok(appended)
    }

    /// Decode an exported JSON file and append its quotes
    pub fn import(&mut self, bytes: &[u8]) -> Result<usize> {
        let records = codec::deserialize(bytes)?;
        let imported = self.bulk_append(records)?;
        info!("Imported {} quotes", imported);
        Ok(imported)
    }

    /// Encode the whole collection for export
    pub fn export(&self) -> Result<Vec<u8>> {
        codec::serialize(self.collection.snapshot())
    }

    pub fn random_quote<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&Quote> {
        self.collection.random_pick(rng)
    }

    /// Distinct categories, first-seen order
    pub fn categories(&self) -> Vec<String> {
        recompute_categories(self.collection.snapshot())
    }

    /// Last persisted filter, or `all` when none was saved or the saved
    /// category no longer exists in the collection.
    pub fn restore_selection(&self) -> Result<CategoryFilter> {
        let Some(persisted) = self.store.get(SELECTED_CATEGORY_KEY)? else {
            return Ok(CategoryFilter::All);
        };

        let selection = match persisted.parse::<CategoryFilter>() {
            Ok(selection) => selection,
            Err(_) => return Ok(CategoryFilter::All),
        };

        if selection.is_available_in(&self.categories()) {
            Ok(selection)
        } else {
            warn!(
                "Saved category '{}' no longer exists, showing all quotes",
                persisted
            );
            Ok(CategoryFilter::All)
        }
    }

    /// Change the active filter and persist it
    pub fn select_filter(&mut self, selection: CategoryFilter) -> Result<()> {
        if !selection.is_available_in(&self.categories()) {
            return Err(QuoteError::UnknownCategory(selection.to_string()));
        }
        self.store.set(SELECTED_CATEGORY_KEY, &selection.to_string())?;
        Ok(())
    }

    /// Quotes shown under the restored filter
    pub fn displayed(&self) -> Result<Vec<&Quote>> {
        let selection = self.restore_selection()?;
        Ok(self.view(&selection))
    }

    /// Quotes matching `selection`, in collection order
    pub fn view(&self, selection: &CategoryFilter) -> Vec<&Quote> {
        apply_filter(self.collection.snapshot(), selection)
    }

    /// Persist the collection, undoing everything past `before` on failure
    fn commit(&mut self, before: usize) -> Result<()> {
        let persisted = codec::serialize_to_string(self.collection.snapshot())
            .and_then(|serialized| self.store.set(QUOTES_KEY, &serialized));

        if let Err(e) = persisted {
            self.collection.truncate(before);
            return Err(e);
        }
        Ok(())
    }
}

fn load_persisted<S: PersistentStore>(store: &S) -> Result<Option<QuoteCollection>> {
    match store.get(QUOTES_KEY)? {
        Some(persisted) => {
            let quotes = codec::deserialize(persisted.as_bytes())?;
            Ok(Some(QuoteCollection::from_quotes(quotes)))
        }
        None => Ok(None),
    }
}
