//! Key-value persistence

use crate::error::Result;
use std::collections::HashMap;

/// Key holding the serialized quote collection
pub const QUOTES_KEY: &str = "quotes";

/// Key holding the last active category filter
pub const SELECTED_CATEGORY_KEY: &str = "selectedCategory";

/// Durable string key-value storage.
///
/// Missing keys read as `None`. Write failures are returned to the caller
/// unchanged; nothing here retries.
pub trait PersistentStore {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store, for embedding and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl PersistentStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
