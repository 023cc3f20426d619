use crate::{
    error::{KanbanError, Result},
    storage::KeyValueStore,
};
use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

/// In-memory store.
///
/// Clones share the same map, so two handles behave like two views on one
/// browser session store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with one pre-seeded entry
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        if let Ok(mut entries) = store.entries.write() {
            entries.insert(key.to_string(), value.to_string());
        }
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| KanbanError::StorageError(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| KanbanError::StorageError(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
