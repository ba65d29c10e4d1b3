use anyhow::Result;
use std::collections::HashMap;

use super::store::{Storage, StorageKey};

/// Storage held in memory only. Used by tests and as a scratch backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<StorageKey, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Storage for MemoryStore {
    fn load(&self, key: &StorageKey) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &StorageKey, value: &str) -> Result<()> {
        self.entries.insert(key.clone(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &StorageKey) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}
