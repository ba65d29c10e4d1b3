use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::store::{Storage, StorageKey};

/// Storage backed by a single JSON document mapping encoded keys to values.
/// The whole document is rewritten on every change.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read store {}", path.display()))?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)
                    .with_context(|| format!("Store {} is not a JSON object", path.display()))?
            }
        } else {
            BTreeMap::new()
        };
        debug!(path = %path.display(), entries = entries.len(), "Opened file store");
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write store {}", self.path.display()))?;
        Ok(())
    }
}

impl Storage for FileStore {
    fn load(&self, key: &StorageKey) -> Result<Option<String>> {
        Ok(self.entries.get(&key.encode()).cloned())
    }

    fn save(&mut self, key: &StorageKey, value: &str) -> Result<()> {
        self.entries.insert(key.encode(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &StorageKey) -> Result<()> {
        if self.entries.remove(&key.encode()).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}
