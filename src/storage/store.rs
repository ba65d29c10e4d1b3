use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a user's data set. The registry uses the account email.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything the application persists. Per-user entries carry the owner,
/// so two users can never address the same entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StorageKey {
    Users,
    CurrentUser,
    Tasks(UserId),
    TagColors(UserId),
}

impl StorageKey {
    /// Stable string form used by backends that need flat keys.
    pub fn encode(&self) -> String {
        match self {
            StorageKey::Users => "users".to_string(),
            StorageKey::CurrentUser => "currentUser".to_string(),
            StorageKey::Tasks(user) => format!("todos/{}", user),
            StorageKey::TagColors(user) => format!("tagColors/{}", user),
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}

/// Key-value persistence for serialized records. Backends store opaque
/// strings; typing and recovery from bad data happen in `records`.
pub trait Storage {
    fn load(&self, key: &StorageKey) -> Result<Option<String>>;
    fn save(&mut self, key: &StorageKey, value: &str) -> Result<()>;
    fn remove(&mut self, key: &StorageKey) -> Result<()>;
}
