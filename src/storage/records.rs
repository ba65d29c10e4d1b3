//! Typed records on top of a [`Storage`] backend.
//!
//! Stored values that fail to parse are treated as absent: the caller gets an
//! empty default and a warning is logged. Only backend failures propagate.

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use super::store::{Storage, StorageKey, UserId};
use crate::todo::{TagColorMap, Task, TaskList};

/// Load and deserialize `key`, falling back to `T::default()` when the entry
/// is missing or malformed.
pub fn load_or_default<T, S>(store: &S, key: &StorageKey) -> Result<T>
where
    T: DeserializeOwned + Default,
    S: Storage + ?Sized,
{
    let Some(raw) = store.load(key)? else {
        return Ok(T::default());
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(e) => {
            warn!(key = %key, error = %e, "Discarding malformed stored data");
            Ok(T::default())
        }
    }
}

pub fn save_json<T, S>(store: &mut S, key: &StorageKey, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    S: Storage + ?Sized,
{
    let raw = serde_json::to_string(value)
        .with_context(|| format!("Failed to serialize {}", key))?;
    store.save(key, &raw)
}

/// Parse a stored task array. Records written before `order` existed get
/// their list index; every other field is taken as stored.
pub fn parse_tasks(raw: &str) -> serde_json::Result<Vec<Task>> {
    let records: Vec<Value> = serde_json::from_str(raw)?;
    records
        .into_iter()
        .enumerate()
        .map(|(index, mut record)| {
            if let Value::Object(fields) = &mut record
                && !fields.contains_key("order")
            {
                fields.insert("order".to_string(), Value::from(index as i64));
            }
            serde_json::from_value(record)
        })
        .collect()
}

pub fn load_tasks<S: Storage + ?Sized>(store: &S, user: &UserId) -> Result<TaskList> {
    let key = StorageKey::Tasks(user.clone());
    let Some(raw) = store.load(&key)? else {
        return Ok(TaskList::new());
    };
    match parse_tasks(&raw) {
        Ok(tasks) => Ok(TaskList::with_tasks(tasks)),
        Err(e) => {
            warn!(user = %user, error = %e, "Failed to parse stored tasks, starting empty");
            Ok(TaskList::new())
        }
    }
}

pub fn save_tasks<S: Storage + ?Sized>(store: &mut S, user: &UserId, list: &TaskList) -> Result<()> {
    save_json(store, &StorageKey::Tasks(user.clone()), &list.tasks)
}

pub fn load_tag_colors<S: Storage + ?Sized>(store: &S, user: &UserId) -> Result<TagColorMap> {
    load_or_default(store, &StorageKey::TagColors(user.clone()))
}

pub fn save_tag_colors<S: Storage + ?Sized>(
    store: &mut S,
    user: &UserId,
    colors: &TagColorMap,
) -> Result<()> {
    save_json(store, &StorageKey::TagColors(user.clone()), colors)
}
