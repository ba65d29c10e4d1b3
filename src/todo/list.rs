use super::Task;
use super::tag::TagColorMap;
use super::task::normalize_tag;
use crate::error::TodoError;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashSet;
use tracing::{debug, info};

/// A user's tasks in display order. List position is the only ordering that
/// matters; `Task::order` is never consulted here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    pub tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn get(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn position(&self, id: i64) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// Pick an id for a task created at `now_ms`, stepping past the current
    /// maximum if the timestamp is already taken.
    fn next_id(&self, now_ms: i64) -> i64 {
        if self.get(now_ms).is_none() {
            return now_ms;
        }
        self.tasks.iter().map(|t| t.id).max().unwrap_or(now_ms) + 1
    }

    /// Append a new task. Returns `None` without touching the list when the
    /// trimmed text is empty.
    pub fn add(&mut self, text: &str, due_date: Option<NaiveDate>, tag: Option<&str>) -> Option<i64> {
        self.add_at(text, due_date, tag, Utc::now())
    }

    pub fn add_at(
        &mut self,
        text: &str,
        due_date: Option<NaiveDate>,
        tag: Option<&str>,
        now: DateTime<Utc>,
    ) -> Option<i64> {
        let text = text.trim();
        if text.is_empty() {
            debug!("Ignoring task with empty text");
            return None;
        }

        let id = self.next_id(now.timestamp_millis());
        let order = self.tasks.len() as i64;
        self.tasks.push(Task::new(id, text, due_date, tag, order, now));
        info!(id, "Added task");
        Some(id)
    }

    /// Replace text, due date and tag of a task. Returns `false` and leaves the
    /// list untouched for empty text or an unknown id.
    pub fn edit(
        &mut self,
        id: i64,
        text: &str,
        due_date: Option<NaiveDate>,
        tag: Option<&str>,
    ) -> bool {
        let text = text.trim();
        if text.is_empty() {
            debug!(id, "Ignoring edit with empty text");
            return false;
        }
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        task.text = text.to_string();
        task.due_date = due_date;
        task.tag = normalize_tag(tag);
        info!(id, "Edited task");
        true
    }

    pub fn toggle_completed(&mut self, id: i64) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        }
    }

    pub fn toggle_favorite(&mut self, id: i64) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.is_favorite = !task.is_favorite;
                true
            }
            None => false,
        }
    }

    /// Remove a task. Deleting an id that is already gone is a no-op.
    pub fn delete(&mut self, id: i64) -> Option<Task> {
        let index = self.position(id)?;
        info!(id, "Deleted task");
        Some(self.tasks.remove(index))
    }

    /// Move `source_id` to the position currently held by `target_id`.
    ///
    /// Only open tasks within the same tag group can be reordered; every other
    /// combination (including dropping a task onto itself) leaves the list as
    /// it was and returns `false`.
    pub fn reorder(&mut self, source_id: i64, target_id: i64) -> bool {
        if source_id == target_id {
            return false;
        }
        let (Some(from), Some(to)) = (self.position(source_id), self.position(target_id)) else {
            return false;
        };

        let source = &self.tasks[from];
        let target = &self.tasks[to];
        if source.completed || target.completed || source.group_key() != target.group_key() {
            debug!(source_id, target_id, "Reorder rejected");
            return false;
        }

        let task = self.tasks.remove(from);
        self.tasks.insert(to, task);
        true
    }

    /// Unique non-empty tags in order of first appearance.
    pub fn existing_tags(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.tasks
            .iter()
            .filter_map(|t| t.tag.as_deref())
            .filter(|tag| seen.insert(*tag))
            .collect()
    }

    /// Rename a tag on every task carrying it, moving its color along.
    ///
    /// An empty new name, one equal to `old`, or an `old` no task carries
    /// cancels the rename and returns `Ok(false)`. Renaming onto a tag that
    /// already exists is rejected.
    pub fn rename_tag(
        &mut self,
        colors: &mut TagColorMap,
        old: &str,
        new: &str,
    ) -> Result<bool, TodoError> {
        let new = new.trim();
        if new.is_empty() || new == old {
            return Ok(false);
        }
        if !self.tasks.iter().any(|t| t.has_tag(old)) {
            debug!(old, "Rename of unused tag ignored");
            return Ok(false);
        }
        if self.existing_tags().contains(&new) {
            return Err(TodoError::TagExists(new.to_string()));
        }

        for task in self.tasks.iter_mut().filter(|t| t.has_tag(old)) {
            task.tag = Some(new.to_string());
        }
        if let Some(color) = colors.remove(old) {
            colors.insert(new.to_string(), color);
        }

        info!(old, new, "Renamed tag");
        Ok(true)
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }
}
