use anyhow::Result;
use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::TodoError;
use crate::storage::{Storage, UserId, load_tag_colors, load_tasks, save_tag_colors, save_tasks};
use crate::todo::{PaletteColor, TagColorMap, Task, TaskList};
use crate::view::{
    SearchHit, SearchQuery, TagSummary, TaskGroup, TodoView, ViewState, derive_view,
    favorite_groups, search, tag_overview,
};

/// The logged-in user's data plus the current selection.
///
/// Every mutation that changes something is written through to storage
/// before it returns.
pub struct TodoSession<S: Storage> {
    store: S,
    user: UserId,
    tasks: TaskList,
    colors: TagColorMap,
    pending_delete: Option<i64>,
    pub view_state: ViewState,
}

impl<S: Storage> TodoSession<S> {
    pub fn open(store: S, user: UserId, today: NaiveDate) -> Result<Self> {
        let tasks = load_tasks(&store, &user)?;
        let colors = load_tag_colors(&store, &user)?;
        info!(user = %user, tasks = tasks.len(), "Opened session");
        Ok(Self {
            store,
            user,
            tasks,
            colors,
            pending_delete: None,
            view_state: ViewState::new(today),
        })
    }

    /// Replace the loaded data with another user's. The selection is kept.
    pub fn switch_user(&mut self, user: UserId) -> Result<()> {
        self.tasks = load_tasks(&self.store, &user)?;
        self.colors = load_tag_colors(&self.store, &user)?;
        self.pending_delete = None;
        info!(from = %self.user, to = %user, "Switched user");
        self.user = user;
        Ok(())
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks.tasks
    }

    pub fn task(&self, id: i64) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn tag_colors(&self) -> &TagColorMap {
        &self.colors
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn persist_tasks(&mut self) -> Result<()> {
        save_tasks(&mut self.store, &self.user, &self.tasks)
    }

    fn persist_colors(&mut self) -> Result<()> {
        save_tag_colors(&mut self.store, &self.user, &self.colors)
    }

    fn persist_if(&mut self, changed: bool) -> Result<bool> {
        if changed {
            self.persist_tasks()?;
        }
        Ok(changed)
    }

    /// Returns the new task's id, or `None` when the text was empty.
    pub fn add_task(
        &mut self,
        text: &str,
        due_date: Option<NaiveDate>,
        tag: Option<&str>,
    ) -> Result<Option<i64>> {
        let id = self.tasks.add(text, due_date, tag);
        self.persist_if(id.is_some())?;
        Ok(id)
    }

    pub fn edit_task(
        &mut self,
        id: i64,
        text: &str,
        due_date: Option<NaiveDate>,
        tag: Option<&str>,
    ) -> Result<bool> {
        let changed = self.tasks.edit(id, text, due_date, tag);
        self.persist_if(changed)
    }

    pub fn toggle_completed(&mut self, id: i64) -> Result<bool> {
        let changed = self.tasks.toggle_completed(id);
        self.persist_if(changed)
    }

    pub fn toggle_favorite(&mut self, id: i64) -> Result<bool> {
        let changed = self.tasks.toggle_favorite(id);
        self.persist_if(changed)
    }

    /// First step of deleting: remember which task the user asked about.
    /// Returns `false` if there is no such task.
    pub fn request_delete(&mut self, id: i64) -> bool {
        if self.tasks.get(id).is_none() {
            return false;
        }
        self.pending_delete = Some(id);
        true
    }

    pub fn pending_delete(&self) -> Option<&Task> {
        self.pending_delete.and_then(|id| self.tasks.get(id))
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Delete the task named by the last [`request_delete`](Self::request_delete).
    /// Without a pending request, or if the task is already gone, nothing happens.
    pub fn confirm_delete(&mut self) -> Result<Option<Task>> {
        let Some(id) = self.pending_delete.take() else {
            return Ok(None);
        };
        let removed = self.tasks.delete(id);
        self.persist_if(removed.is_some())?;
        Ok(removed)
    }

    pub fn reorder(&mut self, source_id: i64, target_id: i64) -> Result<bool> {
        let changed = self.tasks.reorder(source_id, target_id);
        self.persist_if(changed)
    }

    pub fn existing_tags(&self) -> Vec<&str> {
        self.tasks.existing_tags()
    }

    /// Rename a tag everywhere. A rename onto an existing tag fails with
    /// [`TodoError::TagExists`](crate::TodoError::TagExists) and changes nothing.
    pub fn rename_tag(&mut self, old: &str, new: &str) -> Result<bool> {
        let renamed = self.tasks.rename_tag(&mut self.colors, old, new)?;
        if renamed {
            self.persist_tasks()?;
            self.persist_colors()?;
        }
        Ok(renamed)
    }

    /// Blank tag names are rejected with [`TodoError::EmptyTag`].
    pub fn set_tag_color(&mut self, tag: &str, color: &str) -> Result<&'static PaletteColor> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(TodoError::EmptyTag.into());
        }
        let color = PaletteColor::parse(color)?;
        self.colors.insert(tag.to_string(), color.value.to_string());
        self.persist_colors()?;
        debug!(tag, color = color.value, "Set tag color");
        Ok(color)
    }

    pub fn current_view(&self) -> TodoView<'_> {
        derive_view(self.tasks(), &self.colors, &self.view_state)
    }

    pub fn search(&self, query: &SearchQuery) -> Vec<SearchHit<'_>> {
        search(self.tasks(), query, &self.colors)
    }

    pub fn favorites(&self) -> Vec<TaskGroup<'_>> {
        favorite_groups(self.tasks(), &self.colors)
    }

    pub fn tags(&self) -> Vec<TagSummary<'_>> {
        tag_overview(self.tasks(), &self.colors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, load_tasks};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn open() -> TodoSession<MemoryStore> {
        TodoSession::open(MemoryStore::new(), UserId::new("alice@example.com"), today()).unwrap()
    }

    #[test]
    fn test_mutations_are_persisted() {
        let mut session = open();
        let id = session.add_task("Report", Some(today()), Some("work")).unwrap().unwrap();
        session.toggle_favorite(id).unwrap();

        let user = session.user().clone();
        let stored = load_tasks(session.store(), &user).unwrap();
        assert_eq!(stored.len(), 1);
        assert!(stored.tasks[0].is_favorite);
    }

    #[test]
    fn test_empty_add_writes_nothing() {
        let mut session = open();
        assert_eq!(session.add_task("   ", None, None).unwrap(), None);
        assert!(session.into_store().is_empty());
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let mut session = open();
        let id = session.add_task("Report", None, None).unwrap().unwrap();

        assert!(session.request_delete(id));
        assert_eq!(session.pending_delete().map(|t| t.id), Some(id));
        session.cancel_delete();
        assert_eq!(session.confirm_delete().unwrap(), None);
        assert_eq!(session.tasks().len(), 1);

        session.request_delete(id);
        let removed = session.confirm_delete().unwrap().unwrap();
        assert_eq!(removed.id, id);
        assert!(session.tasks().is_empty());

        // Already gone
        assert!(!session.request_delete(id));
        assert_eq!(session.confirm_delete().unwrap(), None);
    }

    #[test]
    fn test_rename_tag_rejection_surfaces_error() {
        let mut session = open();
        session.add_task("Dishes", None, Some("home")).unwrap();
        session.add_task("Report", None, Some("work")).unwrap();

        let err = session.rename_tag("home", "work").unwrap_err();
        assert_eq!(
            err.downcast_ref::<TodoError>(),
            Some(&TodoError::TagExists("work".to_string()))
        );
        assert_eq!(session.existing_tags(), vec!["home", "work"]);
    }

    #[test]
    fn test_tag_color_round_trip() {
        let mut session = open();
        session.add_task("Report", None, Some("work")).unwrap();
        session.set_tag_color("work", "Blue").unwrap();
        assert!(session.set_tag_color("work", "teal").is_err());

        let store = session.into_store();
        let session =
            TodoSession::open(store, UserId::new("alice@example.com"), today()).unwrap();
        assert_eq!(session.tags()[0].color.value, "blue");
    }

    #[test]
    fn test_blank_tag_color_is_rejected() {
        let mut session = open();
        let err = session.set_tag_color("   ", "blue").unwrap_err();
        assert_eq!(err.downcast_ref::<TodoError>(), Some(&TodoError::EmptyTag));
        assert!(session.tag_colors().is_empty());
        assert!(session.into_store().is_empty());
    }

    #[test]
    fn test_switch_user_swaps_data() {
        let mut session = open();
        session.add_task("Alice's task", Some(today()), None).unwrap();

        session.switch_user(UserId::new("bob@example.com")).unwrap();
        assert!(session.tasks().is_empty());
        assert!(session.current_view().is_empty());

        session.switch_user(UserId::new("alice@example.com")).unwrap();
        assert_eq!(session.current_view().task_count(), 1);
    }
}
