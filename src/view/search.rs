use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use super::period::format_day;
use crate::todo::tag::resolve_group_color;
use crate::todo::{PaletteColor, TagColorMap, Task};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TagFilter {
    #[default]
    All,
    Untagged,
    Tag(String),
}

impl TagFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            TagFilter::All => true,
            TagFilter::Untagged => task.tag.is_none(),
            TagFilter::Tag(tag) => task.has_tag(tag),
        }
    }
}

impl fmt::Display for TagFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagFilter::All => write!(f, "all"),
            TagFilter::Untagged => write!(f, "untagged"),
            TagFilter::Tag(tag) => write!(f, "{}", tag),
        }
    }
}

impl FromStr for TagFilter {
    type Err = String;

    /// `all` and `untagged` are reserved; anything else names a tag exactly.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Err("Tag filter must not be empty".to_string()),
            "all" => Ok(TagFilter::All),
            "untagged" => Ok(TagFilter::Untagged),
            tag => Ok(TagFilter::Tag(tag.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    pub tag: TagFilter,
    pub keyword: String,
}

impl SearchQuery {
    pub fn new(tag: TagFilter, keyword: impl Into<String>) -> Self {
        Self {
            tag,
            keyword: keyword.into(),
        }
    }

    fn matches_keyword(needle: &str, task: &Task) -> bool {
        if needle.is_empty() {
            return true;
        }
        task.text.to_lowercase().contains(needle)
            || task
                .tag
                .as_deref()
                .is_some_and(|tag| tag.to_lowercase().contains(needle))
    }
}

/// One search result with what a result row displays.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit<'a> {
    pub task: &'a Task,
    pub completed: bool,
    pub due_date: Option<NaiveDate>,
    /// `YYYY.MM.DD`, absent when the task has no due date.
    pub due_label: Option<String>,
    pub color: &'static PaletteColor,
}

/// Search the whole task list, ignoring period and status filters.
pub fn search<'a>(tasks: &'a [Task], query: &SearchQuery, colors: &TagColorMap) -> Vec<SearchHit<'a>> {
    let needle = query.keyword.trim().to_lowercase();

    let hits: Vec<SearchHit<'a>> = tasks
        .iter()
        .filter(|t| query.tag.matches(t))
        .filter(|t| SearchQuery::matches_keyword(&needle, t))
        .map(|task| SearchHit {
            task,
            completed: task.completed,
            due_date: task.due_date,
            due_label: task.due_date.map(format_day),
            color: resolve_group_color(colors, &task.group_key()),
        })
        .collect();

    debug!(tag = %query.tag, keyword = %needle, hits = hits.len(), "Search");
    hits
}
