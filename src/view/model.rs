use chrono::NaiveDate;
use tracing::debug;

use super::grouping::{TaskGroup, group_and_sort};
use super::period::{PeriodAnchors, PeriodTab};
use super::status::StatusFilter;
use crate::todo::{PaletteColor, TagColorMap, Task, resolve_tag_color};

/// UI selection state the main list is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub tab: PeriodTab,
    pub anchors: PeriodAnchors,
    pub status: StatusFilter,
}

impl ViewState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            tab: PeriodTab::default(),
            anchors: PeriodAnchors::new(today),
            status: StatusFilter::default(),
        }
    }

    pub fn with_tab(mut self, tab: PeriodTab) -> Self {
        self.tab = tab;
        self
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn next_period(&mut self) {
        self.anchors.next(self.tab);
    }

    pub fn previous_period(&mut self) {
        self.anchors.previous(self.tab);
    }

    pub fn includes(&self, task: &Task) -> bool {
        self.status.matches(task) && self.anchors.contains(self.tab, task.due_date)
    }
}

/// The main list as the renderer consumes it.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoView<'a> {
    pub tab: PeriodTab,
    pub status: StatusFilter,
    /// Human label of the selected period, e.g. `2024.03.10 ~ 2024.03.16`.
    pub period_label: String,
    pub groups: Vec<TaskGroup<'a>>,
}

impl TodoView<'_> {
    pub fn task_count(&self) -> usize {
        self.groups.iter().map(|g| g.tasks.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Filter by period and status, group by tag, and sink completed tasks.
pub fn derive_view<'a>(tasks: &'a [Task], colors: &TagColorMap, state: &ViewState) -> TodoView<'a> {
    let groups = group_and_sort(tasks.iter().filter(|t| state.includes(t)), colors);
    let view = TodoView {
        tab: state.tab,
        status: state.status,
        period_label: state.anchors.label(state.tab),
        groups,
    };
    debug!(
        tab = %view.tab,
        status = %view.status,
        period = %view.period_label,
        tasks = view.task_count(),
        "Derived view"
    );
    view
}

/// A tag in use, with its color and how many tasks carry it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSummary<'a> {
    pub tag: &'a str,
    pub color: &'static PaletteColor,
    pub count: usize,
}

/// Every tag in use, in order of first appearance.
pub fn tag_overview<'a>(tasks: &'a [Task], colors: &TagColorMap) -> Vec<TagSummary<'a>> {
    let mut summaries: Vec<TagSummary<'a>> = Vec::new();
    for tag in tasks.iter().filter_map(|t| t.tag.as_deref()) {
        match summaries.iter_mut().find(|s| s.tag == tag) {
            Some(summary) => summary.count += 1,
            None => summaries.push(TagSummary {
                tag,
                color: resolve_tag_color(colors, tag),
                count: 1,
            }),
        }
    }
    summaries
}
