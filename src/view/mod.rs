//! Pure derivations from a task list and the current UI selection to what
//! gets rendered: the period view, search results, and favorites.

pub mod favorites;
pub mod grouping;
pub mod model;
pub mod period;
pub mod search;
pub mod status;

pub use favorites::favorite_groups;
pub use grouping::{TaskGroup, group_and_sort, group_by_tag, partition_by_completion};
pub use model::{TagSummary, TodoView, ViewState, derive_view, tag_overview};
pub use period::{PeriodAnchors, PeriodTab, week_end, week_start};
pub use search::{SearchHit, SearchQuery, TagFilter, search};
pub use status::StatusFilter;
