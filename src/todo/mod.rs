pub mod list;
pub mod tag;
pub mod task;

pub use list::TaskList;
pub use tag::{GroupKey, PALETTE, PaletteColor, TagColorMap, resolve_tag_color};
pub use task::Task;
