pub mod file;
pub mod memory;
pub mod records;
pub mod store;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use records::{load_tag_colors, load_tasks, save_tag_colors, save_tasks};
pub use store::{Storage, StorageKey, UserId};
