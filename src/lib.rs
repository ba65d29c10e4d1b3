pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod storage;
pub mod todo;
pub mod utils;
pub mod view;

pub use error::TodoError;
