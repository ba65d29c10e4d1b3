pub mod session;

pub use session::TodoSession;
