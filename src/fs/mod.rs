//! FileStore abstraction with an in-memory fake for tests

mod fake;
mod r#trait;

pub use fake::{FakeFileStore, FileRecord};
pub use r#trait::{FileStore, Result, Timestamp};
