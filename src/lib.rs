//! buildfs - in-memory file store for testing build tools
//!
//! Build logic is written against the [`FileStore`] trait. Tests hand it a
//! [`FakeFileStore`], which keeps files in memory and stamps every write
//! with a logical clock that only advances on [`FakeFileStore::tick`].
//!
//! # Example
//!
//! ```
//! use buildfs::{FakeFileStore, FileStore, UpToDateChecker};
//! use std::path::Path;
//!
//! let mut fs = FakeFileStore::new();
//! fs.write(Path::new("src/top.vhd"), "entity top is end;").unwrap();
//! fs.tick();
//! fs.write(Path::new("out/top.o"), "obj").unwrap();
//!
//! let checker = UpToDateChecker::new(fs);
//! assert!(!checker.needs_update(Path::new("out/top.o"), &["src/top.vhd"]).unwrap());
//! ```

pub mod error;
pub mod freshness;
pub mod fs;
pub mod util;

pub use error::StoreError;
pub use freshness::UpToDateChecker;
pub use fs::{FakeFileStore, FileRecord, FileStore, Timestamp};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const NAME: &str = env!("CARGO_PKG_NAME");
