//! FileStore trait definition

use crate::error::StoreError;
use std::path::Path;

/// Logical modification time
pub type Timestamp = u64;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Abstraction over the file operations a build needs, so tests can swap
/// in an in-memory store
pub trait FileStore {
    /// Check if a file has current contents
    fn exists(&self, path: &Path) -> bool;

    /// Read file contents as string
    fn read(&self, path: &Path) -> Result<String>;

    /// Create or replace a file, stamping it with the current time
    fn write(&mut self, path: &Path, contents: &str) -> Result<()>;

    /// Delete a file
    fn remove(&mut self, path: &Path) -> Result<()>;

    /// Time of the last write to a file
    fn modification_time(&self, path: &Path) -> Result<Timestamp>;

    /// Current logical time
    fn current_time(&self) -> Timestamp;
}

impl<S: FileStore + ?Sized> FileStore for &mut S {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn read(&self, path: &Path) -> Result<String> {
        (**self).read(path)
    }

    fn write(&mut self, path: &Path, contents: &str) -> Result<()> {
        (**self).write(path, contents)
    }

    fn remove(&mut self, path: &Path) -> Result<()> {
        (**self).remove(path)
    }

    fn modification_time(&self, path: &Path) -> Result<Timestamp> {
        (**self).modification_time(path)
    }

    fn current_time(&self) -> Timestamp {
        (**self).current_time()
    }
}
