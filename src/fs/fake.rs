use super::{FileStore, Result, Timestamp};
use crate::error::StoreError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub contents: String,
    pub modified_at: Timestamp,
}

/// In-memory [`FileStore`] driven by a logical clock.
///
/// The clock starts at zero and only moves when [`tick`](Self::tick) is
/// called, so modification order in a test is exactly the order the test
/// wrote it in.
///
/// Paths are stored verbatim: `"a.txt"` and `"./a.txt"` are two files.
/// Removing a file drops its timestamp as well.
#[derive(Debug, Default)]
pub struct FakeFileStore {
    files: HashMap<PathBuf, FileRecord>,
    current_time: Timestamp,
}

impl FakeFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self) {
        self.current_time += 1;
        debug!(time = self.current_time, "Clock advanced");
    }

    pub fn record(&self, path: &Path) -> Option<&FileRecord> {
        self.files.get(path)
    }

    /// Stored paths, sorted
    pub fn paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self.files.keys().cloned().collect();
        paths.sort();
        paths
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn not_found(path: &Path) -> StoreError {
        StoreError::NotFound(path.to_path_buf())
    }
}

impl FileStore for FakeFileStore {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn read(&self, path: &Path) -> Result<String> {
        trace!(?path, "Reading file");
        self.files
            .get(path)
            .map(|record| record.contents.clone())
            .ok_or_else(|| Self::not_found(path))
    }

    fn write(&mut self, path: &Path, contents: &str) -> Result<()> {
        debug!(?path, time = self.current_time, "Writing file");
        self.files.insert(
            path.to_path_buf(),
            FileRecord {
                contents: contents.to_string(),
                modified_at: self.current_time,
            },
        );
        Ok(())
    }

    fn remove(&mut self, path: &Path) -> Result<()> {
        debug!(?path, "Removing file");
        self.files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(path))
    }

    fn modification_time(&self, path: &Path) -> Result<Timestamp> {
        self.files
            .get(path)
            .map(|record| record.modified_at)
            .ok_or_else(|| Self::not_found(path))
    }

    fn current_time(&self) -> Timestamp {
        self.current_time
    }
}
