//! Up-to-date checks for build outputs, driven by modification times

use crate::fs::{FileStore, Timestamp};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct UpToDateChecker<F: FileStore> {
    fs: F,
}

impl<F: FileStore> UpToDateChecker<F> {
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    pub fn store(&self) -> &F {
        &self.fs
    }

    pub fn store_mut(&mut self) -> &mut F {
        &mut self.fs
    }

    pub fn into_inner(self) -> F {
        self.fs
    }

    /// A target needs rebuilding when it is missing or any source was
    /// written strictly after it. Every source must exist.
    pub fn needs_update<P: AsRef<Path>>(&self, target: &Path, sources: &[P]) -> Result<bool> {
        Ok(!self.stale_sources(target, sources)?.is_empty() || !self.fs.exists(target))
    }

    /// Sources newer than `target`, in input order. All of them when the
    /// target does not exist yet.
    pub fn stale_sources<P: AsRef<Path>>(
        &self,
        target: &Path,
        sources: &[P],
    ) -> Result<Vec<PathBuf>> {
        let target_time = if self.fs.exists(target) {
            Some(self.mtime(target)?)
        } else {
            None
        };

        let mut stale = Vec::new();
        for source in sources {
            let source = source.as_ref();
            let source_time = self.mtime(source)?;

            match target_time {
                Some(target_time) if source_time <= target_time => {}
                _ => {
                    debug!(
                        ?target,
                        ?source,
                        source_time,
                        ?target_time,
                        "Source is newer than target"
                    );
                    stale.push(source.to_path_buf());
                }
            }
        }

        if target_time.is_none() {
            debug!(?target, "Target does not exist");
        }

        Ok(stale)
    }

    fn mtime(&self, path: &Path) -> Result<Timestamp> {
        self.fs
            .modification_time(path)
            .context(format!("Failed to get modification time of {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::fs::FakeFileStore;

    fn store_with(files: &[(&str, &str)]) -> FakeFileStore {
        let mut fs = FakeFileStore::new();
        for (path, contents) in files {
            fs.write(Path::new(path), contents).unwrap();
        }
        fs
    }

    #[test]
    fn test_missing_target_needs_update() {
        let checker = UpToDateChecker::new(store_with(&[("src/a.vhd", "entity a")]));

        assert!(checker
            .needs_update(Path::new("out/a.o"), &["src/a.vhd"])
            .unwrap());
    }

    #[test]
    fn test_missing_target_without_sources() {
        let checker = UpToDateChecker::new(FakeFileStore::new());
        let sources: [&str; 0] = [];

        assert!(checker.needs_update(Path::new("out/a.o"), &sources).unwrap());
        assert!(checker
            .stale_sources(Path::new("out/a.o"), &sources)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_target_written_after_sources_is_fresh() {
        let mut fs = store_with(&[("src/a.vhd", "entity a")]);
        fs.tick();
        fs.write(Path::new("out/a.o"), "obj").unwrap();
        let checker = UpToDateChecker::new(fs);

        assert!(!checker
            .needs_update(Path::new("out/a.o"), &["src/a.vhd"])
            .unwrap());
    }

    #[test]
    fn test_same_tick_is_fresh() {
        let checker =
            UpToDateChecker::new(store_with(&[("src/a.vhd", "a"), ("out/a.o", "obj")]));

        assert!(!checker
            .needs_update(Path::new("out/a.o"), &["src/a.vhd"])
            .unwrap());
    }

    #[test]
    fn test_rewritten_source_is_stale() {
        let mut checker = UpToDateChecker::new(store_with(&[
            ("src/a.vhd", "a"),
            ("src/b.vhd", "b"),
            ("out/ab.o", "obj"),
        ]));

        checker.store_mut().tick();
        checker
            .store_mut()
            .write(Path::new("src/b.vhd"), "b changed")
            .unwrap();

        let target = Path::new("out/ab.o");
        let sources = ["src/a.vhd", "src/b.vhd"];
        assert!(checker.needs_update(target, &sources).unwrap());
        assert_eq!(
            checker.stale_sources(target, &sources).unwrap(),
            vec![PathBuf::from("src/b.vhd")]
        );
    }

    #[test]
    fn test_missing_source_is_error() {
        let checker = UpToDateChecker::new(store_with(&[("out/a.o", "obj")]));

        let err = checker
            .needs_update(Path::new("out/a.o"), &["src/gone.vhd"])
            .unwrap_err();

        assert!(err.to_string().contains("src/gone.vhd"));
        assert_eq!(
            err.downcast_ref::<StoreError>(),
            Some(&StoreError::NotFound(PathBuf::from("src/gone.vhd")))
        );
    }

    #[test]
    fn test_borrowed_store() {
        let mut fs = store_with(&[("src/a.vhd", "a")]);

        {
            let checker = UpToDateChecker::new(&mut fs);
            assert!(checker
                .needs_update(Path::new("out/a.o"), &["src/a.vhd"])
                .unwrap());
        }

        fs.write(Path::new("out/a.o"), "obj").unwrap();
        assert!(fs.exists(Path::new("out/a.o")));
    }

    #[test]
    fn test_into_inner() {
        let checker = UpToDateChecker::new(store_with(&[("a", "x")]));
        let fs = checker.into_inner();
        assert_eq!(fs.len(), 1);
    }
}
