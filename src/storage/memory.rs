//! In-memory storage for tests and embedders

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use super::Storage;

/// [`Storage`] that keeps every file in a map
///
/// Directories exist implicitly once a file is added under them, or
/// explicitly via [`MemoryStorage::add_dir`]. Writes to paths registered with
/// [`MemoryStorage::fail_writes_to`] return a `PermissionDenied` error.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    files: RwLock<BTreeMap<PathBuf, String>>,
    dirs: RwLock<BTreeSet<PathBuf>>,
    failing: RwLock<HashSet<PathBuf>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an empty directory
    pub fn add_dir(&self, dir: impl Into<PathBuf>) {
        self.dirs.write().unwrap().insert(dir.into());
    }

    /// Add or replace a file
    pub fn add_file(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        let path = path.into();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.files.write().unwrap().insert(path, contents.into());
    }

    /// Make every future write to `path` fail
    pub fn fail_writes_to(&self, path: impl Into<PathBuf>) {
        self.failing.write().unwrap().insert(path.into());
    }

    /// Current contents of a file, if present
    #[must_use]
    pub fn contents(&self, path: &Path) -> Option<String> {
        self.files.read().unwrap().get(path).cloned()
    }
}

impl Storage for MemoryStorage {
    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        if !self.dirs.read().unwrap().contains(dir) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such directory: {}", dir.display()),
            ));
        }
        Ok(self
            .files
            .read()
            .unwrap()
            .keys()
            .filter(|path| path.parent() == Some(dir))
            .cloned()
            .collect())
    }

    fn read_all_text(&self, path: &Path) -> io::Result<String> {
        self.contents(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            )
        })
    }

    fn write_all_text(&self, path: &Path, contents: &str) -> io::Result<()> {
        if self.failing.read().unwrap().contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("write refused: {}", path.display()),
            ));
        }
        self.add_file(path, contents);
        Ok(())
    }

    fn file_exists(&self, path: &Path) -> bool {
        self.files.read().unwrap().contains_key(path)
    }
}
