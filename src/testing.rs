//! Testing utilities for tagset
//!
//! This module provides [`TestFolder`], a temporary dataset folder on disk
//! that is removed when dropped.
//!
//! Only available when compiled with `cfg(test)`.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Temporary dataset folder on the real filesystem
///
/// # Examples
/// ```ignore
/// let folder = TestFolder::new();
/// folder.image("a.png").caption("a", "cat, dog");
/// assert_eq!(folder.read_caption("a").as_deref(), Some("cat, dog"));
/// ```
pub struct TestFolder {
    dir: TempDir,
}

impl TestFolder {
    /// Create an empty folder
    ///
    /// # Panics
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp folder"),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a placeholder image file
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn image(&self, file_name: &str) -> &Self {
        fs::write(self.dir.path().join(file_name), b"not really an image")
            .expect("Failed to write test image");
        self
    }

    /// Write the caption file for identifier `name`
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn caption(&self, name: &str, text: &str) -> &Self {
        fs::write(self.caption_path(name), text).expect("Failed to write test caption");
        self
    }

    #[must_use]
    pub fn caption_path(&self, name: &str) -> PathBuf {
        self.dir.path().join(format!("{name}.txt"))
    }

    /// Caption file contents, if the file exists
    #[must_use]
    pub fn read_caption(&self, name: &str) -> Option<String> {
        fs::read_to_string(self.caption_path(name)).ok()
    }
}

impl Default for TestFolder {
    fn default() -> Self {
        Self::new()
    }
}
