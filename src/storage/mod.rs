//! Storage collaborator
//!
//! The dataset engine never touches the filesystem directly. Every read, write
//! and directory listing goes through the [`Storage`] trait so the same code
//! runs against the real disk ([`FsStorage`]) or an in-memory tree
//! ([`MemoryStorage`]).

mod memory;

pub use memory::MemoryStorage;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Minimal file access needed by the dataset engine
///
/// Implementations must be shareable across threads: folder loading reads
/// tag files from a rayon pool.
pub trait Storage: Send + Sync {
    /// List the regular files directly under `dir` (non-recursive).
    ///
    /// # Errors
    /// Returns an `io::Error` with kind `NotFound` if `dir` does not exist.
    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    /// Read the whole file as UTF-8 text.
    ///
    /// # Errors
    /// Returns an `io::Error` if the file cannot be read.
    fn read_all_text(&self, path: &Path) -> io::Result<String>;

    /// Write `contents` to `path`, replacing anything already there.
    ///
    /// # Errors
    /// Returns an `io::Error` if the file cannot be written.
    fn write_all_text(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Whether a file exists at `path`.
    fn file_exists(&self, path: &Path) -> bool;
}

/// [`Storage`] backed by `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStorage;

impl FsStorage {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Storage for FsStorage {
    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.push(entry.path());
            }
        }
        Ok(files)
    }

    fn read_all_text(&self, path: &Path) -> io::Result<String> {
        let bytes = fs::read(path)?;
        let text = String::from_utf8_lossy(&bytes);
        Ok(text.strip_prefix('\u{feff}').unwrap_or(&text).to_string())
    }

    fn write_all_text(&self, path: &Path, contents: &str) -> io::Result<()> {
        fs::write(path, contents)
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fs_list_files_skips_directories() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.png"), b"").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("b.png"), b"").unwrap();

        let files = FsStorage::new().list_files(dir.path()).unwrap();
        assert_eq!(files, vec![dir.path().join("a.png")]);
    }

    #[test]
    fn test_fs_list_missing_dir_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = FsStorage::new()
            .list_files(&dir.path().join("missing"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_fs_read_tolerates_invalid_utf8_and_bom() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, b"\xef\xbb\xbfcat, d\xffg").unwrap();

        let text = FsStorage::new().read_all_text(&path).unwrap();
        assert_eq!(text, "cat, d\u{fffd}g");
    }

    #[test]
    fn test_fs_write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.txt");
        let storage = FsStorage::new();

        assert!(!storage.file_exists(&path));
        storage.write_all_text(&path, "cat, dog").unwrap();
        assert!(storage.file_exists(&path));
        assert_eq!(storage.read_all_text(&path).unwrap(), "cat, dog");
    }
}
