//! Dataset-specific error types
//!
//! Loss-log records that fail to match are not errors; they are skipped by the
//! parser and never reach this type.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Dataset load, save and log-reading errors
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The dataset folder does not exist
    #[error("Folder not found: {}", .0.display())]
    FolderNotFound(PathBuf),

    /// A referenced file (e.g. a loss log) does not exist
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Listing or reading failed
    #[error("Error while reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing one item's tag file failed; items written before it stay written
    #[error("Failed to save tags for '{name}' to {}: {source}", path.display())]
    PartialWrite {
        name: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DatasetError {
    /// Map a storage read error, turning `NotFound` into `missing`
    pub(crate) fn from_read(path: PathBuf, source: io::Error, missing: fn(PathBuf) -> Self) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            missing(path)
        } else {
            Self::Read { path, source }
        }
    }
}
