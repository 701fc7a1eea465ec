//! Tagset - tag management for image captioning datasets
//!
//! A dataset is a folder of images, each with a sibling `.txt` caption file
//! holding a comma-separated tag list. This library loads such a folder,
//! indexes its tags, applies bulk edits across every item, merges training
//! loss logs and writes the captions back, tracking unsaved changes along
//! the way.
//!
//! ```no_run
//! use tagset::dataset::Dataset;
//! use tagset::storage::FsStorage;
//! use tagset::tags::AddPosition;
//!
//! let mut dataset = Dataset::open(FsStorage::new(), "my_dataset").unwrap();
//! dataset.add_tag_to_all("solo", AddPosition::Top);
//! dataset.refresh_index();
//! if dataset.is_dirty() {
//!     dataset.save().unwrap();
//! }
//! ```

use thiserror::Error;

pub mod cli;
pub mod commands;
pub mod config;
pub mod dataset;
pub mod loss;
pub mod output;
pub mod storage;
pub mod tags;
pub mod tracker;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum TagsetError {
    /// Dataset load/save error
    #[error("Dataset error: {0}")]
    DatasetError(#[from] dataset::DatasetError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents a JSON output error
    #[error("Serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
