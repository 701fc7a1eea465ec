//! Dataset engine
//!
//! A [`Dataset`] is one loaded folder: the [`Registry`] of items, the last
//! [`TagIndex`] snapshot and a [`ChangeTracker`] baseline, all reading and
//! writing through a [`Storage`].
//!
//! The expected flow is load, refresh the index, edit, check
//! [`Dataset::is_dirty`], then [`Dataset::save`]. Calls must be serialized by
//! the caller; only the folder load itself runs in parallel.

pub mod error;
pub mod item;
pub mod registry;

pub use error::DatasetError;
pub use item::DataItem;
pub use registry::{DEFAULT_IMAGE_EXTENSIONS, Registry};

use std::path::{Path, PathBuf};

use crate::loss::{self, LossSummary};
use crate::storage::{FsStorage, Storage};
use crate::tags::{self, AddPosition, TagIndex};
use crate::tracker::ChangeTracker;

/// One loaded dataset folder
#[derive(Debug)]
pub struct Dataset<S: Storage = FsStorage> {
    storage: S,
    folder: PathBuf,
    registry: Registry,
    index: TagIndex,
    tracker: ChangeTracker,
}

impl<S: Storage> Dataset<S> {
    /// Load `folder` with the default image extensions
    ///
    /// The index is built and the change baseline taken before returning.
    ///
    /// # Errors
    /// Returns `DatasetError` if the folder is missing or a caption cannot be read.
    pub fn open(storage: S, folder: impl Into<PathBuf>) -> Result<Self, DatasetError> {
        Self::open_with_extensions(storage, folder, &DEFAULT_IMAGE_EXTENSIONS)
    }

    /// Load `folder`, picking up images with the given extensions
    ///
    /// # Errors
    /// Returns `DatasetError` if the folder is missing or a caption cannot be read.
    pub fn open_with_extensions<E: AsRef<str>>(
        storage: S,
        folder: impl Into<PathBuf>,
        extensions: &[E],
    ) -> Result<Self, DatasetError> {
        let folder = folder.into();
        let registry = Registry::load_folder_with_extensions(&storage, &folder, extensions)?;
        let index = TagIndex::refresh(&registry);
        let tracker = ChangeTracker::new(&registry);
        Ok(Self {
            storage,
            folder,
            registry,
            index,
            tracker,
        })
    }

    #[must_use]
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Direct access for single-item edits
    ///
    /// The index is not refreshed automatically afterwards.
    pub const fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// The index as of the last [`Dataset::refresh_index`]
    #[must_use]
    pub const fn index(&self) -> &TagIndex {
        &self.index
    }

    pub fn refresh_index(&mut self) -> &TagIndex {
        self.index = TagIndex::refresh(&self.registry);
        &self.index
    }

    #[must_use]
    pub fn find_tag(&self, tag: &str) -> Vec<String> {
        self.registry.find_tag(tag)
    }

    pub fn add_tag_to_all(&mut self, tag: &str, position: AddPosition) -> usize {
        tags::add_tag_to_all(&mut self.registry, tag, position)
    }

    pub fn set_tag_list_to_all(&mut self, list: &[String], only_empty: bool) -> usize {
        tags::set_tag_list_to_all(&mut self.registry, list, only_empty)
    }

    pub fn delete_tag_from_all(&mut self, tag: &str) -> usize {
        tags::delete_tag_from_all(&mut self.registry, tag)
    }

    pub fn replace_tag_in_all(&mut self, src: &str, dst: &str) -> usize {
        tags::replace_tag_in_all(&mut self.registry, src, dst)
    }

    /// Merge a loss log into the items
    ///
    /// # Errors
    /// Returns `DatasetError` if the log is missing or unreadable.
    pub fn load_loss(&mut self, path: &Path) -> Result<LossSummary, DatasetError> {
        loss::load_loss(&mut self.registry, &self.storage, path)
    }

    /// Whether tags changed since load or the last baseline
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.tracker.is_dirty(&self.registry)
    }

    pub fn mark_baseline(&mut self) {
        self.tracker.mark_baseline(&self.registry);
    }

    /// Write every caption file without touching the baseline
    ///
    /// # Errors
    /// Returns `DatasetError::PartialWrite` naming the first item that failed.
    pub fn save_all(&self) -> Result<usize, DatasetError> {
        self.registry.save_all(&self.storage)
    }

    /// Write every caption file, then take a new baseline
    ///
    /// On failure the baseline is kept, so the dataset stays dirty.
    ///
    /// # Errors
    /// Returns `DatasetError::PartialWrite` naming the first item that failed.
    pub fn save(&mut self) -> Result<usize, DatasetError> {
        let written = self.save_all()?;
        self.mark_baseline();
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn dataset() -> Dataset<MemoryStorage> {
        let storage = MemoryStorage::new();
        storage.add_file("/data/a.png", "");
        storage.add_file("/data/a.txt", "cat, blue_eyes");
        storage.add_file("/data/b.jpg", "");
        storage.add_file("/data/b.txt", "cat, dog");
        Dataset::open(storage, "/data").unwrap()
    }

    #[test]
    fn test_open_builds_index() {
        let ds = dataset();
        assert_eq!(ds.registry().len(), 2);
        assert_eq!(ds.index().all_tags(), ["blue_eyes", "cat", "dog"]);
        assert_eq!(ds.index().common_tags(), ["cat"]);
        assert!(!ds.is_dirty());
    }

    #[test]
    fn test_index_is_a_snapshot() {
        let mut ds = dataset();
        ds.delete_tag_from_all("cat");
        assert_eq!(ds.index().common_tags(), ["cat"]);
        assert!(ds.refresh_index().common_tags().is_empty());
    }

    #[test]
    fn test_dirty_until_saved() {
        let mut ds = dataset();
        ds.add_tag_to_all("solo", AddPosition::Top);
        assert!(ds.is_dirty());

        assert_eq!(ds.save().unwrap(), 2);
        assert!(!ds.is_dirty());
        assert_eq!(
            ds.storage().contents(Path::new("/data/a.txt")).as_deref(),
            Some("solo, cat, blue_eyes")
        );
    }

    #[test]
    fn test_failed_save_stays_dirty() {
        let mut ds = dataset();
        ds.storage().fail_writes_to("/data/b.txt");
        ds.replace_tag_in_all("cat", "kitten");

        let err = ds.save().unwrap_err();
        assert!(matches!(err, DatasetError::PartialWrite { ref name, .. } if name == "b"));
        assert!(ds.is_dirty());
    }

    #[test]
    fn test_find_and_loss() {
        let mut ds = dataset();
        ds.storage().add_file(
            "/logs/train.log",
            "Loss statistics for file b.jpg\nloss:0.3±0\nrecent 5 loss:0.2±0\n",
        );
        assert_eq!(ds.find_tag("Dog"), vec!["b"]);

        let summary = ds.load_loss(Path::new("/logs/train.log")).unwrap();
        assert_eq!(summary.matched, 1);
        assert_eq!(ds.registry().get("b").unwrap().loss, Some(0.3));
        assert!(!ds.is_dirty());
    }
}
