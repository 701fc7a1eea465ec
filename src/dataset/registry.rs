//! The item registry
//!
//! Maps identifiers to items. Folder loading builds items on a rayon pool and
//! inserts them concurrently; every other operation is expected to be
//! serialized by the caller.

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rayon::prelude::*;

use super::item::identifier_for;
use super::{DataItem, DatasetError};
use crate::storage::Storage;

/// Image extensions picked up by a folder load
pub const DEFAULT_IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "png", "bmp", "jpeg"];

/// Identifier -> item map for one loaded folder
#[derive(Debug, Default)]
pub struct Registry {
    items: DashMap<String, DataItem>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every image directly under `folder` using the default extensions
    ///
    /// # Errors
    /// See [`Registry::load_folder_with_extensions`].
    pub fn load_folder<S: Storage + ?Sized>(storage: &S, folder: &Path) -> Result<Self, DatasetError> {
        Self::load_folder_with_extensions(storage, folder, &DEFAULT_IMAGE_EXTENSIONS)
    }

    /// Load every image directly under `folder` whose extension is in `extensions`
    ///
    /// Extensions are compared case-insensitively, with or without a leading
    /// dot. When several files share an identifier (`a.jpg` and `a.png`), the
    /// lexicographically smallest path is kept.
    ///
    /// # Errors
    /// Returns `DatasetError::FolderNotFound` if `folder` does not exist, or
    /// `DatasetError::Read` if listing the folder or reading a caption fails.
    pub fn load_folder_with_extensions<S, E>(
        storage: &S,
        folder: &Path,
        extensions: &[E],
    ) -> Result<Self, DatasetError>
    where
        S: Storage + ?Sized,
        E: AsRef<str>,
    {
        let files = storage.list_files(folder).map_err(|source| {
            DatasetError::from_read(folder.to_path_buf(), source, DatasetError::FolderNotFound)
        })?;
        let images = select_images(files, extensions);

        let registry = Self::new();
        images.par_iter().try_for_each(|path| {
            if let Some(item) = DataItem::load(storage, path)? {
                registry.insert_if_absent(item);
            }
            Ok::<(), DatasetError>(())
        })?;

        tracing::info!(folder = %folder.display(), items = registry.len(), "loaded dataset");
        Ok(registry)
    }

    /// Insert `item` unless its identifier is already taken
    ///
    /// Safe to call from several threads at once; exactly one caller wins for a
    /// given identifier. Returns whether `item` was inserted.
    pub fn insert_if_absent(&self, item: DataItem) -> bool {
        match self.items.entry(item.name.clone()) {
            Entry::Occupied(existing) => {
                tracing::debug!(
                    name = %item.name,
                    kept = %existing.get().image_path.display(),
                    dropped = %item.image_path.display(),
                    "duplicate identifier"
                );
                false
            }
            Entry::Vacant(slot) => {
                slot.insert(item);
                true
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<impl Deref<Target = DataItem> + '_> {
        self.items.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<impl DerefMut<Target = DataItem> + '_> {
        self.items.get_mut(name)
    }

    /// Iterate items in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = impl Deref<Target = DataItem> + '_> + '_ {
        self.items.iter()
    }

    /// Apply `f` to every item, in unspecified order
    pub fn for_each_mut(&mut self, mut f: impl FnMut(&mut DataItem)) {
        for mut entry in self.items.iter_mut() {
            f(entry.value_mut());
        }
    }

    /// Identifiers in sorted order
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.items.iter().map(|e| e.key().clone()).collect();
        names.sort_unstable();
        names
    }

    /// Clone of every item, sorted by identifier
    #[must_use]
    pub fn snapshot(&self) -> Vec<DataItem> {
        let mut items: Vec<DataItem> = self.items.iter().map(|e| e.value().clone()).collect();
        items.sort_unstable_by(|a, b| a.name.cmp(&b.name));
        items
    }

    /// Identifiers of every item carrying `tag` (compared lowercased), sorted
    #[must_use]
    pub fn find_tag(&self, tag: &str) -> Vec<String> {
        let tag = tag.to_lowercase();
        let mut found: Vec<String> = self
            .items
            .iter()
            .filter(|e| e.tags.contains(&tag))
            .map(|e| e.key().clone())
            .collect();
        found.sort_unstable();
        found
    }

    /// Record loss metrics for `name`; returns false if there is no such item
    pub fn set_loss(&mut self, name: &str, loss: f32, last_loss: f32) -> bool {
        match self.items.get_mut(name) {
            Some(mut item) => {
                item.loss = Some(loss);
                item.last_loss = Some(last_loss);
                true
            }
            None => false,
        }
    }

    /// Write every item's tags to its caption file, in identifier order
    ///
    /// Returns the number of files written.
    ///
    /// # Errors
    /// Returns `DatasetError::PartialWrite` for the first item that fails.
    /// Items written before it are left on disk.
    pub fn save_all<S: Storage + ?Sized>(&self, storage: &S) -> Result<usize, DatasetError> {
        let mut written = 0;
        for name in self.names() {
            let Some(item) = self.items.get(&name) else {
                continue;
            };
            storage
                .write_all_text(&item.text_path, &item.tags.joined())
                .map_err(|source| {
                    tracing::warn!(name = %name, written, "save aborted");
                    DatasetError::PartialWrite {
                        name: name.clone(),
                        path: item.text_path.clone(),
                        source,
                    }
                })?;
            written += 1;
        }
        tracing::info!(written, "saved tag files");
        Ok(written)
    }
}

impl FromIterator<DataItem> for Registry {
    fn from_iter<I: IntoIterator<Item = DataItem>>(iter: I) -> Self {
        let registry = Self::new();
        for item in iter {
            registry.insert_if_absent(item);
        }
        registry
    }
}

/// Keep image files with a wanted extension, one path per identifier
fn select_images<E: AsRef<str>>(mut files: Vec<PathBuf>, extensions: &[E]) -> Vec<PathBuf> {
    files.sort();
    let mut chosen: HashMap<String, PathBuf> = HashMap::new();
    for path in files {
        if !has_extension(&path, extensions) {
            continue;
        }
        let Some(name) = identifier_for(&path) else {
            continue;
        };
        if let Some(kept) = chosen.get(&name) {
            tracing::debug!(
                name = %name,
                kept = %kept.display(),
                dropped = %path.display(),
                "duplicate identifier"
            );
            continue;
        }
        chosen.insert(name, path);
    }
    chosen.into_values().collect()
}

fn has_extension<E: AsRef<str>>(path: &Path, extensions: &[E]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    extensions
        .iter()
        .any(|wanted| wanted.as_ref().trim_start_matches('.').eq_ignore_ascii_case(ext))
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod registry_tests;
