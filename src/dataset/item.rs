//! A single dataset entry

use std::path::{Path, PathBuf};

use super::DatasetError;
use crate::storage::Storage;
use crate::tags::TagList;

/// One image paired with its caption tags
#[derive(Debug, Clone, PartialEq)]
pub struct DataItem {
    /// Image base name without extension; unique within a registry
    pub name: String,
    pub image_path: PathBuf,
    /// Caption file: the image path with a `.txt` extension
    pub text_path: PathBuf,
    pub tags: TagList,
    /// Overall loss from a training log, if one was merged
    pub loss: Option<f32>,
    /// Recent-window loss from a training log, if one was merged
    pub last_loss: Option<f32>,
}

impl DataItem {
    /// Build an item for `image_path` with no tags
    ///
    /// Returns `None` if the path has no file name to derive an identifier from.
    #[must_use]
    pub fn new(image_path: impl Into<PathBuf>) -> Option<Self> {
        let image_path = image_path.into();
        let name = identifier_for(&image_path)?;
        let text_path = image_path.with_extension("txt");
        Some(Self {
            name,
            image_path,
            text_path,
            tags: TagList::new(),
            loss: None,
            last_loss: None,
        })
    }

    /// Build an item and read its caption file, if there is one
    ///
    /// # Errors
    /// Returns `DatasetError::Read` if the caption file exists but cannot be read.
    pub fn load<S: Storage + ?Sized>(
        storage: &S,
        image_path: impl Into<PathBuf>,
    ) -> Result<Option<Self>, DatasetError> {
        let Some(mut item) = Self::new(image_path) else {
            return Ok(None);
        };
        if storage.file_exists(&item.text_path) {
            let text = storage
                .read_all_text(&item.text_path)
                .map_err(|source| DatasetError::Read {
                    path: item.text_path.clone(),
                    source,
                })?;
            item.tags = TagList::parse(&text);
        }
        Ok(Some(item))
    }
}

/// File name without its final extension
pub(crate) fn identifier_for(path: &Path) -> Option<String> {
    path.file_stem().map(|stem| stem.to_string_lossy().into_owned())
}
