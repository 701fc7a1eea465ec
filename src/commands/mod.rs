//! Command implementations
//!
//! Each command is a function taking an opened dataset and parsed CLI values.
//! Editing commands share [`finish_edit`], which refreshes the index and saves
//! only when the change tracker reports unsaved changes.

pub mod config;
pub mod edit;
pub mod loss;
pub mod show;

use crate::dataset::Dataset;
use crate::storage::Storage;
use crate::{TagsetError, output};

type Result<T> = std::result::Result<T, TagsetError>;

/// What an editing command did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditReport {
    /// Items whose tag list changed
    pub changed: usize,
    /// Caption files written, or `None` if nothing was saved
    pub saved: Option<usize>,
}

/// Refresh the index and persist if dirty
///
/// # Errors
/// Returns `TagsetError::DatasetError` if a caption file cannot be written.
pub fn finish_edit<S: Storage>(
    dataset: &mut Dataset<S>,
    changed: usize,
    dry_run: bool,
    quiet: bool,
) -> Result<EditReport> {
    dataset.refresh_index();

    if !dataset.is_dirty() {
        output::info("No changes to save.", quiet);
        return Ok(EditReport { changed, saved: None });
    }

    if dry_run {
        output::warning(
            &format!("Dry run: {changed} item(s) would change, nothing written."),
            quiet,
        );
        return Ok(EditReport { changed, saved: None });
    }

    let written = dataset.save()?;
    output::success(
        &format!("Updated {changed} item(s), wrote {written} caption file(s)."),
        quiet,
    );
    Ok(EditReport {
        changed,
        saved: Some(written),
    })
}
