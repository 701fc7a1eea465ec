//! Bulk edit commands: add, remove, replace, set

use super::{EditReport, Result, finish_edit};
use crate::TagsetError;
use crate::dataset::Dataset;
use crate::storage::Storage;
use crate::tags::AddPosition;

/// Add `tag` to every item
///
/// # Errors
/// Returns an error if saving fails.
pub fn add<S: Storage>(
    dataset: &mut Dataset<S>,
    tag: &str,
    position: AddPosition,
    dry_run: bool,
    quiet: bool,
) -> Result<EditReport> {
    let changed = dataset.add_tag_to_all(tag, position);
    finish_edit(dataset, changed, dry_run, quiet)
}

/// Remove `tag` from every item
///
/// # Errors
/// Returns an error if saving fails.
pub fn remove<S: Storage>(
    dataset: &mut Dataset<S>,
    tag: &str,
    dry_run: bool,
    quiet: bool,
) -> Result<EditReport> {
    let changed = dataset.delete_tag_from_all(tag);
    finish_edit(dataset, changed, dry_run, quiet)
}

/// Rename `src` to `dst` in every item
///
/// # Errors
/// Returns `TagsetError::InvalidInput` if `src` and `dst` are the same tag,
/// which would otherwise delete it everywhere. Returns an error if saving fails.
pub fn replace<S: Storage>(
    dataset: &mut Dataset<S>,
    src: &str,
    dst: &str,
    dry_run: bool,
    quiet: bool,
) -> Result<EditReport> {
    if src.to_lowercase() == dst.to_lowercase() {
        return Err(TagsetError::InvalidInput(format!(
            "Cannot replace '{src}' with itself"
        )));
    }
    let changed = dataset.replace_tag_in_all(src, dst);
    finish_edit(dataset, changed, dry_run, quiet)
}

/// Give every item (or every untagged item) the list `tags`
///
/// # Errors
/// Returns an error if saving fails.
pub fn set<S: Storage>(
    dataset: &mut Dataset<S>,
    tags: &[String],
    only_empty: bool,
    dry_run: bool,
    quiet: bool,
) -> Result<EditReport> {
    let changed = dataset.set_tag_list_to_all(tags, only_empty);
    finish_edit(dataset, changed, dry_run, quiet)
}
