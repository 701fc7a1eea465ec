//! Dataset-wide tag edits
//!
//! Every operation visits every item in the registry. Item order does not
//! matter because each edit only touches one item's list; within a list, the
//! relative order of untouched tags is always preserved. Tags passed to
//! `add`, `delete` and `replace` are lowercased first.
//!
//! Each function returns the number of items whose list it changed.

use super::{AddPosition, TagList};
use crate::dataset::Registry;

/// Add `tag` to every item at the place `position` selects
///
/// An item that already has the tag gets it moved rather than duplicated.
pub fn add_tag_to_all(registry: &mut Registry, tag: &str, position: AddPosition) -> usize {
    let tag = tag.to_lowercase();
    let mut changed = 0;
    registry.for_each_mut(|item| {
        let before = item.tags.clone();
        item.tags.add(&tag, position);
        if item.tags != before {
            changed += 1;
        }
    });
    tracing::debug!(tag = %tag, ?position, changed, "added tag to all items");
    changed
}

/// Give every item the list `tags`
///
/// With `only_empty`, items that already have tags are left alone; otherwise
/// every list is replaced. Tags are stored as given.
pub fn set_tag_list_to_all(registry: &mut Registry, tags: &[String], only_empty: bool) -> usize {
    let mut changed = 0;
    registry.for_each_mut(|item| {
        if only_empty && !item.tags.is_empty() {
            return;
        }
        let replacement = TagList::from(tags.to_vec());
        if item.tags != replacement {
            item.tags = replacement;
            changed += 1;
        }
    });
    tracing::debug!(tags = tags.len(), only_empty, changed, "set tag list on items");
    changed
}

/// Remove the first occurrence of `tag` from every item that has it
pub fn delete_tag_from_all(registry: &mut Registry, tag: &str) -> usize {
    let tag = tag.to_lowercase();
    let mut changed = 0;
    registry.for_each_mut(|item| {
        if item.tags.remove(&tag) {
            changed += 1;
        }
    });
    tracing::debug!(tag = %tag, changed, "deleted tag from items");
    changed
}

/// Rename `src` to `dst` in every item that has `src`
///
/// Items that already carry `dst` just lose `src`.
pub fn replace_tag_in_all(registry: &mut Registry, src: &str, dst: &str) -> usize {
    let src = src.to_lowercase();
    let dst = dst.to_lowercase();
    let mut changed = 0;
    registry.for_each_mut(|item| {
        if item.tags.rename(&src, &dst) {
            changed += 1;
        }
    });
    tracing::debug!(src = %src, dst = %dst, changed, "replaced tag in items");
    changed
}
