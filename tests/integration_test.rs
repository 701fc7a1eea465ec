//! Integration tests for tagset
//!
//! These tests build real dataset folders in temporary directories and drive
//! the public API through load, index, edit, save and reload.

use std::fs;
use std::path::Path;

use tagset::dataset::{Dataset, DatasetError, Registry};
use tagset::storage::FsStorage;
use tagset::tags::{AddPosition, TagIndex};
use tagset::tracker::compute_fingerprint;
use tempfile::TempDir;

/// Helper function to create an image file and optional caption
fn add_image(dir: &Path, file: &str, caption: Option<&str>) {
    fs::write(dir.join(file), b"image bytes").unwrap();
    if let Some(caption) = caption {
        let stem = Path::new(file).file_stem().unwrap().to_string_lossy();
        fs::write(dir.join(format!("{stem}.txt")), caption).unwrap();
    }
}

fn read_caption(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(format!("{name}.txt"))).unwrap()
}

#[test]
fn test_load_index_scenario() {
    let dir = TempDir::new().unwrap();
    add_image(dir.path(), "a.png", Some("cat, blue_eyes"));
    add_image(dir.path(), "b.jpg", Some("cat,dog"));
    fs::write(dir.path().join("readme.md"), "not an image").unwrap();

    let dataset = Dataset::open(FsStorage::new(), dir.path()).unwrap();
    assert_eq!(dataset.registry().len(), 2);
    assert_eq!(dataset.index().all_tags(), ["blue_eyes", "cat", "dog"]);
    assert_eq!(dataset.index().common_tags(), ["cat"]);
}

#[test]
fn test_empty_folder_has_no_common_tags() {
    let dir = TempDir::new().unwrap();
    let dataset = Dataset::open(FsStorage::new(), dir.path()).unwrap();
    assert!(dataset.registry().is_empty());
    assert!(dataset.index().common_tags().is_empty());
    assert!(!dataset.is_dirty());
}

#[test]
fn test_missing_folder() {
    let dir = TempDir::new().unwrap();
    let err = Dataset::open(FsStorage::new(), dir.path().join("gone")).unwrap_err();
    assert!(matches!(err, DatasetError::FolderNotFound(_)));
}

#[test]
fn test_subdirectories_are_ignored() {
    let dir = TempDir::new().unwrap();
    add_image(dir.path(), "top.png", None);
    fs::create_dir(dir.path().join("nested")).unwrap();
    add_image(&dir.path().join("nested"), "deep.png", None);

    let dataset = Dataset::open(FsStorage::new(), dir.path()).unwrap();
    assert_eq!(dataset.registry().names(), vec!["top"]);
}

#[test]
fn test_edit_save_reload_cycle() {
    let dir = TempDir::new().unwrap();
    add_image(dir.path(), "a.png", Some("x, y, z"));
    add_image(dir.path(), "b.png", Some("Blue Eyes, y"));
    add_image(dir.path(), "c.png", None);

    let mut dataset = Dataset::open(FsStorage::new(), dir.path()).unwrap();
    assert!(!dataset.is_dirty());

    dataset.add_tag_to_all("Cat", AddPosition::Custom(1));
    dataset.replace_tag_in_all("y", "why");
    assert!(dataset.is_dirty());

    dataset.save().unwrap();
    assert!(!dataset.is_dirty());

    assert_eq!(read_caption(dir.path(), "a"), "x, cat, why, z");
    // loaded tags keep their case; only bulk-edit arguments are lowercased
    assert_eq!(read_caption(dir.path(), "b"), "Blue Eyes, cat, why");
    assert_eq!(read_caption(dir.path(), "c"), "cat");

    let reloaded = Dataset::open(FsStorage::new(), dir.path()).unwrap();
    assert_eq!(
        compute_fingerprint(reloaded.registry()),
        compute_fingerprint(dataset.registry())
    );
}

#[test]
fn test_add_down_twice_keeps_single_tail() {
    let dir = TempDir::new().unwrap();
    add_image(dir.path(), "a.png", Some("t, x"));
    add_image(dir.path(), "b.png", Some("y"));

    let mut dataset = Dataset::open(FsStorage::new(), dir.path()).unwrap();
    dataset.add_tag_to_all("t", AddPosition::Down);
    dataset.add_tag_to_all("t", AddPosition::Down);

    for item in dataset.registry().snapshot() {
        let tags = item.tags.as_slice();
        assert_eq!(tags.iter().filter(|t| *t == "t").count(), 1);
        assert_eq!(tags.last().map(String::as_str), Some("t"));
    }
}

#[test]
fn test_loss_log_scenario() {
    let dir = TempDir::new().unwrap();
    add_image(dir.path(), "img001.png", Some("cat"));
    let log = dir.path().join("train.log");
    fs::write(
        &log,
        "epoch 3\n\
         Loss statistics for file img001.png\n\
         loss:0.1234±0.01\n\
         recent 50 loss:0.0987±0.02\n\
         Loss statistics for file img999.png\n\
         loss:0.5±0.01\n\
         recent 50 loss:0.4±0.02\n",
    )
    .unwrap();

    let mut dataset = Dataset::open(FsStorage::new(), dir.path()).unwrap();
    let summary = dataset.load_loss(&log).unwrap();
    assert_eq!(summary.matched, 1);
    assert_eq!(summary.unmatched, 1);

    let item = dataset.registry().get("img001").unwrap();
    assert_eq!(item.loss, Some(0.1234));
    assert_eq!(item.last_loss, Some(0.0987));
}

#[test]
fn test_index_over_registry_built_by_hand() {
    let registry = Registry::new();
    let index = TagIndex::refresh(&registry);
    assert!(index.all_tags().is_empty());
    assert!(index.common_tags().is_empty());
}

#[cfg(unix)]
#[test]
fn test_partial_write_failure_reports_item() {
    let dir = TempDir::new().unwrap();
    add_image(dir.path(), "a.png", Some("x"));
    add_image(dir.path(), "b.png", Some("y"));

    let mut dataset = Dataset::open(FsStorage::new(), dir.path()).unwrap();
    dataset.add_tag_to_all("new", AddPosition::Top);

    // a directory squatting on b.txt makes the write fail
    fs::remove_file(dir.path().join("b.txt")).unwrap();
    fs::create_dir(dir.path().join("b.txt")).unwrap();

    let err = dataset.save().unwrap_err();
    assert!(matches!(&err, DatasetError::PartialWrite { name, .. } if name == "b"));
    assert_eq!(read_caption(dir.path(), "a"), "new, x");
    assert!(dataset.is_dirty());
}
