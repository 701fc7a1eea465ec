//! Read-only commands: tags, items, find

use colored::Colorize;
use serde::Serialize;

use super::Result;
use crate::dataset::Dataset;
use crate::output;
use crate::storage::Storage;

/// Which tag view `tags` prints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagsView {
    pub common: bool,
    pub counts: bool,
    pub json: bool,
}

#[derive(Serialize)]
struct TagsJson<'a> {
    items: usize,
    all_tags: &'a [String],
    common_tags: &'a [String],
}

/// Render the tag listing as lines
///
/// # Errors
/// Returns `TagsetError::JsonError` if JSON serialization fails.
pub fn tag_lines<S: Storage>(dataset: &Dataset<S>, view: TagsView, quiet: bool) -> Result<Vec<String>> {
    let index = dataset.index();

    if view.json {
        let json = serde_json::to_string_pretty(&TagsJson {
            items: dataset.registry().len(),
            all_tags: index.all_tags(),
            common_tags: index.common_tags(),
        })?;
        return Ok(vec![json]);
    }

    let tags = if view.common {
        index.common_tags()
    } else {
        index.all_tags()
    };

    Ok(tags
        .iter()
        .map(|tag| {
            if view.counts {
                output::tag_with_count(tag, index.count(tag), quiet)
            } else if quiet {
                tag.clone()
            } else {
                format!("  {tag}")
            }
        })
        .collect())
}

/// Print all or common tags
///
/// # Errors
/// Returns `TagsetError::JsonError` if JSON serialization fails.
pub fn tags<S: Storage>(dataset: &Dataset<S>, view: TagsView, quiet: bool) -> Result<()> {
    let lines = tag_lines(dataset, view, quiet)?;

    if lines.is_empty() && !view.json {
        let what = if view.common { "common tags" } else { "tags" };
        output::info(&format!("No {what} found in dataset."), quiet);
        return Ok(());
    }

    if !quiet && !view.json {
        let heading = if view.common {
            "Tags common to every item:"
        } else {
            "Tags in dataset:"
        };
        println!("{}", heading.bold());
    }
    for line in lines {
        println!("{line}");
    }
    Ok(())
}

/// Print every item with its tags
pub fn items<S: Storage>(dataset: &Dataset<S>, quiet: bool) {
    let items = dataset.registry().snapshot();
    if items.is_empty() {
        output::info("No images found in folder.", quiet);
        return;
    }
    for item in &items {
        println!("{}", output::item_with_tags(item, quiet));
    }
}

/// Print the identifiers of items carrying `tag`
pub fn find<S: Storage>(dataset: &Dataset<S>, tag: &str, quiet: bool) -> Vec<String> {
    let found = dataset.find_tag(tag);
    if found.is_empty() {
        output::info(&format!("No items tagged '{}'.", tag.to_lowercase()), quiet);
    } else {
        if !quiet {
            println!("{}", format!("Items tagged '{}':", tag.to_lowercase()).bold());
        }
        for name in &found {
            if quiet {
                println!("{name}");
            } else {
                println!("  {name}");
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FsStorage;
    use crate::testing::TestFolder;

    fn dataset(folder: &TestFolder) -> Dataset {
        folder
            .image("a.png")
            .caption("a", "cat, blue_eyes")
            .image("b.png")
            .caption("b", "cat, dog");
        Dataset::open(FsStorage::new(), folder.path()).unwrap()
    }

    #[test]
    fn test_tag_lines_all_and_common() {
        let folder = TestFolder::new();
        let ds = dataset(&folder);
        let all = TagsView { common: false, counts: false, json: false };
        let common = TagsView { common: true, ..all };

        assert_eq!(tag_lines(&ds, all, true).unwrap(), ["blue_eyes", "cat", "dog"]);
        assert_eq!(tag_lines(&ds, common, true).unwrap(), ["cat"]);
    }

    #[test]
    fn test_tag_lines_counts() {
        let folder = TestFolder::new();
        let ds = dataset(&folder);
        let view = TagsView { common: true, counts: true, json: false };
        assert_eq!(
            tag_lines(&ds, view, false).unwrap(),
            ["  cat (used by 2 item(s))"]
        );
    }

    #[test]
    fn test_tag_lines_json() {
        let folder = TestFolder::new();
        let ds = dataset(&folder);
        let view = TagsView { common: false, counts: false, json: true };
        let lines = tag_lines(&ds, view, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(value["items"], 2);
        assert_eq!(value["common_tags"], serde_json::json!(["cat"]));
        assert_eq!(value["all_tags"], serde_json::json!(["blue_eyes", "cat", "dog"]));
    }

    #[test]
    fn test_find() {
        let folder = TestFolder::new();
        let ds = dataset(&folder);
        assert_eq!(find(&ds, "DOG", true), ["b"]);
        assert!(find(&ds, "bird", true).is_empty());
    }
}
