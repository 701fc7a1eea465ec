//! Dataset-wide tag indices
//!
//! A [`TagIndex`] is a snapshot. It goes stale as soon as any item's tags
//! change and must be rebuilt with [`TagIndex::refresh`].

use std::collections::{BTreeMap, HashSet};

use crate::dataset::Registry;

/// Union and intersection of every item's tags, both sorted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagIndex {
    all_tags: Vec<String>,
    common_tags: Vec<String>,
    counts: BTreeMap<String, usize>,
}

impl TagIndex {
    /// Rebuild both views from `registry`
    ///
    /// Each tag is counted once per item that carries it, so repeats inside one
    /// list do not skew anything. A tag is common when its count equals the
    /// number of items; an empty registry therefore has no common tags.
    #[must_use]
    pub fn refresh(registry: &Registry) -> Self {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut items = 0;
        for item in registry.iter() {
            items += 1;
            let distinct: HashSet<&str> = item.tags.iter().map(String::as_str).collect();
            for tag in distinct {
                *counts.entry(tag.to_string()).or_default() += 1;
            }
        }

        let all_tags: Vec<String> = counts.keys().cloned().collect();
        let common_tags = if items == 0 {
            Vec::new()
        } else {
            counts
                .iter()
                .filter(|&(_, &count)| count == items)
                .map(|(tag, _)| tag.clone())
                .collect()
        };

        Self {
            all_tags,
            common_tags,
            counts,
        }
    }

    /// Every distinct tag in the dataset, sorted
    #[must_use]
    pub fn all_tags(&self) -> &[String] {
        &self.all_tags
    }

    /// Tags carried by every item, sorted
    #[must_use]
    pub fn common_tags(&self) -> &[String] {
        &self.common_tags
    }

    /// Number of items carrying `tag`
    #[must_use]
    pub fn count(&self, tag: &str) -> usize {
        self.counts.get(tag).copied().unwrap_or(0)
    }

    /// `(tag, item count)` pairs in tag order
    pub fn counts(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(tag, &count)| (tag.as_str(), count))
    }
}
