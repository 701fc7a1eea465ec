//! Unsaved-change detection
//!
//! The dataset's tag content is summarized as a fingerprint. A baseline is
//! taken after loading and after every save; the dataset is dirty whenever
//! the current fingerprint differs from it.

use std::hash::{DefaultHasher, Hash, Hasher};

use crate::dataset::Registry;

const MULTIPLIER: u64 = 31;

/// Fingerprint of every item's tag content
///
/// Items are combined in identifier order, so the result depends only on the
/// `identifier -> tags` content and never on map iteration order. Each item
/// contributes the hash of its persisted tag line.
#[must_use]
pub fn compute_fingerprint(registry: &Registry) -> u64 {
    let mut hashes: Vec<(String, u64)> = registry
        .iter()
        .map(|item| (item.name.clone(), content_hash(&item.tags.joined())))
        .collect();
    hashes.sort_unstable_by(|a, b| a.0.cmp(&b.0));
    hashes
        .iter()
        .fold(0u64, |acc, (_, hash)| acc.wrapping_mul(MULTIPLIER).wrapping_add(*hash))
}

fn content_hash(joined: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    joined.hash(&mut hasher);
    hasher.finish()
}

/// Baseline fingerprint plus the dirty check against it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeTracker {
    baseline: u64,
}

impl ChangeTracker {
    /// Start tracking with `registry`'s current content as the baseline
    #[must_use]
    pub fn new(registry: &Registry) -> Self {
        Self {
            baseline: compute_fingerprint(registry),
        }
    }

    pub fn mark_baseline(&mut self, registry: &Registry) {
        self.baseline = compute_fingerprint(registry);
    }

    #[must_use]
    pub const fn baseline(&self) -> u64 {
        self.baseline
    }

    /// Whether `registry` differs from the baseline
    #[must_use]
    pub fn is_dirty(&self, registry: &Registry) -> bool {
        compute_fingerprint(registry) != self.baseline
    }
}
