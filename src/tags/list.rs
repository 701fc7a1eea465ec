//! Ordered per-item tag lists
//!
//! Tag order is meaningful: it is the order tags are written back to the
//! caption file, and positional insertion policies are relative to it.

use std::fmt;

/// Separator used when a tag list is persisted
pub const TAG_SEPARATOR: &str = ", ";

/// Where a tag lands when it is added to a list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddPosition {
    /// Insert at the front
    Top,
    /// Insert at `len / 2`
    Center,
    /// Append at the end
    Down,
    /// Insert at the given index; negative means the front, past the end
    /// means append
    Custom(i64),
}

impl AddPosition {
    /// Resolve to a concrete index for a list of `len` tags
    #[must_use]
    pub fn index_for(self, len: usize) -> usize {
        match self {
            Self::Top => 0,
            Self::Center => len / 2,
            Self::Down => len,
            Self::Custom(pos) if pos < 0 => 0,
            Self::Custom(pos) => usize::try_from(pos).map_or(len, |pos| pos.min(len)),
        }
    }
}

/// Ordered sequence of tags belonging to one item
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagList(Vec<String>);

impl TagList {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Parse a caption file body
    ///
    /// Splits on commas, trims every token and drops the empty ones. Case is
    /// left untouched.
    ///
    /// # Examples
    /// ```
    /// use tagset::tags::TagList;
    ///
    /// let tags = TagList::parse(" Cat ,blue_eyes,, ");
    /// assert_eq!(tags.as_slice(), ["Cat", "blue_eyes"]);
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self(
            text.split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    /// Tags joined with [`TAG_SEPARATOR`], as persisted on disk
    #[must_use]
    pub fn joined(&self) -> String {
        self.0.join(TAG_SEPARATOR)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    /// Index of the first occurrence of `tag`
    #[must_use]
    pub fn position(&self, tag: &str) -> Option<usize> {
        self.0.iter().position(|t| t == tag)
    }

    pub fn push(&mut self, tag: impl Into<String>) {
        self.0.push(tag.into());
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Insert at `index`, clamped to the end of the list
    pub fn insert(&mut self, index: usize, tag: impl Into<String>) {
        let index = index.min(self.0.len());
        self.0.insert(index, tag.into());
    }

    /// Move `tag` to the place `position` selects
    ///
    /// A prior occurrence is removed first, so the list holds the tag once at
    /// its new place and `Center` is computed on the shortened list.
    pub fn add(&mut self, tag: &str, position: AddPosition) {
        self.remove(tag);
        let index = position.index_for(self.0.len());
        self.0.insert(index, tag.to_string());
    }

    /// Remove the first occurrence of `tag`; returns whether one was found
    pub fn remove(&mut self, tag: &str) -> bool {
        match self.position(tag) {
            Some(index) => {
                self.0.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn remove_at(&mut self, index: usize) -> Option<String> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }

    /// Replace the tag at `index`, returning the old one
    pub fn replace_at(&mut self, index: usize, tag: impl Into<String>) -> Option<String> {
        self.0
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, tag.into()))
    }

    /// Rename `src` to `dst` in place
    ///
    /// When `dst` is already present, `src` is dropped instead so `dst` never
    /// appears twice. Returns whether the list changed.
    pub fn rename(&mut self, src: &str, dst: &str) -> bool {
        let Some(index) = self.position(src) else {
            return false;
        };
        if self.contains(dst) {
            self.0.remove(index);
        } else {
            self.0[index] = dst.to_string();
        }
        true
    }
}

impl fmt::Display for TagList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

impl From<Vec<String>> for TagList {
    fn from(tags: Vec<String>) -> Self {
        Self(tags)
    }
}

impl<S: Into<String>> FromIterator<S> for TagList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> Extend<S> for TagList {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

impl<'a> IntoIterator for &'a TagList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
