//! Case-insensitive tags and tag sets shared by every record kind.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Separator used both for user input and for the stored representation.
pub const TAG_SEPARATOR: char = ',';

/// A single normalized tag.
///
/// Tags are trimmed and lowercased on construction, so `Work`, `work` and
/// ` WORK ` are the same tag.
///
/// # Examples
///
/// ```
/// use qnote::domain::Tag;
///
/// let tag = Tag::new(" Work ").unwrap();
/// assert_eq!(tag.as_str(), "work");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(String); // Always stored lowercase

/// Error returned when parsing an invalid tag.
#[derive(Debug, Clone)]
pub struct ParseTagError(String);

impl fmt::Display for ParseTagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseTagError {}

impl Tag {
    /// Creates a new Tag from a string.
    ///
    /// # Errors
    ///
    /// Returns `ParseTagError` if the tag is empty after trimming or contains
    /// the separator character.
    pub fn new(s: &str) -> Result<Self, ParseTagError> {
        let normalized = s.trim().to_lowercase();

        if normalized.is_empty() {
            return Err(ParseTagError("tag cannot be empty".to_string()));
        }

        if normalized.contains(TAG_SEPARATOR) {
            return Err(ParseTagError(format!(
                "invalid tag '{}': tags cannot contain '{}'",
                normalized, TAG_SEPARATOR
            )));
        }

        Ok(Self(normalized))
    }

    /// Returns the normalized tag value as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag(\"{}\")", self.0)
    }
}

impl FromStr for Tag {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for Tag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// An unordered set of tags attached to a record.
///
/// Iteration and the stored form are lexicographic, so two sets built from the
/// same tags in a different order serialize identically.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(BTreeSet<Tag>);

impl TagSet {
    /// Creates an empty tag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes a comma-separated tag string.
    ///
    /// Entries are trimmed and lowercased; empty entries and duplicates are
    /// dropped. Never fails: an empty string yields an empty set.
    pub fn parse(raw: &str) -> Self {
        raw.split(TAG_SEPARATOR)
            .filter_map(|part| Tag::new(part).ok())
            .collect()
    }

    /// Returns true if every tag of `filter` is present in this set.
    ///
    /// An empty filter matches everything.
    pub fn matches(&self, filter: &TagSet) -> bool {
        filter.0.is_subset(&self.0)
    }

    /// Stored representation: tags joined by the separator, in lexicographic order.
    pub fn serialize(&self) -> String {
        self.iter()
            .map(Tag::as_str)
            .collect::<Vec<_>>()
            .join(&TAG_SEPARATOR.to_string())
    }

    /// Inverse of [`TagSet::serialize`].
    pub fn deserialize(stored: &str) -> Self {
        Self::parse(stored)
    }

    pub fn insert(&mut self, tag: Tag) -> bool {
        self.0.insert(tag)
    }

    pub fn remove(&mut self, tag: &Tag) -> bool {
        self.0.remove(tag)
    }

    pub fn contains(&self, tag: &Tag) -> bool {
        self.0.contains(tag)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.0.iter()
    }
}

impl FromIterator<Tag> for TagSet {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a Tag;
    type IntoIter = std::collections::btree_set::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags: Vec<_> = self.iter().map(Tag::as_str).collect();
        write!(f, "{}", tags.join(", "))
    }
}

impl fmt::Debug for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(Tag::as_str)).finish()
    }
}
