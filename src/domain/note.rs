//! Free-form text notes.

use crate::domain::TagSet;
use crate::domain::validation::{ValidationError, optional_text, require_body};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// A stored note.
///
/// Notes are only produced by the store, so every `Note` carries a storage
/// id and both timestamps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    pub(crate) id: i64,
    pub(crate) title: Option<String>,
    pub(crate) content: String,
    pub(crate) tags: TagSet,
    pub(crate) starred: bool,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl Note {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    pub fn is_starred(&self) -> bool {
        self.starred
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Title if present, otherwise the first line of the content.
    pub fn headline(&self) -> &str {
        self.title
            .as_deref()
            .unwrap_or_else(|| self.content.lines().next().unwrap_or_default().trim())
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Note #{}: {}", self.id, self.headline())
    }
}

/// Input for creating a note.
///
/// # Examples
///
/// ```
/// use qnote::domain::{NewNote, TagSet};
///
/// let note = NewNote::new("Remember to call John")
///     .tags(TagSet::parse("work,calls"))
///     .starred(true);
/// assert!(note.validated().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct NewNote {
    pub(crate) content: String,
    pub(crate) title: Option<String>,
    pub(crate) tags: TagSet,
    pub(crate) starred: bool,
}

impl NewNote {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn tags(mut self, tags: TagSet) -> Self {
        self.tags = tags;
        self
    }

    pub fn starred(mut self, starred: bool) -> Self {
        self.starred = starred;
        self
    }

    /// Checks required fields and normalizes optional ones.
    pub fn validated(self) -> Result<Self, ValidationError> {
        Ok(Self {
            content: require_body("note content", self.content)?,
            title: optional_text(self.title),
            tags: self.tags,
            starred: self.starred,
        })
    }
}

/// A partial update to a note. Unset fields are left untouched.
///
/// Setting the title to an empty string clears it.
#[derive(Debug, Clone, Default)]
pub struct NotePatch {
    pub(crate) content: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) tags: Option<TagSet>,
    pub(crate) starred: Option<bool>,
}

impl NotePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn tags(mut self, tags: TagSet) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn starred(mut self, starred: bool) -> Self {
        self.starred = Some(starred);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.title.is_none() && self.tags.is_none() && self.starred.is_none()
    }

    /// Validates the supplied fields only.
    pub fn validated(self) -> Result<Self, ValidationError> {
        let content = self
            .content
            .map(|c| require_body("note content", c))
            .transpose()?;
        Ok(Self {
            content,
            title: self.title,
            tags: self.tags,
            starred: self.starred,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_note() -> Note {
        let now = Utc::now();
        Note {
            id: 7,
            title: None,
            content: "First line\nsecond line".to_string(),
            tags: TagSet::new(),
            starred: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn new_note_defaults() {
        let note = NewNote::new("text");
        assert!(!note.starred);
        assert!(note.tags.is_empty());
        assert_eq!(note.title, None);
    }

    #[test]
    fn validated_rejects_empty_content() {
        let err = NewNote::new("   ").validated().unwrap_err();
        assert!(err.message().contains("content"));
    }

    #[test]
    fn validated_drops_blank_title() {
        let note = NewNote::new("text").title("  ").validated().unwrap();
        assert_eq!(note.title, None);
    }

    #[test]
    fn patch_validates_only_supplied_fields() {
        assert!(NotePatch::new().starred(true).validated().is_ok());
        assert!(NotePatch::new().content("").validated().is_err());
    }

    #[test]
    fn patch_is_empty() {
        assert!(NotePatch::new().is_empty());
        assert!(!NotePatch::new().title("x").is_empty());
    }

    #[test]
    fn headline_falls_back_to_first_line() {
        assert_eq!(sample_note().headline(), "First line");
        assert_eq!(sample_note().to_string(), "Note #7: First line");
    }
}
