//! Per-kind storage descriptions for notes, snippets and todos.
//!
//! The [`Entity`] trait is what makes a single generic repository work for
//! all three kinds: it names the columns, maps rows back to records, and
//! turns validated inputs into column/value lists.

use crate::domain::validation::optional_text;
use crate::domain::{
    EntityKind, NewNote, NewSnippet, NewTodo, Note, NotePatch, Snippet, SnippetPatch, Todo,
    TodoPatch, ValidationError,
};
use crate::store::sqlite::codec::{date_column, format_date, timestamp_column};
use chrono::{DateTime, Utc};
use rusqlite::Row;
use rusqlite::types::Value;

/// Column/value pairs written by an insert or update.
pub type Fields = Vec<(&'static str, Value)>;

/// A record kind the store knows how to persist.
pub trait Entity: Sized {
    const KIND: EntityKind;

    /// Columns selected for `from_row`, in index order.
    const COLUMNS: &'static str;

    /// Columns searched by a text predicate.
    const TEXT_COLUMNS: &'static [&'static str];

    /// Creation input.
    type New;

    /// Partial update.
    type Patch;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// Validates a creation input and lists the columns to insert.
    fn insert_fields(new: Self::New) -> Result<Fields, ValidationError>;

    /// Validates a patch and lists only the columns it sets.
    fn patch_fields(patch: Self::Patch) -> Result<Fields, ValidationError>;

    fn id(&self) -> i64;

    fn updated_at(&self) -> DateTime<Utc>;
}

fn text(value: impl Into<String>) -> Value {
    Value::Text(value.into())
}

fn optional(value: Option<String>) -> Value {
    value.map_or(Value::Null, Value::Text)
}

// ===========================================
// Note
// ===========================================

impl Entity for Note {
    const KIND: EntityKind = EntityKind::Note;
    const COLUMNS: &'static str = "id, title, content, tags, starred, created_at, updated_at";
    const TEXT_COLUMNS: &'static [&'static str] = &["content", "title"];

    type New = NewNote;
    type Patch = NotePatch;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Note {
            id: row.get(0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            tags: row.get(3)?,
            starred: row.get(4)?,
            created_at: timestamp_column(row, 5)?,
            updated_at: timestamp_column(row, 6)?,
        })
    }

    fn insert_fields(new: NewNote) -> Result<Fields, ValidationError> {
        let new = new.validated()?;
        Ok(vec![
            ("title", optional(new.title)),
            ("content", text(new.content)),
            ("tags", text(new.tags.serialize())),
            ("starred", Value::from(new.starred)),
        ])
    }

    fn patch_fields(patch: NotePatch) -> Result<Fields, ValidationError> {
        let patch = patch.validated()?;
        let mut fields = Fields::new();
        if let Some(content) = patch.content {
            fields.push(("content", text(content)));
        }
        if let Some(title) = patch.title {
            fields.push(("title", optional(optional_text(Some(title)))));
        }
        if let Some(tags) = patch.tags {
            fields.push(("tags", text(tags.serialize())));
        }
        if let Some(starred) = patch.starred {
            fields.push(("starred", Value::from(starred)));
        }
        Ok(fields)
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

// ===========================================
// Snippet
// ===========================================

impl Entity for Snippet {
    const KIND: EntityKind = EntityKind::Snippet;
    const COLUMNS: &'static str =
        "id, title, code, language, description, tags, starred, created_at, updated_at";
    const TEXT_COLUMNS: &'static [&'static str] = &["code", "title", "description"];

    type New = NewSnippet;
    type Patch = SnippetPatch;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Snippet {
            id: row.get(0)?,
            title: row.get(1)?,
            code: row.get(2)?,
            language: row.get(3)?,
            description: row.get(4)?,
            tags: row.get(5)?,
            starred: row.get(6)?,
            created_at: timestamp_column(row, 7)?,
            updated_at: timestamp_column(row, 8)?,
        })
    }

    fn insert_fields(new: NewSnippet) -> Result<Fields, ValidationError> {
        let new = new.validated()?;
        Ok(vec![
            ("title", optional(new.title)),
            ("code", text(new.code)),
            ("language", optional(new.language)),
            ("description", optional(new.description)),
            ("tags", text(new.tags.serialize())),
            ("starred", Value::from(new.starred)),
        ])
    }

    fn patch_fields(patch: SnippetPatch) -> Result<Fields, ValidationError> {
        let patch = patch.validated()?;
        let mut fields = Fields::new();
        if let Some(code) = patch.code {
            fields.push(("code", text(code)));
        }
        // Blank optional fields clear the column.
        for (column, value) in [
            ("language", patch.language),
            ("title", patch.title),
            ("description", patch.description),
        ] {
            if let Some(value) = value {
                fields.push((column, optional(optional_text(Some(value)))));
            }
        }
        if let Some(tags) = patch.tags {
            fields.push(("tags", text(tags.serialize())));
        }
        if let Some(starred) = patch.starred {
            fields.push(("starred", Value::from(starred)));
        }
        Ok(fields)
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

// ===========================================
// Todo
// ===========================================

impl Entity for Todo {
    const KIND: EntityKind = EntityKind::Todo;
    const COLUMNS: &'static str =
        "id, title, description, priority, due_date, completed, tags, created_at, updated_at";
    const TEXT_COLUMNS: &'static [&'static str] = &["title", "description"];

    type New = NewTodo;
    type Patch = TodoPatch;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Todo {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            priority: row.get(3)?,
            due_date: date_column(row, 4)?,
            completed: row.get(5)?,
            tags: row.get(6)?,
            created_at: timestamp_column(row, 7)?,
            updated_at: timestamp_column(row, 8)?,
        })
    }

    fn insert_fields(new: NewTodo) -> Result<Fields, ValidationError> {
        let new = new.validated()?;
        Ok(vec![
            ("title", text(new.title)),
            ("description", optional(new.description)),
            ("priority", text(new.priority.as_str())),
            ("due_date", optional(new.due_date.map(format_date))),
            ("completed", Value::from(new.completed)),
            ("tags", text(new.tags.serialize())),
        ])
    }

    fn patch_fields(patch: TodoPatch) -> Result<Fields, ValidationError> {
        let patch = patch.validated()?;
        let mut fields = Fields::new();
        if let Some(title) = patch.title {
            fields.push(("title", text(title)));
        }
        if let Some(description) = patch.description {
            fields.push(("description", optional(optional_text(Some(description)))));
        }
        if let Some(priority) = patch.priority {
            fields.push(("priority", text(priority.as_str())));
        }
        if let Some(due) = patch.due_date {
            fields.push(("due_date", optional(due.map(format_date))));
        }
        if let Some(completed) = patch.completed {
            fields.push(("completed", Value::from(completed)));
        }
        if let Some(tags) = patch.tags {
            fields.push(("tags", text(tags.serialize())));
        }
        Ok(fields)
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
