//! Core types: Note, Snippet, Todo, Tag/TagSet, EntityKind, validation

mod kind;
mod note;
mod snippet;
mod tag;
mod todo;
pub(crate) mod validation;

pub use kind::{EntityKind, ParseKindError};
pub use note::{NewNote, Note, NotePatch};
pub use snippet::{NewSnippet, Snippet, SnippetPatch, detect_language, editor_extension};
pub use tag::{ParseTagError, TAG_SEPARATOR, Tag, TagSet};
pub use todo::{
    DUE_DATE_FORMAT, NewTodo, ParsePriorityError, Priority, Todo, TodoPatch, parse_due_date,
};
pub use validation::ValidationError;
