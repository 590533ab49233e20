//! The three record kinds managed by qnote.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of a stored record.
///
/// The declaration order is significant: it is the tie-break order used when
/// ranking search results that share a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Note,
    Snippet,
    Todo,
}

impl EntityKind {
    /// Every kind, in ranking order.
    pub const ALL: [EntityKind; 3] = [EntityKind::Note, EntityKind::Snippet, EntityKind::Todo];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Note => "note",
            EntityKind::Snippet => "snippet",
            EntityKind::Todo => "todo",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            EntityKind::Note => "notes",
            EntityKind::Snippet => "snippets",
            EntityKind::Todo => "todos",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unknown record kind.
#[derive(Debug, Clone)]
pub struct ParseKindError(String);

impl fmt::Display for ParseKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid kind '{}': expected one of note, snippet, todo",
            self.0
        )
    }
}

impl std::error::Error for ParseKindError {}

impl FromStr for EntityKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "note" | "notes" => Ok(EntityKind::Note),
            "snippet" | "snippets" => Ok(EntityKind::Snippet),
            "todo" | "todos" => Ok(EntityKind::Todo),
            _ => Err(ParseKindError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declaration_order_is_ranking_order() {
        assert!(EntityKind::Note < EntityKind::Snippet);
        assert!(EntityKind::Snippet < EntityKind::Todo);
    }

    #[test]
    fn parse_accepts_singular_and_plural() {
        assert_eq!("Note".parse::<EntityKind>().unwrap(), EntityKind::Note);
        assert_eq!("todos".parse::<EntityKind>().unwrap(), EntityKind::Todo);
        assert!("task".parse::<EntityKind>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&EntityKind::Snippet).unwrap(), "\"snippet\"");
    }
}
