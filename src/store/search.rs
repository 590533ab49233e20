//! Cross-kind text search.
//!
//! A search runs one filtered query per kind in scope, merges the hits, and
//! orders them by `updated_at` descending, then kind (note, snippet, todo),
//! then id ascending. Paging applies to the merged list.

use crate::domain::{EntityKind, Note, Snippet, TagSet, Todo, ValidationError};
use crate::store::entity::Entity;
use crate::store::filter::{Predicate, ResolvedQuery, resolve_limit};
use crate::store::{Store, StoreResult};
use chrono::{DateTime, Utc};
use log::debug;
use serde::Serialize;
use std::cmp::{Ordering, Reverse};
use std::fmt;
use std::str::FromStr;

/// Which kinds a search covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchScope {
    #[default]
    All,
    Only(EntityKind),
}

impl SearchScope {
    pub fn kinds(&self) -> Vec<EntityKind> {
        match self {
            SearchScope::All => EntityKind::ALL.to_vec(),
            SearchScope::Only(kind) => vec![*kind],
        }
    }
}

impl FromStr for SearchScope {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(SearchScope::All);
        }
        s.parse::<EntityKind>()
            .map(SearchScope::Only)
            .map_err(|e| ValidationError::new(e.to_string()))
    }
}

impl fmt::Display for SearchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchScope::All => f.write_str("all"),
            SearchScope::Only(kind) => write!(f, "{}", kind),
        }
    }
}

/// A text search request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    pub text: String,
    pub scope: SearchScope,
    pub tags: TagSet,
    pub limit: Option<i64>,
    pub offset: u32,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn scope(mut self, scope: SearchScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn tags(mut self, tags: TagSet) -> Self {
        self.tags = tags;
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }
}

/// One matching record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SearchHit {
    Note(Note),
    Snippet(Snippet),
    Todo(Todo),
}

impl SearchHit {
    pub fn kind(&self) -> EntityKind {
        match self {
            SearchHit::Note(_) => EntityKind::Note,
            SearchHit::Snippet(_) => EntityKind::Snippet,
            SearchHit::Todo(_) => EntityKind::Todo,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            SearchHit::Note(n) => n.id(),
            SearchHit::Snippet(s) => s.id(),
            SearchHit::Todo(t) => t.id(),
        }
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        match self {
            SearchHit::Note(n) => n.updated_at(),
            SearchHit::Snippet(s) => s.updated_at(),
            SearchHit::Todo(t) => t.updated_at(),
        }
    }

    /// Short one-line label for listings.
    pub fn headline(&self) -> String {
        match self {
            SearchHit::Note(n) => n.headline().to_string(),
            SearchHit::Snippet(s) => s.headline(),
            SearchHit::Todo(t) => t.title().to_string(),
        }
    }

    fn rank_key(&self) -> (Reverse<DateTime<Utc>>, EntityKind, i64) {
        (Reverse(self.updated_at()), self.kind(), self.id())
    }
}

/// Total order used for merged results.
pub fn rank(a: &SearchHit, b: &SearchHit) -> Ordering {
    a.rank_key().cmp(&b.rank_key())
}

impl Store {
    /// Searches notes, snippets and todos for a case-insensitive substring.
    pub fn search(&self, query: &SearchQuery) -> StoreResult<Vec<SearchHit>> {
        let text = query.text.trim();
        if text.is_empty() {
            return Err(ValidationError::empty_field("search query").into());
        }
        let limit = resolve_limit(query.limit)?;
        // Any single kind may fill the requested page on its own.
        let window = limit.saturating_add(query.offset);

        let mut hits = Vec::new();
        for kind in query.scope.kinds() {
            let mut resolved = ResolvedQuery::new(kind);
            if !query.tags.is_empty() {
                resolved = resolved.with_predicate(Predicate::Tags(query.tags.clone()));
            }
            resolved = resolved.with_predicate(Predicate::Text(text.to_string()));
            resolved.limit = window;

            match kind {
                EntityKind::Note => hits.extend(self.hits::<Note>(&resolved, SearchHit::Note)?),
                EntityKind::Snippet => {
                    hits.extend(self.hits::<Snippet>(&resolved, SearchHit::Snippet)?)
                }
                EntityKind::Todo => hits.extend(self.hits::<Todo>(&resolved, SearchHit::Todo)?),
            }
        }

        hits.sort_by(rank);
        debug!("search '{}' matched {} records before paging", text, hits.len());

        Ok(hits
            .into_iter()
            .skip(query.offset as usize)
            .take(limit as usize)
            .collect())
    }

    fn hits<E: Entity>(
        &self,
        query: &ResolvedQuery,
        wrap: fn(E) -> SearchHit,
    ) -> StoreResult<Vec<SearchHit>> {
        Ok(self
            .select_records(query, E::COLUMNS, E::TEXT_COLUMNS, E::from_row)?
            .into_iter()
            .map(wrap)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scope_parsing() {
        assert_eq!("all".parse::<SearchScope>().unwrap(), SearchScope::All);
        assert_eq!(
            "snippets".parse::<SearchScope>().unwrap(),
            SearchScope::Only(EntityKind::Snippet)
        );
        assert!("links".parse::<SearchScope>().is_err());
    }

    #[test]
    fn all_scope_lists_kinds_in_rank_order() {
        assert_eq!(
            SearchScope::All.kinds(),
            vec![EntityKind::Note, EntityKind::Snippet, EntityKind::Todo]
        );
    }

    #[test]
    fn builder_sets_fields() {
        let query = SearchQuery::new("x")
            .scope(SearchScope::Only(EntityKind::Todo))
            .limit(3)
            .offset(1);
        assert_eq!(query.limit, Some(3));
        assert_eq!(query.offset, 1);
        assert_eq!(query.tags, TagSet::new());
    }
}
