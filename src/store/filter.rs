//! Translation of list options into a storage-independent query.
//!
//! [`resolve`] checks that every option applies to the entity kind being
//! listed and produces a [`ResolvedQuery`]: a conjunction of predicates, a
//! sort order, and a page window. Nothing here touches the database.

use crate::domain::{EntityKind, Priority, TagSet, ValidationError};
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Page size used when the caller does not give one.
pub const DEFAULT_LIMIT: u32 = 50;

// ===========================================
// Status
// ===========================================

/// Completion filter for todos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    Pending,
    Completed,
    #[default]
    All,
}

impl FromStr for Status {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Status::Pending),
            "completed" | "done" => Ok(Status::Completed),
            "all" => Ok(Status::All),
            other => Err(ValidationError::new(format!(
                "invalid status '{}' (expected pending, completed or all)",
                other
            ))),
        }
    }
}

// ===========================================
// Sorting
// ===========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    Created,
    #[default]
    Updated,
    Title,
    Due,
    Priority,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Created => "created",
            SortKey::Updated => "updated",
            SortKey::Title => "title",
            SortKey::Due => "due",
            SortKey::Priority => "priority",
        }
    }

    /// Newest and most important first; titles and due dates ascending.
    pub fn default_direction(&self) -> Direction {
        match self {
            SortKey::Created | SortKey::Updated | SortKey::Priority => Direction::Descending,
            SortKey::Title | SortKey::Due => Direction::Ascending,
        }
    }

    fn applies_to(&self, kind: EntityKind) -> bool {
        match self {
            SortKey::Created | SortKey::Updated | SortKey::Title => true,
            SortKey::Due | SortKey::Priority => kind == EntityKind::Todo,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "created" => Ok(SortKey::Created),
            "updated" => Ok(SortKey::Updated),
            "title" => Ok(SortKey::Title),
            "due" => Ok(SortKey::Due),
            "priority" => Ok(SortKey::Priority),
            other => Err(ValidationError::new(format!("unknown sort key '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }
}

/// Primary sort order. Ties always break by id ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub key: SortKey,
    pub direction: Direction,
}

impl Sort {
    pub fn new(key: SortKey) -> Self {
        Self {
            key,
            direction: key.default_direction(),
        }
    }
}

impl Default for Sort {
    fn default() -> Self {
        Sort::new(SortKey::default())
    }
}

// ===========================================
// Options
// ===========================================

/// A timestamp window: `since` inclusive, `until` exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn since(since: DateTime<Utc>) -> Self {
        Self {
            since: Some(since),
            until: None,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.since.is_none() && self.until.is_none()
    }
}

/// Caller-facing list options. Everything defaults to "no filter".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListOptions {
    pub tags: TagSet,
    pub starred: Option<bool>,
    pub priority: Option<Priority>,
    pub status: Status,
    pub overdue: bool,
    pub language: Option<String>,
    pub created: DateRange,
    pub updated: DateRange,
    pub sort: Option<SortKey>,
    pub reverse: bool,
    pub limit: Option<i64>,
    pub offset: u32,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tags(mut self, tags: TagSet) -> Self {
        self.tags = tags;
        self
    }

    pub fn starred(mut self, starred: bool) -> Self {
        self.starred = Some(starred);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn overdue(mut self) -> Self {
        self.overdue = true;
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn created(mut self, range: DateRange) -> Self {
        self.created = range;
        self
    }

    pub fn updated(mut self, range: DateRange) -> Self {
        self.updated = range;
        self
    }

    pub fn sort(mut self, key: SortKey) -> Self {
        self.sort = Some(key);
        self
    }

    pub fn reverse(mut self) -> Self {
        self.reverse = true;
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

// ===========================================
// Resolved Query
// ===========================================

/// A single filter condition. All predicates of a query must hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Every tag in the set is present on the record.
    Tags(TagSet),
    Starred(bool),
    Priority(Priority),
    Completed(bool),
    /// Pending with a due date before today.
    Overdue,
    /// Case-insensitive exact language match.
    Language(String),
    CreatedSince(DateTime<Utc>),
    CreatedUntil(DateTime<Utc>),
    UpdatedSince(DateTime<Utc>),
    UpdatedUntil(DateTime<Utc>),
    /// Case-insensitive substring of any searchable text column.
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedQuery {
    pub kind: EntityKind,
    pub predicates: Vec<Predicate>,
    pub sort: Sort,
    pub limit: u32,
    pub offset: u32,
}

impl ResolvedQuery {
    /// Unfiltered query over `kind` with the default sort and page size.
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            predicates: Vec::new(),
            sort: Sort::default(),
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }

    pub fn with_predicate(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }
}

/// Validates a caller-supplied page size.
pub fn resolve_limit(limit: Option<i64>) -> Result<u32, ValidationError> {
    match limit {
        None => Ok(DEFAULT_LIMIT),
        Some(n) if n <= 0 => Err(ValidationError::new(format!(
            "limit must be positive, got {}",
            n
        ))),
        Some(n) => Ok(u32::try_from(n).unwrap_or(u32::MAX)),
    }
}

/// Resolves list options for one entity kind.
pub fn resolve(kind: EntityKind, options: &ListOptions) -> Result<ResolvedQuery, ValidationError> {
    let mut predicates = Vec::new();

    if !options.tags.is_empty() {
        predicates.push(Predicate::Tags(options.tags.clone()));
    }

    if let Some(starred) = options.starred {
        reject_unless(kind != EntityKind::Todo, "starred", kind)?;
        predicates.push(Predicate::Starred(starred));
    }

    if let Some(priority) = options.priority {
        reject_unless(kind == EntityKind::Todo, "priority", kind)?;
        predicates.push(Predicate::Priority(priority));
    }

    match options.status {
        Status::All => {}
        Status::Pending | Status::Completed => {
            reject_unless(kind == EntityKind::Todo, "status", kind)?;
            predicates.push(Predicate::Completed(options.status == Status::Completed));
        }
    }

    if options.overdue {
        reject_unless(kind == EntityKind::Todo, "overdue", kind)?;
        predicates.push(Predicate::Overdue);
    }

    if let Some(language) = &options.language {
        reject_unless(kind == EntityKind::Snippet, "language", kind)?;
        let language = language.trim();
        if language.is_empty() {
            return Err(ValidationError::empty_field("language"));
        }
        predicates.push(Predicate::Language(language.to_string()));
    }

    push_range(
        &mut predicates,
        "created",
        options.created,
        Predicate::CreatedSince,
        Predicate::CreatedUntil,
    )?;
    push_range(
        &mut predicates,
        "updated",
        options.updated,
        Predicate::UpdatedSince,
        Predicate::UpdatedUntil,
    )?;

    let key = options.sort.unwrap_or_default();
    if !key.applies_to(kind) {
        return Err(ValidationError::new(format!(
            "cannot sort {} by {}",
            kind.plural(),
            key
        )));
    }
    let mut sort = Sort::new(key);
    if options.reverse {
        sort.direction = sort.direction.reversed();
    }

    Ok(ResolvedQuery {
        kind,
        predicates,
        sort,
        limit: resolve_limit(options.limit)?,
        offset: options.offset,
    })
}

fn reject_unless(applies: bool, option: &str, kind: EntityKind) -> Result<(), ValidationError> {
    if applies {
        Ok(())
    } else {
        Err(ValidationError::new(format!(
            "the {} filter does not apply to {}",
            option,
            kind.plural()
        )))
    }
}

fn push_range(
    predicates: &mut Vec<Predicate>,
    field: &str,
    range: DateRange,
    since: fn(DateTime<Utc>) -> Predicate,
    until: fn(DateTime<Utc>) -> Predicate,
) -> Result<(), ValidationError> {
    if let (Some(from), Some(to)) = (range.since, range.until)
        && from >= to
    {
        return Err(ValidationError::new(format!(
            "empty {} date range",
            field
        )));
    }
    predicates.extend(range.since.map(since));
    predicates.extend(range.until.map(until));
    Ok(())
}
