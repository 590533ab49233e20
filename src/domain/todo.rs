//! TODO items with priority, due date and completion state.

use crate::domain::TagSet;
use crate::domain::validation::{ValidationError, optional_text, require_line};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Date format accepted for due dates and used in storage.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

// ===========================================
// Priority
// ===========================================

/// Priority of a todo. Ordered `Low < Medium < High`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unknown priority.
#[derive(Debug, Clone)]
pub struct ParsePriorityError(String);

impl fmt::Display for ParsePriorityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid priority '{}': expected one of low, medium, high",
            self.0
        )
    }
}

impl std::error::Error for ParsePriorityError {}

impl From<ParsePriorityError> for ValidationError {
    fn from(err: ParsePriorityError) -> Self {
        ValidationError::new(err.to_string())
    }
}

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(ParsePriorityError(s.to_string())),
        }
    }
}

/// Parses a `YYYY-MM-DD` due date.
pub fn parse_due_date(s: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(s.trim(), DUE_DATE_FORMAT).map_err(|_| {
        ValidationError::new(format!("invalid due date '{}': expected YYYY-MM-DD", s))
    })
}

// ===========================================
// Todo
// ===========================================

/// A stored todo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Todo {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) priority: Priority,
    pub(crate) due_date: Option<NaiveDate>,
    pub(crate) completed: bool,
    pub(crate) tags: TagSet,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl Todo {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// A todo is overdue when it is pending and its due date is before `today`.
    ///
    /// Todos without a due date are never overdue.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.due_date.is_some_and(|due| due < today)
    }
}

impl fmt::Display for Todo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.completed { "[x]" } else { "[ ]" };
        write!(f, "{} TODO #{}: {}", mark, self.id, self.title)
    }
}

/// Input for creating a todo.
#[derive(Debug, Clone, Default)]
pub struct NewTodo {
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) priority: Priority,
    pub(crate) due_date: Option<NaiveDate>,
    pub(crate) completed: bool,
    pub(crate) tags: TagSet,
}

impl NewTodo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn due_date(mut self, due: NaiveDate) -> Self {
        self.due_date = Some(due);
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    pub fn tags(mut self, tags: TagSet) -> Self {
        self.tags = tags;
        self
    }

    pub fn validated(self) -> Result<Self, ValidationError> {
        Ok(Self {
            title: require_line("todo title", &self.title)?,
            description: optional_text(self.description),
            ..self
        })
    }
}

/// A partial update to a todo.
///
/// `due_date` is doubly optional: `Some(None)` removes the due date.
#[derive(Debug, Clone, Default)]
pub struct TodoPatch {
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) priority: Option<Priority>,
    pub(crate) due_date: Option<Option<NaiveDate>>,
    pub(crate) completed: Option<bool>,
    pub(crate) tags: Option<TagSet>,
}

impl TodoPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn due_date(mut self, due: Option<NaiveDate>) -> Self {
        self.due_date = Some(due);
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub fn tags(mut self, tags: TagSet) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.completed.is_none()
            && self.tags.is_none()
    }

    pub fn validated(self) -> Result<Self, ValidationError> {
        let title = self
            .title
            .map(|t| require_line("todo title", &t))
            .transpose()?;
        Ok(Self { title, ..self })
    }
}
