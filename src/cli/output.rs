//! Output formats and terminal rendering for CLI commands.

use crate::domain::{Note, Snippet, Todo};
use crate::store::SearchHit;
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Serialize;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Renders `data` as pretty JSON inside the `{"data": ...}` envelope.
pub fn to_json<T: Serialize>(data: T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&Output::new(data))
}

/// Truncates a string to a maximum display width, adding ellipsis if needed.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}

fn star(starred: bool) -> &'static str {
    if starred { "★" } else { " " }
}

fn star_mark(starred: bool) -> &'static str {
    if starred { "★" } else { "☆" }
}

fn tags_or_dash(tags: &crate::domain::TagSet) -> String {
    if tags.is_empty() {
        "-".to_string()
    } else {
        tags.to_string()
    }
}

// ===========================================
// Tables
// ===========================================

pub fn note_table(notes: &[Note]) -> String {
    if notes.is_empty() {
        return "No notes found.".to_string();
    }
    let mut out = format!("{:>5}  {}  {:<40}  {:<20}  {:>10}\n", "ID", " ", "Title", "Tags", "Updated");
    for note in notes {
        out.push_str(&format!(
            "{:>5}  {}  {:<40}  {:<20}  {:>10}\n",
            note.id(),
            star(note.is_starred()),
            truncate_str(note.headline(), 40),
            truncate_str(&tags_or_dash(note.tags()), 20),
            note.updated_at().format("%Y-%m-%d"),
        ));
    }
    out.push_str(&format!("\n{} note(s)", notes.len()));
    out
}

pub fn snippet_table(snippets: &[Snippet]) -> String {
    if snippets.is_empty() {
        return "No snippets found.".to_string();
    }
    let mut out = format!(
        "{:>5}  {}  {:<32}  {:<12}  {:<20}  {:>10}\n",
        "ID", " ", "Title", "Language", "Tags", "Updated"
    );
    for snippet in snippets {
        out.push_str(&format!(
            "{:>5}  {}  {:<32}  {:<12}  {:<20}  {:>10}\n",
            snippet.id(),
            star(snippet.is_starred()),
            truncate_str(&snippet.headline(), 32),
            truncate_str(snippet.language().unwrap_or("-"), 12),
            truncate_str(&tags_or_dash(snippet.tags()), 20),
            snippet.updated_at().format("%Y-%m-%d"),
        ));
    }
    out.push_str(&format!("\n{} snippet(s)", snippets.len()));
    out
}

pub fn todo_table(todos: &[Todo], today: NaiveDate) -> String {
    if todos.is_empty() {
        return "No todos found.".to_string();
    }
    let mut out = format!(
        "{:>5}  {}  {:<40}  {:<8}  {:<12}  {:<20}\n",
        "ID", "   ", "Title", "Priority", "Due", "Tags"
    );
    for todo in todos {
        let due = match todo.due_date() {
            Some(d) if todo.is_overdue(today) => format!("{}!", d),
            Some(d) => d.to_string(),
            None => "-".to_string(),
        };
        out.push_str(&format!(
            "{:>5}  {}  {:<40}  {:<8}  {:<12}  {:<20}\n",
            todo.id(),
            if todo.is_completed() { "[x]" } else { "[ ]" },
            truncate_str(todo.title(), 40),
            todo.priority().as_str(),
            due,
            truncate_str(&tags_or_dash(todo.tags()), 20),
        ));
    }
    out.push_str(&format!("\n{} todo(s)", todos.len()));
    out
}

pub fn search_table(hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return "No matches found.".to_string();
    }
    let mut out = format!("{:<8}  {:>5}  {:<50}  {:>10}\n", "Kind", "ID", "Title", "Updated");
    for hit in hits {
        out.push_str(&format!(
            "{:<8}  {:>5}  {:<50}  {:>10}\n",
            hit.kind().as_str(),
            hit.id(),
            truncate_str(&hit.headline(), 50),
            hit.updated_at().format("%Y-%m-%d"),
        ));
    }
    out.push_str(&format!("\n{} match(es)", hits.len()));
    out
}

// ===========================================
// Details
// ===========================================

fn timestamps(created: chrono::DateTime<chrono::Utc>, updated: chrono::DateTime<chrono::Utc>) -> String {
    format!(
        "Created: {}  Updated: {}",
        created.format("%Y-%m-%d %H:%M"),
        updated.format("%Y-%m-%d %H:%M")
    )
}

pub fn note_detail(note: &Note) -> String {
    let mut out = format!("{} Note #{}", star_mark(note.is_starred()), note.id());
    if let Some(title) = note.title() {
        out.push_str(&format!(": {}", title));
    }
    out.push_str(&format!("\nTags: {}\n", tags_or_dash(note.tags())));
    out.push_str(&timestamps(note.created_at(), note.updated_at()));
    out.push_str("\n\n");
    out.push_str(note.content());
    out
}

pub fn snippet_detail(snippet: &Snippet) -> String {
    let mut out = format!(
        "{} Snippet #{}",
        star_mark(snippet.is_starred()),
        snippet.id()
    );
    if let Some(title) = snippet.title() {
        out.push_str(&format!(": {}", title));
    }
    if let Some(description) = snippet.description() {
        out.push_str(&format!("\n{}", description));
    }
    out.push_str(&format!(
        "\nLanguage: {}\nTags: {}\n",
        snippet.language().unwrap_or("unknown"),
        tags_or_dash(snippet.tags())
    ));
    out.push_str(&timestamps(snippet.created_at(), snippet.updated_at()));
    out.push_str("\n\n");
    out.push_str(snippet.code());
    out
}

pub fn todo_detail(todo: &Todo, today: NaiveDate) -> String {
    let mut out = format!(
        "{} TODO #{}: {}\nPriority: {}",
        if todo.is_completed() { "[x]" } else { "[ ]" },
        todo.id(),
        todo.title(),
        todo.priority().as_str().to_uppercase()
    );
    if let Some(description) = todo.description() {
        out.push_str(&format!("\nDescription: {}", description));
    }
    if let Some(due) = todo.due_date() {
        if todo.is_overdue(today) {
            out.push_str(&format!("\nDue: {} (OVERDUE)", due));
        } else {
            out.push_str(&format!("\nDue: {}", due));
        }
    }
    out.push_str(&format!("\nTags: {}\n", tags_or_dash(todo.tags())));
    out.push_str(&timestamps(todo.created_at(), todo.updated_at()));
    out
}
