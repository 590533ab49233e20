//! Rendering of resolved queries to SQL.

use super::codec::{format_date, format_timestamp};
use super::connection::{CONTAINS_FN, EQ_IGNORE_CASE_FN};
use super::table_name;
use crate::store::filter::{Direction, Predicate, ResolvedQuery, Sort, SortKey};
use chrono::NaiveDate;
use rusqlite::types::Value;

/// A SELECT statement with its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SqlQuery {
    pub(crate) sql: String,
    pub(crate) params: Vec<Value>,
}

/// Renders `query` as a SELECT over `columns`.
///
/// `text_columns` are the columns a `Predicate::Text` searches; `today` is
/// the date overdue is measured against.
pub(crate) fn build_select(
    query: &ResolvedQuery,
    columns: &str,
    text_columns: &[&str],
    today: NaiveDate,
) -> SqlQuery {
    let mut clauses = Vec::new();
    let mut params = Vec::new();

    for predicate in &query.predicates {
        render_predicate(predicate, text_columns, today, &mut clauses, &mut params);
    }

    let mut sql = format!("SELECT {} FROM {}", columns, table_name(query.kind));
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY ");
    sql.push_str(&order_by(&query.sort));
    sql.push_str(" LIMIT ? OFFSET ?");
    params.push(Value::Integer(i64::from(query.limit)));
    params.push(Value::Integer(i64::from(query.offset)));

    SqlQuery { sql, params }
}

fn render_predicate(
    predicate: &Predicate,
    text_columns: &[&str],
    today: NaiveDate,
    clauses: &mut Vec<String>,
    params: &mut Vec<Value>,
) {
    match predicate {
        Predicate::Tags(tags) => {
            // Wrapping both sides in commas makes "rust" miss "rusty".
            for tag in tags {
                clauses.push("instr(',' || tags || ',', ?) > 0".to_string());
                params.push(Value::Text(format!(",{},", tag)));
            }
        }
        Predicate::Starred(starred) => {
            clauses.push("starred = ?".to_string());
            params.push(Value::from(*starred));
        }
        Predicate::Priority(priority) => {
            clauses.push("priority = ?".to_string());
            params.push(Value::Text(priority.as_str().to_string()));
        }
        Predicate::Completed(completed) => {
            clauses.push("completed = ?".to_string());
            params.push(Value::from(*completed));
        }
        Predicate::Overdue => {
            clauses.push("(completed = 0 AND due_date IS NOT NULL AND due_date < ?)".to_string());
            params.push(Value::Text(format_date(today)));
        }
        Predicate::Language(language) => {
            clauses.push(format!("{}(language, ?)", EQ_IGNORE_CASE_FN));
            params.push(Value::Text(language.clone()));
        }
        Predicate::CreatedSince(ts) => {
            clauses.push("created_at >= ?".to_string());
            params.push(Value::Text(format_timestamp(*ts)));
        }
        Predicate::CreatedUntil(ts) => {
            clauses.push("created_at < ?".to_string());
            params.push(Value::Text(format_timestamp(*ts)));
        }
        Predicate::UpdatedSince(ts) => {
            clauses.push("updated_at >= ?".to_string());
            params.push(Value::Text(format_timestamp(*ts)));
        }
        Predicate::UpdatedUntil(ts) => {
            clauses.push("updated_at < ?".to_string());
            params.push(Value::Text(format_timestamp(*ts)));
        }
        Predicate::Text(needle) => {
            let alternatives: Vec<String> = text_columns
                .iter()
                .map(|column| format!("{}({}, ?)", CONTAINS_FN, column))
                .collect();
            clauses.push(format!("({})", alternatives.join(" OR ")));
            params.extend(text_columns.iter().map(|_| Value::Text(needle.clone())));
        }
    }
}

fn order_by(sort: &Sort) -> String {
    let dir = match sort.direction {
        Direction::Ascending => "ASC",
        Direction::Descending => "DESC",
    };
    let primary = match sort.key {
        SortKey::Created => format!("created_at {dir}"),
        SortKey::Updated => format!("updated_at {dir}"),
        SortKey::Title => format!("title IS NULL, title COLLATE NOCASE {dir}"),
        SortKey::Due => format!("due_date IS NULL, due_date {dir}"),
        SortKey::Priority => format!(
            "CASE priority WHEN 'high' THEN 2 WHEN 'medium' THEN 1 ELSE 0 END {dir}"
        ),
    };
    format!("{primary}, id ASC")
}
