//! SQLite schema creation for the record store.

use rusqlite::Connection;

/// Schema version recorded in the `metadata` table.
pub const SCHEMA_VERSION: i64 = 1;

/// Creates the database schema for notes, snippets and todos.
///
/// This function creates all required tables and indexes.
/// It is idempotent - calling it on every startup is safe.
///
/// # Tables Created
/// - `notes` - Free-form text notes
/// - `snippets` - Code snippets with an optional language
/// - `todos` - Tasks with priority, due date and completion state
/// - `metadata` - Key/value pairs, including the schema version
///
/// Tags live in a `tags` column as a normalized comma-separated string.
/// `AUTOINCREMENT` keeps ids from being reused after deletion.
pub fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    // ===========================================
    // Notes Table
    // ===========================================
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS notes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT,
            content TEXT NOT NULL,
            tags TEXT NOT NULL DEFAULT '',
            starred INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );",
    )?;

    // ===========================================
    // Snippets Table
    // ===========================================
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS snippets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT,
            code TEXT NOT NULL,
            language TEXT,
            description TEXT,
            tags TEXT NOT NULL DEFAULT '',
            starred INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );",
    )?;

    // ===========================================
    // Todos Table
    // ===========================================
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS todos (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT,
            priority TEXT NOT NULL DEFAULT 'medium'
                CHECK (priority IN ('low', 'medium', 'high')),
            due_date TEXT,
            completed INTEGER NOT NULL DEFAULT 0,
            tags TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );",
    )?;

    // ===========================================
    // Indexes
    // ===========================================
    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_notes_created ON notes(created_at);
         CREATE INDEX IF NOT EXISTS idx_notes_updated ON notes(updated_at);
         CREATE INDEX IF NOT EXISTS idx_snippets_updated ON snippets(updated_at);
         CREATE INDEX IF NOT EXISTS idx_snippets_language ON snippets(language);
         CREATE INDEX IF NOT EXISTS idx_todos_updated ON todos(updated_at);
         CREATE INDEX IF NOT EXISTS idx_todos_completed ON todos(completed);
         CREATE INDEX IF NOT EXISTS idx_todos_priority ON todos(priority);",
    )?;

    // ===========================================
    // Metadata Table
    // ===========================================
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS metadata (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );",
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO metadata (key, value) VALUES ('schema_version', ?1)",
        [SCHEMA_VERSION.to_string()],
    )?;

    Ok(())
}

/// Returns the recorded schema version, or 0 if none is recorded.
pub fn get_schema_version(conn: &Connection) -> rusqlite::Result<i64> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM metadata WHERE key = 'schema_version'",
            [],
            |row| row.get(0),
        )
        .or_else(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => Ok(None),
            other => Err(other),
        })?;
    Ok(value.and_then(|v| v.parse().ok()).unwrap_or(0))
}
