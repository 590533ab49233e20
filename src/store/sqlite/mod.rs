//! SQLite-backed record store.

pub(crate) mod codec;
mod connection;
pub(crate) mod query;
mod records;
mod transaction;


use crate::domain::EntityKind;
use crate::store::Clock;
use rusqlite::Connection;

pub use transaction::Transaction;

// ===========================================
// Store Struct
// ===========================================

/// The record store.
///
/// Owns the single database connection and the clock used for timestamps.
/// Repositories and search borrow it; nothing else touches the connection.
pub struct Store {
    pub(crate) conn: Connection,
    clock: Box<dyn Clock>,
}

/// Table holding records of the given kind.
pub(crate) fn table_name(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Note => "notes",
        EntityKind::Snippet => "snippets",
        EntityKind::Todo => "todos",
    }
}
