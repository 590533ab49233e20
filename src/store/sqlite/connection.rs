//! Connection management for Store.

use super::Store;
use super::codec;
use super::transaction::Transaction;
use crate::store::{Clock, StoreError, StoreResult, SystemClock, create_schema, get_schema_version};
use chrono::{DateTime, NaiveDate, Utc};
use log::debug;
use rusqlite::Connection;
use rusqlite::functions::FunctionFlags;
use std::fs;
use std::path::Path;

/// Name of the SQL function used for case-insensitive substring matching.
pub(crate) const CONTAINS_FN: &str = "qnote_contains";

/// Name of the SQL function used for case-insensitive equality.
pub(crate) const EQ_IGNORE_CASE_FN: &str = "qnote_eq_ignore_case";

impl Store {
    // ===========================================
    // In-Memory Connection
    // ===========================================

    /// Opens an empty in-memory store.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::initialize(conn)
    }

    // ===========================================
    // File-Based Connection
    // ===========================================

    /// Opens or creates the database file at `path`.
    ///
    /// Missing parent directories are created. The schema is created if it
    /// does not exist yet; existing data is left alone.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        debug!("opening database at {}", path.display());
        let conn = Connection::open(path)?;
        Self::initialize(conn)
    }

    fn initialize(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        register_functions(&conn)?;
        create_schema(&conn)?;
        Ok(Self {
            conn,
            clock: Box::new(SystemClock),
        })
    }

    /// Replaces the time source.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    // ===========================================
    // Accessors
    // ===========================================

    /// Returns a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Current instant at storage precision.
    pub(crate) fn now(&self) -> DateTime<Utc> {
        codec::truncate(self.clock.now())
    }

    /// Today's date according to the store's clock.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Schema version recorded in the database.
    pub fn schema_version(&self) -> StoreResult<i64> {
        Ok(get_schema_version(&self.conn)?)
    }

    /// Begins a write transaction.
    ///
    /// The transaction rolls back on drop unless `commit()` is called.
    pub fn transaction(&self) -> StoreResult<Transaction<'_>> {
        Transaction::begin(&self.conn)
    }
}

/// Registers the Unicode-aware text functions.
///
/// - `qnote_contains(haystack, needle)`: 1 when `needle` occurs in
///   `haystack` ignoring case.
/// - `qnote_eq_ignore_case(value, other)`: 1 when both are equal ignoring case.
///
/// A NULL first argument never matches.
fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    let flags = FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC;
    conn.create_scalar_function(CONTAINS_FN, 2, flags, |ctx| {
        let haystack: Option<String> = ctx.get(0)?;
        let needle: String = ctx.get(1)?;
        Ok(haystack.is_some_and(|h| contains_ignore_case(&h, &needle)))
    })?;
    conn.create_scalar_function(EQ_IGNORE_CASE_FN, 2, flags, |ctx| {
        let value: Option<String> = ctx.get(0)?;
        let other: String = ctx.get(1)?;
        Ok(value.is_some_and(|v| eq_ignore_case(&v, &other)))
    })
}

pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
