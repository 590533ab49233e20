//! Generic record primitives used by the repositories.
//!
//! Every primitive works on the table for an [`EntityKind`] and a list of
//! `(column, value)` pairs; entity-specific knowledge stays in
//! `store::entity`. Mutations run in their own transaction.

use super::codec::{self, format_timestamp, parse_timestamp};
use super::query::build_select;
use super::{Store, table_name};
use crate::domain::EntityKind;
use crate::store::filter::ResolvedQuery;
use crate::store::{Fields, StoreError, StoreResult};
use chrono::{DateTime, Duration, Utc};
use log::debug;
use rusqlite::types::Value;
use rusqlite::{OptionalExtension, Row, params_from_iter};

impl Store {
    // ===========================================
    // Insert
    // ===========================================

    /// Inserts a record and returns its new id.
    ///
    /// `created_at` and `updated_at` are both set to the current time.
    pub(crate) fn insert_record(&self, kind: EntityKind, fields: Fields) -> StoreResult<i64> {
        let stamp = format_timestamp(self.now());
        let (mut columns, mut values): (Vec<&str>, Vec<Value>) = fields.into_iter().unzip();
        columns.extend(["created_at", "updated_at"]);
        values.push(Value::Text(stamp.clone()));
        values.push(Value::Text(stamp));

        let placeholders = vec!["?"; columns.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table_name(kind),
            columns.join(", "),
            placeholders
        );

        let tx = self.transaction()?;
        tx.execute(&sql, params_from_iter(values.iter()))?;
        let id = tx.conn().last_insert_rowid();
        tx.commit()?;

        debug!("inserted {} #{}", kind, id);
        Ok(id)
    }

    // ===========================================
    // Fetch
    // ===========================================

    /// Loads one record, or `None` if the id does not exist.
    pub(crate) fn fetch_record<T>(
        &self,
        kind: EntityKind,
        columns: &str,
        id: i64,
        map: impl FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    ) -> StoreResult<Option<T>> {
        let sql = format!("SELECT {} FROM {} WHERE id = ?1", columns, table_name(kind));
        self.conn
            .query_row(&sql, [id], map)
            .optional()
            .map_err(codec::decode_error)
    }

    // ===========================================
    // Update
    // ===========================================

    /// Writes the given columns of an existing record.
    ///
    /// `updated_at` is always refreshed, even when `fields` is empty, and is
    /// guaranteed to move forward past its previous value.
    pub(crate) fn update_record(
        &self,
        kind: EntityKind,
        id: i64,
        fields: Fields,
    ) -> StoreResult<DateTime<Utc>> {
        let table = table_name(kind);
        let tx = self.transaction()?;

        let previous: Option<String> = tx
            .conn()
            .query_row(
                &format!("SELECT updated_at FROM {} WHERE id = ?1", table),
                [id],
                |row| row.get(0),
            )
            .optional()?;
        let Some(previous) = previous else {
            return Err(StoreError::not_found(kind, id));
        };
        let stamp = next_update_stamp(self.now(), parse_timestamp(&previous)?);

        let (mut columns, mut values): (Vec<&str>, Vec<Value>) = fields.into_iter().unzip();
        columns.push("updated_at");
        values.push(Value::Text(format_timestamp(stamp)));
        values.push(Value::Integer(id));

        let assignments: Vec<String> = columns.iter().map(|c| format!("{} = ?", c)).collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?",
            table,
            assignments.join(", ")
        );
        tx.execute(&sql, params_from_iter(values.iter()))?;
        tx.commit()?;

        debug!("updated {} #{} ({} columns)", kind, id, columns.len());
        Ok(stamp)
    }

    // ===========================================
    // Delete
    // ===========================================

    /// Deletes the given ids and returns how many rows were removed.
    ///
    /// Unknown and repeated ids are skipped without error.
    pub(crate) fn delete_records(&self, kind: EntityKind, ids: &[i64]) -> StoreResult<usize> {
        let sql = format!("DELETE FROM {} WHERE id = ?1", table_name(kind));
        let tx = self.transaction()?;
        let mut removed = 0;
        for id in ids {
            removed += tx.execute(&sql, [id])?;
        }
        tx.commit()?;

        debug!("deleted {} of {} requested {}", removed, ids.len(), kind.plural());
        Ok(removed)
    }

    // ===========================================
    // Select
    // ===========================================

    /// Runs a resolved query and maps every row.
    pub(crate) fn select_records<T>(
        &self,
        query: &ResolvedQuery,
        columns: &str,
        text_columns: &[&str],
        map: impl FnMut(&Row<'_>) -> rusqlite::Result<T>,
    ) -> StoreResult<Vec<T>> {
        let sql = build_select(query, columns, text_columns, self.today());
        debug!("select: {}", sql.sql);

        let mut stmt = self.conn.prepare(&sql.sql)?;
        let rows = stmt
            .query_map(params_from_iter(sql.params.iter()), map)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(codec::decode_error)?;
        Ok(rows)
    }

    /// Number of records of `kind`.
    pub(crate) fn count_records(&self, kind: EntityKind) -> StoreResult<usize> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", table_name(kind)),
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}

/// The next `updated_at`: now, but never at or before the previous value.
pub(crate) fn next_update_stamp(now: DateTime<Utc>, previous: DateTime<Utc>) -> DateTime<Utc> {
    now.max(previous + Duration::microseconds(1))
}
