//! Column encodings for timestamps, dates, tags and priorities.
//!
//! Timestamps are RFC 3339 in UTC with exactly six fractional digits and a
//! `Z` suffix, so comparing the stored text compares the instants.

use crate::domain::{DUE_DATE_FORMAT, Priority, TagSet};
use crate::store::{StoreError, StoreResult};
use chrono::{DateTime, NaiveDate, SecondsFormat, SubsecRound, Utc};
use rusqlite::Row;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, Type, ValueRef};

/// Drops sub-microsecond precision so a value survives a storage round trip.
pub(crate) fn truncate(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.trunc_subsecs(6)
}

pub(crate) fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(s: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Corrupt(format!("invalid timestamp '{}': {}", s, e)))
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DUE_DATE_FORMAT).to_string()
}

/// Reads a timestamp column inside a row-mapping closure.
pub(crate) fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Reads an optional `YYYY-MM-DD` column.
pub(crate) fn date_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<NaiveDate>> {
    let raw: Option<String> = row.get(idx)?;
    raw.map(|s| NaiveDate::parse_from_str(&s, DUE_DATE_FORMAT))
        .transpose()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Maps row-decoding failures to `Corrupt`, everything else to `Database`.
pub(crate) fn decode_error(err: rusqlite::Error) -> StoreError {
    match err {
        rusqlite::Error::FromSqlConversionFailure(idx, _, source) => {
            StoreError::Corrupt(format!("column {}: {}", idx, source))
        }
        rusqlite::Error::InvalidColumnType(idx, name, ty) => {
            StoreError::Corrupt(format!("column {} ({}) has unexpected type {}", idx, name, ty))
        }
        other => StoreError::Database(other),
    }
}

impl ToSql for TagSet {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.serialize()))
    }
}

impl FromSql for TagSet {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str().map(TagSet::deserialize)
    }
}

impl ToSql for Priority {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Priority {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn timestamp_format_is_fixed_width() {
        let ts = Utc.with_ymd_and_hms(2026, 3, 15, 9, 5, 0).unwrap();
        assert_eq!(format_timestamp(ts), "2026-03-15T09:05:00.000000Z");
    }

    #[test]
    fn timestamp_roundtrip_after_truncate() {
        let ts = truncate(Utc::now());
        assert_eq!(parse_timestamp(&format_timestamp(ts)).unwrap(), ts);
    }

    #[test]
    fn text_order_matches_time_order() {
        let earlier = Utc.with_ymd_and_hms(2026, 3, 15, 9, 0, 0).unwrap();
        let later = earlier + chrono::Duration::microseconds(1);
        assert!(format_timestamp(earlier) < format_timestamp(later));
    }

    #[test]
    fn parse_timestamp_rejects_garbage() {
        let err = parse_timestamp("yesterday").unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }

    #[test]
    fn date_format() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        assert_eq!(format_date(date), "2026-03-05");
    }
}
