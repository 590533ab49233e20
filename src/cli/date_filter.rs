//! Date filter parsing for CLI commands.

use crate::domain::DUE_DATE_FORMAT;
use crate::store::DateRange;
use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Lower bound for `--created` / `--updated`.
///
/// Accepts:
/// - Relative: "7d", "30d" (that many days before `now`)
/// - Absolute: "2026-01-15" (midnight UTC of that day)
pub fn parse_since(s: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, String> {
    let s = s.trim();

    if let Some(days) = s.strip_suffix('d') {
        let days: i64 = days
            .parse()
            .map_err(|_| format!("invalid relative date: {}", s))?;
        if days < 0 {
            return Err(format!("days must be non-negative: {}", s));
        }
        return Duration::try_days(days)
            .and_then(|span| now.checked_sub_signed(span))
            .ok_or_else(|| format!("date out of range: {}", s));
    }

    let date = NaiveDate::parse_from_str(s, DUE_DATE_FORMAT)
        .map_err(|_| format!("invalid date format (expected YYYY-MM-DD or Nd): {}", s))?;
    Ok(date.and_time(chrono::NaiveTime::MIN).and_utc())
}

/// Builds a "since" range from an optional flag value.
pub fn since_range(flag: &str, value: Option<&str>, now: DateTime<Utc>) -> Result<DateRange, String> {
    match value {
        None => Ok(DateRange::default()),
        Some(v) => parse_since(v, now)
            .map(DateRange::since)
            .map_err(|e| format!("invalid --{} filter: {}", flag, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn parse_relative_days() {
        assert_eq!(parse_since("7d", now()).unwrap(), now() - Duration::days(7));
        assert_eq!(parse_since("0d", now()).unwrap(), now());
    }

    #[test]
    fn parse_absolute_date() {
        let expected = Utc.with_ymd_and_hms(2026, 1, 15, 0, 0, 0).unwrap();
        assert_eq!(parse_since("2026-01-15", now()).unwrap(), expected);
    }

    #[test]
    fn parse_invalid_format() {
        assert!(parse_since("invalid", now()).is_err());
        assert!(parse_since("2026/01/15", now()).is_err());
        assert!(parse_since("-5d", now()).is_err());
    }

    #[test]
    fn parse_relative_out_of_range() {
        let err = parse_since("9999999999999d", now()).unwrap_err();
        assert_eq!(err, "date out of range: 9999999999999d");
        assert!(parse_since("99999999d", now()).is_err());
    }

    #[test]
    fn since_range_names_the_flag() {
        let err = since_range("updated", Some("soon"), now()).unwrap_err();
        assert!(err.starts_with("invalid --updated filter"));
        assert!(since_range("created", None, now()).unwrap().is_unbounded());
    }
}
