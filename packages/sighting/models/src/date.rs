//! Sighting timestamp parsing.
//!
//! Remote records and normalised user records carry ISO-like strings that
//! may be date-only, date+time without seconds, or full RFC 3339. Naive
//! timestamps are interpreted as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parses a sighting timestamp. Returns `None` if the string is empty or
/// matches none of the accepted shapes.
#[must_use]
pub fn parse_sighting_date(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_date_only_as_midnight() {
        let dt = parse_sighting_date("2024-03-01").unwrap();
        assert_eq!(dt.to_string(), "2024-03-01 00:00:00 UTC");
    }

    #[test]
    fn parses_minutes_precision() {
        let dt = parse_sighting_date("2025-11-21T14:30").unwrap();
        assert_eq!(dt.to_string(), "2025-11-21 14:30:00 UTC");
    }

    #[test]
    fn parses_full_timestamp_with_fraction() {
        let dt = parse_sighting_date("2024-01-15T14:30:00.000").unwrap();
        assert_eq!(dt.to_string(), "2024-01-15 14:30:00 UTC");
    }

    #[test]
    fn parses_space_separator() {
        let dt = parse_sighting_date("2024-01-15 09:05:10").unwrap();
        assert_eq!(dt.to_string(), "2024-01-15 09:05:10 UTC");
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let dt = parse_sighting_date("2024-06-01T12:00:00+01:00").unwrap();
        assert_eq!(dt.to_string(), "2024-06-01 11:00:00 UTC");
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_sighting_date("").is_none());
        assert!(parse_sighting_date("   ").is_none());
        assert!(parse_sighting_date("yesterday").is_none());
        assert!(parse_sighting_date("2024-13-01").is_none());
    }
}
