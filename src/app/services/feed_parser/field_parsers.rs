//! Field parsing utilities for feed rows
//!
//! Parsers here never apply a fallback themselves. They report either the
//! parsed value or the raw text with a reason, and the record builder decides
//! what a failure means for the row.

use crate::Error;
use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

/// Leading decimal number, optionally signed and with an exponent
static NUMBER_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?").expect("Invalid regex")
});

/// Result of parsing a single raw field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOutcome<T> {
    Parsed(T),
    Failed { raw: String, reason: String },
}

impl<T> FieldOutcome<T> {
    fn failed(raw: &str, reason: impl Into<String>) -> Self {
        FieldOutcome::Failed {
            raw: raw.to_string(),
            reason: reason.into(),
        }
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, FieldOutcome::Parsed(_))
    }

    /// Parsed value, or `None` on failure
    pub fn ok(self) -> Option<T> {
        match self {
            FieldOutcome::Parsed(value) => Some(value),
            FieldOutcome::Failed { .. } => None,
        }
    }
}

/// Parse a discharge value in m³/s
///
/// Reads the leading number and ignores trailing text, so `12.5 m3/s` is
/// 12.5. Text with no leading number and non-finite values are failures.
pub fn parse_value(raw: &str) -> FieldOutcome<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return FieldOutcome::failed(raw, "empty value");
    }

    let Some(number) = NUMBER_PREFIX_RE.find(trimmed) else {
        return FieldOutcome::failed(raw, "invalid number: no leading digits");
    };

    match number.as_str().parse::<f64>() {
        Ok(value) if value.is_finite() => FieldOutcome::Parsed(value),
        Ok(_) => FieldOutcome::failed(raw, "non-finite value"),
        Err(e) => FieldOutcome::failed(raw, format!("invalid number: {}", e)),
    }
}

/// Parse a measurement date
///
/// Accepts a plain ISO date (`2020-04-01`) and ISO date-times
/// (`2020-04-01T00:00:00`, `2020-04-01 00:00:00`), keeping only the date.
pub fn parse_date(raw: &str) -> FieldOutcome<NaiveDate> {
    match parse_iso_date(raw) {
        Ok(date) => FieldOutcome::Parsed(date),
        Err(e) => FieldOutcome::failed(raw, e.to_string()),
    }
}

/// Parse an ISO date or date-time into a calendar date
pub fn parse_iso_date(raw: &str) -> crate::Result<NaiveDate> {
    let trimmed = raw.trim();

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S").map(|dt| dt.date()))
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .map_err(|e| {
            Error::date_parsing(
                format!("Invalid date '{}' (expected 'YYYY-MM-DD')", trimmed),
                e,
            )
        })
}

/// Get a field by position, or an empty string if the row is short
pub fn field_or_empty(fields: &[String], index: usize) -> &str {
    fields.get(index).map(String::as_str).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_plain_numbers() {
        assert_eq!(parse_value("30"), FieldOutcome::Parsed(30.0));
        assert_eq!(parse_value(" -3.5 "), FieldOutcome::Parsed(-3.5));
        assert_eq!(parse_value(".5"), FieldOutcome::Parsed(0.5));
        assert_eq!(parse_value("1.2e1"), FieldOutcome::Parsed(12.0));
    }

    #[test]
    fn test_parse_value_reads_leading_number() {
        assert_eq!(parse_value("12.5 m3/s"), FieldOutcome::Parsed(12.5));
        assert_eq!(parse_value("7,25"), FieldOutcome::Parsed(7.0));
        assert_eq!(parse_value("4e"), FieldOutcome::Parsed(4.0));
    }

    #[test]
    fn test_parse_value_failures() {
        assert!(!parse_value("").is_parsed());
        assert!(!parse_value("abc").is_parsed());
        assert!(!parse_value("n/a").is_parsed());
        assert!(!parse_value("m3/s 12").is_parsed());
        assert!(!parse_value("NaN").is_parsed());
        assert!(!parse_value("inf").is_parsed());
        assert!(matches!(parse_value("1e999"), FieldOutcome::Failed { reason, .. } if reason == "non-finite value"));
    }
}
