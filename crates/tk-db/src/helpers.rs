//! Row-to-entity parsing helpers.
//!
//! Every repo converts `libsql::Row` (column-indexed) into typed entity
//! structs. These helpers isolate the parsing logic and handle the dual
//! datetime format issue (`SQLite`'s `datetime('now')` vs Rust's `to_rfc3339()`).

use chrono::{DateTime, Utc};
use tk_core::entities::Metadata;

use crate::error::DatabaseError;

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00+00:00"`) and `SQLite`'s default
/// format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// Works with all tk-core enums that use `#[serde(rename_all = "snake_case")]`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any enum variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Parse a TEXT column holding a JSON object. Empty strings read as `{}`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the column holds invalid JSON or a
/// non-object value.
pub fn parse_metadata(s: &str) -> Result<Metadata, DatabaseError> {
    if s.trim().is_empty() {
        return Ok(Metadata::new());
    }
    match serde_json::from_str(s) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(other) => Err(DatabaseError::Query(format!(
            "Metadata column is not a JSON object: {other}"
        ))),
        Err(e) => Err(DatabaseError::Query(format!("Invalid JSON in metadata column: {e}"))),
    }
}

/// Read an INTEGER flag column as `bool`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_flag(row: &libsql::Row, idx: i32) -> Result<bool, DatabaseError> {
    Ok(row.get::<i64>(idx)? != 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tk_core::enums::Release;

    #[test]
    fn parses_both_datetime_formats() {
        let a = parse_datetime("2026-02-09T14:30:00+00:00").unwrap();
        let b = parse_datetime("2026-02-09 14:30:00").unwrap();
        assert_eq!(a, b);
        assert!(parse_datetime("yesterday").is_err());
    }

    #[test]
    fn parses_release_enum() {
        assert_eq!(parse_enum::<Release>("release").unwrap(), Release::Release);
        assert!(parse_enum::<Release>("final").is_err());
    }

    #[test]
    fn metadata_must_be_an_object() {
        assert!(parse_metadata("").unwrap().is_empty());
        assert_eq!(parse_metadata(r#"{"a": 1}"#).unwrap().len(), 1);
        assert!(parse_metadata("[1, 2]").is_err());
        assert!(parse_metadata("{not json").is_err());
    }
}
