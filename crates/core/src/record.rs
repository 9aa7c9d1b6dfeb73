// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Raw records and typed field access.
//!
//! A raw record is whatever mapping the source store yielded. Nothing about
//! its shape is guaranteed, so every accessor here falls back to an empty
//! value instead of failing.

use serde_json::{Map, Value};

/// An untyped, string-keyed record read from the source store.
pub type Record = Map<String, Value>;

/// Returns the record's identifier if it is a non-empty string.
pub fn record_id(record: &Record) -> Option<&str> {
    non_empty_str(record, "id")
}

/// Returns true if every key in `keys` is present (null values count).
pub fn has_keys(record: &Record, keys: &[&str]) -> bool {
    keys.iter().all(|k| record.contains_key(*k))
}

/// Returns the string at `key`, or `""` if absent or not a string.
pub fn str_field<'a>(record: &'a Record, key: &str) -> &'a str {
    record.get(key).and_then(Value::as_str).unwrap_or("")
}

/// Returns the string at `key` only if it is present and non-empty.
pub fn non_empty_str<'a>(record: &'a Record, key: &str) -> Option<&'a str> {
    record.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Returns the boolean at `key`, or `false` if absent or not a boolean.
pub fn bool_field(record: &Record, key: &str) -> bool {
    record.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// Returns the integer at `key`, or `0`.
///
/// Floats are truncated; anything else counts as absent.
pub fn int_field(record: &Record, key: &str) -> i64 {
    match record.get(key) {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)).unwrap_or(0),
        _ => 0,
    }
}

/// Returns the string elements of the array at `key`.
///
/// Non-string elements are dropped; a missing or non-array value is empty.
pub fn str_list(record: &Record, key: &str) -> Vec<String> {
    record
        .get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
