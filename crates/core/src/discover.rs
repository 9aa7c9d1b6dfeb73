// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Store discovery reports.
//!
//! Instead of exporting, discovery samples every collection and reports what
//! the classifier makes of it. Used to diagnose classification drift when the
//! source application changes its schema.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::classify::{detect, EntityKind};
use crate::error::Result;
use crate::record::Record;
use crate::store::{is_internal_collection, RecordStore};

/// Strings longer than this are truncated in sample records.
pub const MAX_SAMPLE_STRING_CHARS: usize = 100;

/// Arrays longer than this are truncated in sample records.
pub const MAX_SAMPLE_ARRAY_ITEMS: usize = 5;

/// Error text reported for a collection that failed mid-read.
pub const STORE_READ_ERROR: &str = "Failed to read store";

const ESTIMATION_FIELDS: [&str; 3] =
    ["issueEstimationType", "issueEstimationAllowZero", "issueEstimationExtended"];

/// What discovery learned about one collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreInfo {
    pub name: String,
    pub sample_keys: Vec<String>,
    pub sample_record: Option<Record>,
    pub record_count_estimate: usize,
    pub detected_type: Option<EntityKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StoreInfo {
    fn new(name: String) -> Self {
        StoreInfo {
            name,
            sample_keys: Vec::new(),
            sample_record: None,
            record_count_estimate: 0,
            detected_type: None,
            error: None,
        }
    }
}

/// The discovery document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryReport {
    pub stores: Vec<StoreInfo>,
    pub field_analysis: BTreeMap<String, bool>,
    pub detected_types: Vec<EntityKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DiscoveryReport {
    /// A report with no stores and an explanatory note.
    pub fn with_note(note: impl Into<String>) -> Self {
        DiscoveryReport { note: Some(note.into()), ..Default::default() }
    }

    /// A report with no stores and an error.
    pub fn with_error(error: impl Into<String>) -> Self {
        DiscoveryReport { error: Some(error.into()), ..Default::default() }
    }
}

/// Samples every non-internal collection of `store`.
pub fn discover(store: &dyn RecordStore) -> DiscoveryReport {
    let names = match store.collection_names() {
        Ok(names) => names,
        Err(e) => return DiscoveryReport::with_error(format!("Failed to iterate stores: {e}")),
    };

    let stores: Vec<StoreInfo> = names
        .into_iter()
        .filter(|name| !is_internal_collection(name))
        .map(|name| inspect(store, name))
        .collect();

    DiscoveryReport {
        field_analysis: field_analysis(&stores),
        detected_types: stores.iter().filter_map(|s| s.detected_type).collect(),
        stores,
        note: None,
        error: None,
    }
}

fn inspect(store: &dyn RecordStore, name: String) -> StoreInfo {
    let mut info = StoreInfo::new(name);
    match sample(store, &info.name) {
        Ok((count, first)) => {
            info.record_count_estimate = count;
            if let Some(first) = first.filter(|r| !r.is_empty()) {
                let mut keys: Vec<String> = first.keys().cloned().collect();
                keys.sort();
                info.sample_keys = keys;
                info.detected_type = detect(&first);
                info.sample_record = Some(redact(&first));
            }
        }
        Err(e) => {
            tracing::warn!("discovery could not read {}: {}", info.name, e);
            info.error = Some(STORE_READ_ERROR.to_string());
        }
    }
    info
}

// Counts leading mapping records; the first non-mapping ends the count.
fn sample(store: &dyn RecordStore, name: &str) -> Result<(usize, Option<Record>)> {
    let mut count = 0;
    let mut first = None;
    for value in store.records(name)? {
        let Value::Object(record) = value? else {
            break;
        };
        if first.is_none() {
            first = Some(record);
        }
        count += 1;
    }
    Ok((count, first))
}

/// Shortens long strings and arrays so samples stay readable.
pub fn redact(record: &Record) -> Record {
    record
        .iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) if s.chars().count() > MAX_SAMPLE_STRING_CHARS => {
                    let head: String = s.chars().take(MAX_SAMPLE_STRING_CHARS).collect();
                    Value::String(format!("{head}..."))
                }
                Value::Array(items) if items.len() > MAX_SAMPLE_ARRAY_ITEMS => {
                    Value::Array(items[..MAX_SAMPLE_ARRAY_ITEMS].to_vec())
                }
                other => other.clone(),
            };
            (key.clone(), value)
        })
        .collect()
}

/// Flags describing which optional fields each detected kind carries.
///
/// When several collections share a kind, the last one wins.
pub fn field_analysis(stores: &[StoreInfo]) -> BTreeMap<String, bool> {
    let mut analysis = BTreeMap::new();
    for store in stores {
        let has = |key: &str| store.sample_keys.iter().any(|k| k == key);
        let flags: Vec<(&str, bool)> = match store.detected_type {
            Some(EntityKind::Team) => vec![(
                "teams_has_estimation_fields",
                ESTIMATION_FIELDS.iter().all(|field| has(field)),
            )],
            Some(EntityKind::Project) => vec![
                ("projects_has_state_field", has("state")),
                ("projects_has_statusId", has("statusId")),
            ],
            Some(EntityKind::Label) => vec![
                ("labels_has_team_id", has("teamId")),
                ("labels_has_parent_id", has("parentId")),
            ],
            Some(EntityKind::Cycle) => {
                vec![("cycles_has_team_id", has("teamId")), ("cycles_has_name", has("name"))]
            }
            Some(EntityKind::User) => vec![("users_has_email", has("email"))],
            _ => Vec::new(),
        };
        for (flag, value) in flags {
            analysis.insert(flag.to_string(), value);
        }
    }
    analysis
}

#[cfg(test)]
#[path = "discover_tests.rs"]
mod tests;
