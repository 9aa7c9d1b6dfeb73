// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Entity table construction.
//!
//! Each sub-collection is classified once, from its first record, and then
//! scanned in full into the matching table. Records are keyed by `id`, and a
//! later record with the same id replaces the earlier one.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::classify::{classify, EntityKind};
use crate::error::Result;
use crate::record::{record_id, Record};
use crate::store::{is_internal_collection, RecordStore};

/// Records of one entity kind, keyed by identifier.
pub type EntityTable = BTreeMap<String, Record>;

/// The seven typed tables produced by one scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityTables {
    pub projects: EntityTable,
    pub teams: EntityTable,
    pub issues: EntityTable,
    pub states: EntityTable,
    pub users: EntityTable,
    pub cycles: EntityTable,
    pub labels: EntityTable,
}

impl EntityTables {
    /// Returns the table holding entities of `kind`.
    pub fn table(&self, kind: EntityKind) -> &EntityTable {
        match kind {
            EntityKind::Project => &self.projects,
            EntityKind::Team => &self.teams,
            EntityKind::Issue => &self.issues,
            EntityKind::WorkflowState => &self.states,
            EntityKind::User => &self.users,
            EntityKind::Cycle => &self.cycles,
            EntityKind::Label => &self.labels,
        }
    }

    fn table_mut(&mut self, kind: EntityKind) -> &mut EntityTable {
        match kind {
            EntityKind::Project => &mut self.projects,
            EntityKind::Team => &mut self.teams,
            EntityKind::Issue => &mut self.issues,
            EntityKind::WorkflowState => &mut self.states,
            EntityKind::User => &mut self.users,
            EntityKind::Cycle => &mut self.cycles,
            EntityKind::Label => &mut self.labels,
        }
    }

    /// Returns true if no table holds any record.
    pub fn is_empty(&self) -> bool {
        EntityKind::ALL.iter().all(|kind| self.table(*kind).is_empty())
    }
}

/// Why a sub-collection contributed nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Name marks it as the source application's own bookkeeping.
    Internal,
    /// Empty, or its first record is not a non-empty mapping.
    NoRecords,
    /// The sample record matched no entity shape.
    Unclassified,
    /// Reading failed part way; nothing from it was kept.
    ReadFailed(String),
}

/// What scanning one sub-collection produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Loaded { kind: EntityKind, records: usize },
    Skipped(SkipReason),
}

/// Per-collection scan report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionScan {
    pub name: String,
    pub outcome: ScanOutcome,
}

/// Tables plus the per-collection outcomes that produced them.
#[derive(Debug, Clone, Default)]
pub struct TableBuild {
    pub tables: EntityTables,
    pub scans: Vec<CollectionScan>,
}

/// Scans every sub-collection of `store` into typed tables.
///
/// Only listing the collections can fail; a failure inside one collection is
/// recorded in its [`CollectionScan`] and the scan moves on.
pub fn build_tables(store: &dyn RecordStore) -> Result<TableBuild> {
    let mut build = TableBuild::default();

    for name in store.collection_names()? {
        let outcome = if is_internal_collection(&name) {
            ScanOutcome::Skipped(SkipReason::Internal)
        } else {
            match scan_collection(store, &name) {
                Ok(Scan::Loaded(kind, rows)) => {
                    let records = rows.len();
                    build.tables.table_mut(kind).extend(rows);
                    ScanOutcome::Loaded { kind, records }
                }
                Ok(Scan::Skipped(reason)) => ScanOutcome::Skipped(reason),
                Err(e) => {
                    tracing::warn!("skipping collection {}: {}", name, e);
                    ScanOutcome::Skipped(SkipReason::ReadFailed(e.to_string()))
                }
            }
        };
        tracing::debug!("collection {}: {:?}", name, outcome);
        build.scans.push(CollectionScan { name, outcome });
    }

    Ok(build)
}

/// Returns the first record of a collection if it is a non-empty mapping.
///
/// A non-mapping first record means the collection holds nothing
/// classifiable, so no further records are inspected.
pub fn sample_record(store: &dyn RecordStore, collection: &str) -> Result<Option<Record>> {
    match store.records(collection)?.next().transpose()? {
        Some(Value::Object(record)) if !record.is_empty() => Ok(Some(record)),
        _ => Ok(None),
    }
}

// Rows are held back until the whole collection has been read, so a
// collection that fails part way contributes nothing.
enum Scan {
    Loaded(EntityKind, Vec<(String, Record)>),
    Skipped(SkipReason),
}

fn scan_collection(store: &dyn RecordStore, name: &str) -> Result<Scan> {
    let Some(sample) = sample_record(store, name)? else {
        return Ok(Scan::Skipped(SkipReason::NoRecords));
    };
    let Some(kind) = classify(&sample) else {
        return Ok(Scan::Skipped(SkipReason::Unclassified));
    };

    let mut rows = Vec::new();
    for value in store.records(name)? {
        if let Value::Object(record) = value? {
            if let Some(id) = record_id(&record) {
                rows.push((id.to_string(), record));
            }
        }
    }
    Ok(Scan::Loaded(kind, rows))
}

#[cfg(test)]
#[path = "tables_tests.rs"]
mod tests;
