// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Locating the source database under a store root.
//!
//! A store root holds one directory per database. The source application
//! keeps several, so the one to read is picked by name.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::store::{JsonlStore, RecordStore};

/// Default substring a database name must contain.
pub const DEFAULT_DATABASE_MARKER: &str = "linear_";

/// Database names that match the marker but never hold entity data.
pub const DEFAULT_EXCLUDED_DATABASES: &[&str] = &["linear_databases"];

/// Rules for picking a database under the store root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSelector {
    /// Substring a database directory name must contain.
    pub marker: String,
    /// Names rejected even when they contain the marker.
    pub excluded: Vec<String>,
}

impl Default for DatabaseSelector {
    fn default() -> Self {
        DatabaseSelector {
            marker: DEFAULT_DATABASE_MARKER.to_string(),
            excluded: DEFAULT_EXCLUDED_DATABASES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl DatabaseSelector {
    /// Returns true if a database with this name is a candidate.
    pub fn accepts(&self, name: &str) -> bool {
        name.contains(&self.marker) && !self.excluded.iter().any(|e| e == name)
    }
}

/// Result of resolving a store root to a database.
#[derive(Debug)]
pub enum Source {
    /// The store root does not exist (application not installed).
    Missing,
    /// No database under the root matched the selector or held collections.
    NoDatabase,
    /// The store root exists but could not be read.
    Unopenable(Error),
    /// A database was selected.
    Ready(JsonlStore),
}

/// Resolves `root` to the first matching database, in name order.
///
/// A database is selected only if it lists at least one collection.
pub fn locate(root: &Path, selector: &DatabaseSelector) -> Source {
    if !root.exists() {
        return Source::Missing;
    }
    match candidate_dirs(root, selector) {
        Ok(candidates) => {
            for dir in candidates {
                match JsonlStore::open(&dir) {
                    Ok(store) if has_collections(&store) => return Source::Ready(store),
                    Ok(_) => tracing::debug!("database {} has no collections", dir.display()),
                    Err(e) => tracing::debug!("skipping database {}: {}", dir.display(), e),
                }
            }
            Source::NoDatabase
        }
        Err(e) => Source::Unopenable(e),
    }
}

fn candidate_dirs(root: &Path, selector: &DatabaseSelector) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(root).map_err(|e| Error::Unopenable {
        path: root.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut dirs = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let accepted = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| selector.accepts(name));
        if accepted && path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn has_collections(store: &JsonlStore) -> bool {
    store.collection_names().is_ok_and(|names| !names.is_empty())
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
