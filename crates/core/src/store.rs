// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Record store collaborator.
//!
//! The engine never touches the on-disk format of the source application. It
//! only needs named sub-collections, each yielding a lazy sequence of raw
//! values. [`JsonlStore`] reads a database directory holding one
//! `<collection>.jsonl` file per sub-collection; [`MemoryStore`] holds
//! collections in memory.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{Error, Result};

/// File extension of a collection inside a [`JsonlStore`] directory.
pub const COLLECTION_EXT: &str = "jsonl";

/// A lazy sequence of raw record values.
pub type Records<'a> = Box<dyn Iterator<Item = Result<Value>> + 'a>;

/// Read access to a schema-less record store.
pub trait RecordStore {
    /// Lists the names of all sub-collections.
    fn collection_names(&self) -> Result<Vec<String>>;

    /// Returns the records of a sub-collection from the beginning.
    ///
    /// Each call starts a fresh pass, so a collection can be sampled and
    /// then scanned in full.
    fn records<'a>(&'a self, collection: &str) -> Result<Records<'a>>;
}

/// Returns true for collections that hold the source application's own
/// bookkeeping rather than user data.
pub fn is_internal_collection(name: &str) -> bool {
    name.is_empty() || name.starts_with('_') || name.contains("_partial")
}

/// An in-memory store with collections kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: Vec<(String, Vec<Value>)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a collection, replacing any existing one with the same name.
    pub fn with_collection(mut self, name: impl Into<String>, records: Vec<Value>) -> Self {
        let name = name.into();
        self.collections.retain(|(existing, _)| *existing != name);
        self.collections.push((name, records));
        self
    }
}

impl RecordStore for MemoryStore {
    fn collection_names(&self) -> Result<Vec<String>> {
        Ok(self.collections.iter().map(|(name, _)| name.clone()).collect())
    }

    fn records<'a>(&'a self, collection: &str) -> Result<Records<'a>> {
        let (_, records) = self
            .collections
            .iter()
            .find(|(name, _)| name == collection)
            .ok_or_else(|| Error::CollectionNotFound(collection.to_string()))?;
        Ok(Box::new(records.iter().cloned().map(Ok::<Value, Error>)))
    }
}

/// A database directory with one JSON Lines file per collection.
#[derive(Debug, Clone)]
pub struct JsonlStore {
    dir: PathBuf,
}

impl JsonlStore {
    /// Opens a database directory.
    ///
    /// Fails if `dir` is not a readable directory.
    pub fn open(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(Error::Unopenable {
                path: dir.to_path_buf(),
                reason: "not a directory".to_string(),
            });
        }
        fs::read_dir(dir).map_err(|e| Error::Unopenable {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(JsonlStore { dir: dir.to_path_buf() })
    }

    /// Returns the database directory.
    pub fn path(&self) -> &Path {
        &self.dir
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{collection}.{COLLECTION_EXT}"))
    }
}

impl RecordStore for JsonlStore {
    fn collection_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(COLLECTION_EXT) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn records<'a>(&'a self, collection: &str) -> Result<Records<'a>> {
        let path = self.collection_path(collection);
        if !path.is_file() {
            return Err(Error::CollectionNotFound(collection.to_string()));
        }
        let reader = BufReader::new(File::open(&path)?);
        let collection = collection.to_string();

        let iter = reader.lines().enumerate().filter_map(move |(idx, line)| match line {
            Err(e) => Some(Err(Error::Io(e))),
            Ok(line) if line.trim().is_empty() => None,
            Ok(line) => Some(serde_json::from_str(&line).map_err(|source| Error::MalformedLine {
                collection: collection.clone(),
                line: idx + 1,
                source,
            })),
        });
        Ok(Box::new(iter))
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
