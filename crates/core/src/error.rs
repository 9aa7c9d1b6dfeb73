// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for lincache-core operations.

use std::path::PathBuf;

use thiserror::Error;

/// All possible errors that can occur in lincache-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid state type: '{0}'\n  hint: valid types are: started, unstarted, completed, canceled, backlog")]
    InvalidStateType(String),

    #[error("collection not found: {0}")]
    CollectionNotFound(String),

    #[error("cannot open store at {path}: {reason}")]
    Unopenable { path: PathBuf, reason: String },

    #[error("malformed record in {collection} at line {line}: {source}")]
    MalformedLine {
        collection: String,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for lincache-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
