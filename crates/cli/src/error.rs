// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// All possible errors that can occur in the lincache CLI.
///
/// Only setup and output failures end up here. Problems with the source
/// store degrade to an empty export instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("config file not found: {0}\n  hint: check --config or LINCACHE_CONFIG")]
    ConfigNotFound(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("invalid {field}: {reason}")]
    InvalidSetting { field: &'static str, reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for lincache CLI operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
