// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration management.
//!
//! Configuration is an optional TOML file:
//!
//! ```toml
//! [store]
//! path = "/path/to/indexeddb"      # store root holding the databases
//! database_marker = "linear_"       # substring a database name must contain
//! excluded_databases = ["linear_databases"]
//!
//! [export]
//! recent_issue_limit = 10
//! ```
//!
//! Every field is optional. The store root is resolved from, in order: the
//! `--store` flag, `LINCACHE_STORE`, `store.path`, and finally a directory
//! under the platform data dir.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use lincache_core::resolve::DEFAULT_RECENT_ISSUE_LIMIT;
use lincache_core::{DatabaseSelector, ExportOptions};

use crate::error::{Error, Result};

const APP_DIR_NAME: &str = "lincache";
const CONFIG_FILE_NAME: &str = "config.toml";
const STORE_DIR_NAME: &str = "indexeddb";

/// Contents of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub store: StoreConfig,
    pub export: ExportConfig,
}

/// `[store]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Store root directory.
    pub path: Option<PathBuf>,
    /// Substring a database directory name must contain.
    pub database_marker: Option<String>,
    /// Database names to ignore even when they contain the marker.
    pub excluded_databases: Option<Vec<String>>,
}

/// `[export]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Maximum recent issue titles per project.
    pub recent_issue_limit: Option<usize>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub store_root: PathBuf,
    pub selector: DatabaseSelector,
    pub options: ExportOptions,
}

impl Config {
    /// Loads and validates a config file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::ConfigNotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Finds and loads the config file for this run.
    ///
    /// An explicitly named file (flag or environment) must exist. The
    /// default location is only read when present.
    pub fn locate(explicit: Option<&Path>, from_env: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit.or(from_env) {
            return Config::load(path);
        }
        match default_config_path() {
            Some(path) if path.is_file() => {
                tracing::debug!("using config {}", path.display());
                Config::load(&path)
            }
            _ => Ok(Config::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.store.database_marker.as_deref().is_some_and(|m| m.trim().is_empty()) {
            return Err(Error::InvalidSetting {
                field: "store.database_marker",
                reason: "cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Resolves the settings for a run.
    ///
    /// `store_flag` and `store_env` take precedence over `store.path`.
    pub fn settings(&self, store_flag: Option<PathBuf>, store_env: Option<PathBuf>) -> Settings {
        let store_root = store_flag
            .or(store_env)
            .or_else(|| self.store.path.clone())
            .unwrap_or_else(default_store_root);

        let mut selector = DatabaseSelector::default();
        if let Some(marker) = &self.store.database_marker {
            selector.marker = marker.clone();
        }
        if let Some(excluded) = &self.store.excluded_databases {
            selector.excluded = excluded.clone();
        }

        let options = ExportOptions {
            recent_issue_limit: self.export.recent_issue_limit.unwrap_or(DEFAULT_RECENT_ISSUE_LIMIT),
        };

        Settings { store_root, selector, options }
    }
}

/// Default config file: `<config_dir>/lincache/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Default store root: `<data_dir>/lincache/indexeddb`.
pub fn default_store_root() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR_NAME).join(STORE_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(".lincache").join(STORE_DIR_NAME))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
