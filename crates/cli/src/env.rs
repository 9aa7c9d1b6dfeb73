// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables used by the CLI are defined here
//! with typed accessor functions. The variable name constants are generated
//! by `build.rs` and live in the [`vars`] submodule.

use std::path::PathBuf;

/// Generated environment variable name constants.
pub mod vars {
    include!(concat!(env!("OUT_DIR"), "/env_vars.rs"));
}

/// Returns the value of `LINCACHE_STORE` if set and non-empty.
pub fn store_root() -> Option<PathBuf> {
    non_empty_path(vars::LINCACHE_STORE)
}

/// Returns the value of `LINCACHE_CONFIG` if set and non-empty.
pub fn config_path() -> Option<PathBuf> {
    non_empty_path(vars::LINCACHE_CONFIG)
}

fn non_empty_path(var: &str) -> Option<PathBuf> {
    std::env::var_os(var).filter(|v| !v.is_empty()).map(PathBuf::from)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
