// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! lincache - export a local issue-tracker cache as a versioned JSON snapshot.
//!
//! This crate is the command-line front end over [`lincache_core`]. It
//! resolves where the record store lives, loads the optional config file,
//! and prints either the export snapshot or a discovery report to stdout.
//!
//! # Main Components
//!
//! - [`Cli`] - Command-line arguments
//! - [`Config`] - Optional TOML configuration
//! - [`Settings`] - Store root, database selector and export tunables for one run
//! - [`Error`] - Error types for the few fatal failures

mod cli;
mod commands;

pub mod config;
pub mod env;
pub mod error;
pub mod logging;

pub use cli::{Cli, Command, OutputFormat};
pub use config::{Config, Settings};
pub use error::{Error, Result};

/// Runs one invocation.
///
/// Store problems degrade to an empty result; only configuration and
/// output failures are returned as errors.
pub fn run(cli: Cli) -> Result<()> {
    let config = Config::locate(cli.config.as_deref(), env::config_path().as_deref())?;
    let settings = config.settings(cli.store.clone(), env::store_root());
    tracing::debug!("store root: {}", settings.store_root.display());

    match cli.resolved_command() {
        Command::Export => commands::export::run(&settings, cli.output),
        Command::Discover => commands::discover::run(&settings, cli.output),
    }
}
