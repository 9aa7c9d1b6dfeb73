// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

/// JSON layout written to stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Indented with two spaces
    #[default]
    Pretty,
    /// Single line
    Compact,
}

#[derive(Parser)]
#[command(name = "lincache")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Export projects, teams and workflow data from a local issue-tracker cache")]
#[command(
    long_about = "Export projects, teams and workflow data from a local issue-tracker cache.\n\n\
    Reads the application's local record store, works out which collection holds which \
    kind of entity, and prints a versioned JSON snapshot to stdout."
)]
#[command(after_help = "\
Examples:
  lincache                          Export a snapshot using the configured store
  lincache --store ./dump export    Export from a specific store root
  lincache discover                 Describe every collection and what it was classified as")]
pub struct Cli {
    /// Store root directory (overrides LINCACHE_STORE and the config file)
    #[arg(long, global = true, value_name = "path")]
    pub store: Option<PathBuf>,

    /// Config file (overrides LINCACHE_CONFIG)
    #[arg(long, global = true, value_name = "path")]
    pub config: Option<PathBuf>,

    /// Output layout
    #[arg(long, short, global = true, value_enum, default_value_t = OutputFormat::Pretty)]
    pub output: OutputFormat,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(long, short, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Same as the discover subcommand
    #[arg(long, hide = true)]
    pub discover: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// The command to run; a bare invocation exports.
    pub fn resolved_command(&self) -> Command {
        match self.command {
            Some(command) => command,
            None if self.discover => Command::Discover,
            None => Command::Export,
        }
    }
}

#[derive(Subcommand, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Export a versioned snapshot (default)
    Export,

    /// Report every collection's sample, size and detected entity type
    Discover,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
