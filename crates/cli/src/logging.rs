// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostic logging to stderr.
//!
//! stdout carries only the JSON document, so every log line goes to stderr.

use tracing_subscriber::EnvFilter;

use crate::env;

/// Installs the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbosity` picks the level.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_env(env::vars::RUST_LOG)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init();
}

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}
