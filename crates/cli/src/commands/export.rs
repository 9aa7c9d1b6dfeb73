// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use lincache_core::{
    build_snapshot, build_tables, empty_snapshot, locate, ClockSource, Snapshot, Source,
    SystemClock,
};

use crate::cli::OutputFormat;
use crate::config::Settings;
use crate::error::Result;

use super::print_json;

pub fn run(settings: &Settings, format: OutputFormat) -> Result<()> {
    let snapshot = export(settings, &SystemClock);
    print_json(&snapshot, format)
}

/// Builds the snapshot for the configured store.
///
/// Never fails: an absent or unreadable store yields an empty snapshot.
pub(crate) fn export(settings: &Settings, clock: &impl ClockSource) -> Snapshot {
    let now = clock.now();
    let root = &settings.store_root;

    let store = match locate(root, &settings.selector) {
        Source::Ready(store) => store,
        Source::Missing => {
            tracing::info!("no store at {}, exporting empty snapshot", root.display());
            return empty_snapshot(now);
        }
        Source::NoDatabase => {
            tracing::info!(
                "no database matching '{}' under {}",
                settings.selector.marker,
                root.display()
            );
            return empty_snapshot(now);
        }
        Source::Unopenable(e) => {
            tracing::error!("failed to open store: {}", e);
            return empty_snapshot(now);
        }
    };

    match build_tables(&store) {
        Ok(build) => {
            tracing::info!(
                "scanned {} collections in {}",
                build.scans.len(),
                store.path().display()
            );
            build_snapshot(&build.tables, now, &settings.options)
        }
        Err(e) => {
            tracing::error!("failed to list collections: {}", e);
            empty_snapshot(now)
        }
    }
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
