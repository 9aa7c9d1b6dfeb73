// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use lincache_core::{discover, locate, DiscoveryReport, Source};

use crate::cli::OutputFormat;
use crate::config::Settings;
use crate::error::Result;

use super::print_json;

pub fn run(settings: &Settings, format: OutputFormat) -> Result<()> {
    let report = report(settings);
    print_json(&report, format)
}

pub(crate) fn report(settings: &Settings) -> DiscoveryReport {
    match locate(&settings.store_root, &settings.selector) {
        Source::Ready(store) => discover(&store),
        Source::Missing => DiscoveryReport::with_note("Store not found; is the application installed?"),
        Source::NoDatabase => DiscoveryReport::with_note("No matching database found"),
        Source::Unopenable(e) => {
            tracing::error!("failed to open store: {}", e);
            DiscoveryReport::with_error(e.to_string())
        }
    }
}

#[cfg(test)]
#[path = "discover_tests.rs"]
mod tests;
