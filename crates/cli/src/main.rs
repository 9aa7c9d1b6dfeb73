// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use clap::Parser;
use lincache_cli::Cli;

fn main() {
    let cli = Cli::parse();
    lincache_cli::logging::init(cli.verbose);
    if let Err(e) = lincache_cli::run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
