// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod discover;
pub mod export;

use std::io::Write;

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::Result;

/// Writes `value` to stdout as JSON followed by a newline.
pub fn print_json<T: Serialize>(value: &T, format: OutputFormat) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_json(&mut out, value, format)?;
    out.flush()?;
    Ok(())
}

pub(crate) fn write_json<W: Write, T: Serialize>(
    out: &mut W,
    value: &T,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Pretty => serde_json::to_writer_pretty(&mut *out, value)?,
        OutputFormat::Compact => serde_json::to_writer(&mut *out, value)?,
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
