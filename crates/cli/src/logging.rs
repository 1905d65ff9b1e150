// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::fs;
use std::path::Path;

/// Send tracing output to `log_path`, or to stderr if it cannot be opened.
///
/// The level defaults to `info` and follows `RUST_LOG` when set. Only the
/// first call in a process installs a subscriber; later calls are no-ops.
pub fn setup_logging(log_path: &Path) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = if let Ok(file) = fs::OpenOptions::new().create(true).append(true).open(log_path) {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(file)
            .with_ansi(false)
            .try_init()
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init()
    };
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
