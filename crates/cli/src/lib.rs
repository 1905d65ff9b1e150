// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! fieldsync-cli: inspection tool for the durable state of the fieldsync
//! offline layer.
//!
//! The binary reads `fieldsync.toml`, opens the SQLite store it points at,
//! and reports on the offline queue and the TTL cache living there.

mod cli;
mod commands;
pub mod error;
mod logging;

pub use cli::{CacheCommand, Cli, Command, QueueCommand};
pub use error::{Error, Result};
pub use logging::setup_logging;

/// Run one parsed invocation.
pub fn run(cli: Cli) -> Result<()> {
    let context = commands::Context::load(cli.config.as_deref())?;
    setup_logging(&context.log_path());
    tracing::debug!(store = %context.store_path.display(), "opened store");

    match cli.command {
        Command::Status { json } => commands::status::run(&context, json),
        Command::Queue(QueueCommand::List { json }) => commands::queue::list(&context, json),
        Command::Cache(cmd) => commands::cache::run(&context, cmd),
    }
}
