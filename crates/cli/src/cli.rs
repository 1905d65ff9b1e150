// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use clap::{Parser, Subcommand};

const QUICKSTART_HELP: &str = "\
Examples:
  fieldsync status                      Show platform and queue depth
  fieldsync queue list --json           Dump pending operations
  fieldsync cache set schemes '[1,2]'   Cache a value for the default lifetime
  fieldsync cache get schemes           Read it back while fresh";

#[derive(Parser)]
#[command(name = "fieldsync")]
#[command(about = "Inspect the durable state of the fieldsync offline layer")]
#[command(version)]
#[command(after_help = QUICKSTART_HELP)]
pub struct Cli {
    /// Path to fieldsync.toml (default: the platform config dir)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the detected platform, capability statuses and queue depth
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect the offline operation queue
    #[command(subcommand)]
    Queue(QueueCommand),

    /// Read and write the TTL cache
    #[command(subcommand)]
    Cache(CacheCommand),
}

#[derive(Subcommand)]
pub enum QueueCommand {
    /// List pending operations in replay order
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum CacheCommand {
    /// Print a cached value if it is still fresh
    Get {
        key: String,
    },

    /// Store a value (parsed as JSON, else kept as a string)
    Set {
        key: String,
        value: String,

        /// Lifetime in minutes (default: cache.default_ttl_minutes)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        ttl: Option<u64>,
    },

    /// Delete a cached value
    Remove {
        key: String,
    },

    /// Delete every cached value, leaving the queue alone
    Clear,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
