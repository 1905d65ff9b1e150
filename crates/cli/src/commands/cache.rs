// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde_json::Value;

use super::Context;
use crate::cli::CacheCommand;
use crate::error::{Error, Result};

/// Execute a cache subcommand.
pub fn run(context: &Context, cmd: CacheCommand) -> Result<()> {
    let cache = context.cache();
    match cmd {
        CacheCommand::Get { key } => {
            let value: Value = cache.get(&key)?.ok_or(Error::CacheMiss(key))?;
            println!("{}", render_value(&value)?);
        }
        CacheCommand::Set { key, value, ttl } => {
            let ttl = ttl.unwrap_or(context.config.cache.default_ttl_minutes);
            cache.set(&key, &parse_value(&value), ttl)?;
            println!("Cached {key} for {ttl} min");
        }
        CacheCommand::Remove { key } => {
            if cache.remove(&key)? {
                println!("Removed {key}");
            } else {
                println!("No entry for {key}");
            }
        }
        CacheCommand::Clear => {
            let removed = cache.clear()?;
            let noun = if removed == 1 { "entry" } else { "entries" };
            println!("Cleared {removed} {noun}");
        }
    }
    Ok(())
}

/// Command-line values are JSON when they parse as JSON, plain strings otherwise.
pub(crate) fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Strings print bare; everything else prints as JSON.
pub(crate) fn render_value(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Ok(serde_json::to_string_pretty(other)?),
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
