// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use fieldsync_core::QueuedOperation;

use super::Context;
use crate::error::Result;

/// Print pending operations in replay order.
pub fn list(context: &Context, json: bool) -> Result<()> {
    let pending = context.queue().pending()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&pending)?);
        return Ok(());
    }
    if pending.is_empty() {
        println!("No pending operations.");
        return Ok(());
    }
    for item in &pending {
        println!("{}", format_item(item));
    }
    Ok(())
}

pub(crate) fn format_item(item: &QueuedOperation) -> String {
    let retries = match item.retry_count {
        0 => String::new(),
        1 => "  (1 failed attempt)".to_string(),
        n => format!("  ({n} failed attempts)"),
    };
    format!(
        "{}  {}  queued {}{}",
        item.id,
        item.operation,
        item.enqueued_at.format("%Y-%m-%d %H:%M:%S"),
        retries
    )
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
