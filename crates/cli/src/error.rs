// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Errors reported by the `fieldsync` command.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] fieldsync_core::Error),

    #[error(transparent)]
    Sync(#[from] fieldsync::Error),

    #[error("no fresh cache entry for '{0}'\n  hint: entries are evicted once their ttl has elapsed")]
    CacheMiss(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
