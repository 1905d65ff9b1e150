// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for fieldsync-core operations.

use thiserror::Error;

/// All possible errors that can occur in fieldsync-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid action: '{0}'\n  hint: valid actions are: create, update, delete")]
    InvalidAction(String),

    #[error("unknown capability: '{0}'\n  hint: valid capabilities are: network, push-notifications, status-bar, splash-screen")]
    InvalidCapability(String),

    #[error("{action} on '{collection}' requires an 'id' field in the payload")]
    MissingRecordId { action: String, collection: String },

    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

/// A specialized Result type for fieldsync-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
