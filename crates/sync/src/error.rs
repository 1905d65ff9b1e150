// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the sync layer.

use crate::remote::RemoteError;

/// Errors surfaced to callers of the sync layer.
///
/// Capability problems never appear here; they are reported as a
/// resolution status instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Store, payload or configuration failure.
    #[error(transparent)]
    Core(#[from] fieldsync_core::Error),

    /// An immediate apply failed. Queued operations never produce this.
    #[error("operation failed: {0}")]
    ApplyFailed(#[from] RemoteError),
}

/// Result type for sync operations.
pub type Result<T> = std::result::Result<T, Error>;
