// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! fieldsync-core: Shared building blocks for the fieldsync offline layer
//!
//! This crate provides the operation model, durable key-value storage, the
//! TTL cache, configuration, and the clock abstraction used by the sync
//! crate and the inspection CLI.

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod op;
pub mod store;

pub use cache::{CacheEntry, KvCache};
pub use clock::{ClockSource, ManualClock, SystemClock};
pub use config::Config;
pub use error::{Error, Result};
pub use op::{Action, Operation, QueuedOperation, MAX_RETRIES};
pub use store::{KvStore, MemoryStore, SqliteStore};
