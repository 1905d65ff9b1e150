// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! TTL cache over the durable key-value store.
//!
//! Entries are stamped with their write time and lifetime. Expiry is only
//! checked on read: an expired entry is deleted and reported as a miss.
//! Nothing sweeps the store in the background.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clock::{ClockSource, SystemClock};
use crate::error::Result;
use crate::store::KvStore;

/// Key namespace for cache entries.
pub const CACHE_PREFIX: &str = "cache:";

/// A cached value with its freshness window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub value: Value,
    /// Write time in milliseconds since Unix epoch.
    pub stored_at: u64,
    pub ttl_ms: u64,
}

impl CacheEntry {
    pub fn is_fresh(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.stored_at) < self.ttl_ms
    }
}

/// Key-value cache with per-entry time to live.
pub struct KvCache<S: KvStore, C: ClockSource = SystemClock> {
    store: Arc<S>,
    clock: C,
}

impl<S: KvStore> KvCache<S, SystemClock> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: KvStore, C: ClockSource> KvCache<S, C> {
    /// Creates a cache with a custom clock source.
    pub fn with_clock(store: Arc<S>, clock: C) -> Self {
        KvCache { store, clock }
    }

    fn storage_key(key: &str) -> String {
        format!("{CACHE_PREFIX}{key}")
    }

    /// Store `value` under `key` for `ttl_minutes`.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T, ttl_minutes: u64) -> Result<()> {
        let entry = CacheEntry {
            value: serde_json::to_value(value)?,
            stored_at: self.clock.now_ms(),
            ttl_ms: ttl_minutes.saturating_mul(60_000),
        };
        self.store.set(&Self::storage_key(key), &serde_json::to_string(&entry)?)
    }

    /// Read the value under `key` if it is still fresh.
    ///
    /// Expired entries, and entries that no longer decode as `T`, are
    /// evicted and reported as a miss.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let storage_key = Self::storage_key(key);
        let Some(raw) = self.store.get(&storage_key)? else {
            return Ok(None);
        };

        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(key, error = %e, "evicting unreadable cache entry");
                self.store.remove(&storage_key)?;
                return Ok(None);
            }
        };

        if !entry.is_fresh(self.clock.now_ms()) {
            tracing::debug!(key, "cache entry expired");
            self.store.remove(&storage_key)?;
            return Ok(None);
        }

        match serde_json::from_value(entry.value) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(key, error = %e, "evicting cache entry of unexpected shape");
                self.store.remove(&storage_key)?;
                Ok(None)
            }
        }
    }

    /// Delete `key`. Returns whether an entry was present.
    pub fn remove(&self, key: &str) -> Result<bool> {
        self.store.remove(&Self::storage_key(key))
    }

    /// Delete every cache entry. Returns how many were removed.
    pub fn clear(&self) -> Result<usize> {
        let keys = self.store.keys_with_prefix(CACHE_PREFIX)?;
        let mut removed = 0;
        for key in keys {
            if self.store.remove(&key)? {
                removed += 1;
            }
        }
        Ok(removed)
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
