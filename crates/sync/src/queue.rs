// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Offline queue for operations submitted while disconnected.
//!
//! The whole queue is one JSON array stored under [`QUEUE_KEY`], in enqueue
//! order. Every mutation is a read-modify-write of that array under a lock,
//! so a drain and a concurrent enqueue never lose each other's writes.
//!
//! A drain replays a snapshot of the queue, one item at a time. Each item is
//! attempted once per drain: success removes it, failure bumps its
//! `retry_count`, and an item that reaches [`fieldsync_core::MAX_RETRIES`]
//! is abandoned.
//! Failures never stop the pass.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use fieldsync_core::{ClockSource, KvStore, Operation, QueuedOperation, SystemClock};
use serde::Serialize;

use crate::error::Result;
use crate::remote::{apply_with_timeout, Remote, RemoteError};

/// Store key holding the serialized queue.
pub const QUEUE_KEY: &str = "queue:operations";

/// An operation dropped after its last allowed attempt failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbandonedOperation {
    #[serde(flatten)]
    pub item: QueuedOperation,
    pub last_error: String,
}

/// Outcome of one drain pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DrainReport {
    pub success_count: usize,
    /// Failed attempts, including the ones that led to abandonment.
    pub failure_count: usize,
    pub abandoned: Vec<AbandonedOperation>,
}

impl DrainReport {
    /// Number of attempts made in the pass.
    pub fn attempted(&self) -> usize {
        self.success_count + self.failure_count
    }
}

/// Durable FIFO of operations awaiting replay.
pub struct OfflineQueue<S: KvStore> {
    store: Arc<S>,
    clock: Arc<dyn ClockSource>,
    apply_timeout: Option<Duration>,
    write_lock: Mutex<()>,
}

impl<S: KvStore> OfflineQueue<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    /// Creates a queue with a custom clock source.
    pub fn with_clock(store: Arc<S>, clock: Arc<dyn ClockSource>) -> Self {
        OfflineQueue { store, clock, apply_timeout: None, write_lock: Mutex::new(()) }
    }

    /// Bound every remote call made by [`drain`](Self::drain).
    pub fn with_apply_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.apply_timeout = timeout;
        self
    }

    pub fn apply_timeout(&self) -> Option<Duration> {
        self.apply_timeout
    }

    /// Persist `operation` for later replay and return its queue id.
    ///
    /// Never touches the network.
    pub fn enqueue(&self, operation: Operation) -> Result<String> {
        let item = QueuedOperation::new(operation, self.clock.now());
        let id = item.id.clone();
        let summary = item.operation.to_string();
        let depth = self.modify(|items| {
            items.push(item);
            items.len()
        })?;
        tracing::debug!(%id, op = %summary, depth, "operation queued");
        Ok(id)
    }

    /// Snapshot of the queue in replay order.
    pub fn pending(&self) -> Result<Vec<QueuedOperation>> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        self.load()
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.pending()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Replay the queued operations against `remote`.
    ///
    /// Items are applied strictly in order, one at a time. Items enqueued
    /// after the pass starts wait for the next one. Only store failures
    /// end the pass early.
    pub async fn drain<R: Remote + ?Sized>(&self, remote: &R) -> Result<DrainReport> {
        let snapshot = self.pending()?;
        let mut report = DrainReport::default();
        if snapshot.is_empty() {
            return Ok(report);
        }
        tracing::debug!(pending = snapshot.len(), "draining offline queue");

        for item in snapshot {
            match apply_with_timeout(remote, &item.operation, self.apply_timeout).await {
                Ok(_) => {
                    self.modify(|items| items.retain(|queued| queued.id != item.id))?;
                    report.success_count += 1;
                    tracing::debug!(id = %item.id, op = %item.operation, "queued operation applied");
                }
                Err(e) => {
                    report.failure_count += 1;
                    if let Some(abandoned) = self.record_failure(&item.id, &e)? {
                        tracing::warn!(
                            id = %abandoned.item.id,
                            op = %abandoned.item.operation,
                            attempts = abandoned.item.retry_count,
                            error = %e,
                            "abandoning queued operation"
                        );
                        report.abandoned.push(abandoned);
                    } else {
                        tracing::debug!(id = %item.id, error = %e, "queued operation failed, will retry");
                    }
                }
            }
        }

        tracing::info!(
            succeeded = report.success_count,
            failed = report.failure_count,
            abandoned = report.abandoned.len(),
            "drain complete"
        );
        Ok(report)
    }

    /// Bump the retry count of `id`, removing it once the ceiling is hit.
    fn record_failure(&self, id: &str, error: &RemoteError) -> Result<Option<AbandonedOperation>> {
        self.modify(|items| {
            let index = items.iter().position(|queued| queued.id == id)?;
            if !items[index].record_failure() {
                return None;
            }
            let item = items.remove(index);
            Some(AbandonedOperation { item, last_error: error.to_string() })
        })
    }

    fn load(&self) -> Result<Vec<QueuedOperation>> {
        let Some(raw) = self.store.get(QUEUE_KEY)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw).map_err(|e| {
            fieldsync_core::Error::CorruptedData(format!("{QUEUE_KEY}: {e}")).into()
        })
    }

    fn modify<T>(&self, f: impl FnOnce(&mut Vec<QueuedOperation>) -> T) -> Result<T> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut items = self.load()?;
        let out = f(&mut items);
        if items.is_empty() {
            self.store.remove(QUEUE_KEY)?;
        } else {
            let raw = serde_json::to_string(&items).map_err(fieldsync_core::Error::from)?;
            self.store.set(QUEUE_KEY, &raw)?;
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
