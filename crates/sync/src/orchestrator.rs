// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Routes operations to the remote or the offline queue, and replays the
//! queue when connectivity comes back.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use fieldsync_core::{Action, KvStore, Operation};
use serde_json::Value;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::connectivity::{ConnectivityMonitor, ConnectivityState, Transition};
use crate::error::Result;
use crate::queue::{DrainReport, OfflineQueue};
use crate::remote::{apply_with_timeout, Remote};

/// What happened to a submitted operation.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Applied right away; carries the record returned by the remote.
    Applied(Value),
    /// Accepted for later replay under this queue id.
    Queued { id: String },
}

impl SubmitOutcome {
    pub fn is_queued(&self) -> bool {
        matches!(self, SubmitOutcome::Queued { .. })
    }
}

/// Clears the drain flag when a drain ends, however it ends.
struct DrainGuard<'a>(&'a AtomicBool);

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Coordinates the connectivity monitor, the offline queue and the remote.
pub struct SyncOrchestrator<S: KvStore, R: Remote> {
    queue: OfflineQueue<S>,
    remote: R,
    monitor: Arc<ConnectivityMonitor>,
    draining: AtomicBool,
    transitions: Mutex<Option<mpsc::UnboundedReceiver<Transition>>>,
    reporters: Mutex<Vec<mpsc::UnboundedSender<DrainReport>>>,
}

impl<S: KvStore, R: Remote> SyncOrchestrator<S, R> {
    /// Wires the orchestrator to `monitor`. Transitions are buffered from
    /// this point on and acted upon by [`run`](Self::run).
    pub fn new(queue: OfflineQueue<S>, remote: R, monitor: Arc<ConnectivityMonitor>) -> Self {
        let transitions = monitor.subscribe();
        SyncOrchestrator {
            queue,
            remote,
            monitor,
            draining: AtomicBool::new(false),
            transitions: Mutex::new(Some(transitions)),
            reporters: Mutex::new(Vec::new()),
        }
    }

    pub fn queue(&self) -> &OfflineQueue<S> {
        &self.queue
    }

    pub fn monitor(&self) -> &Arc<ConnectivityMonitor> {
        &self.monitor
    }

    /// Current connectivity as seen by the monitor.
    pub fn connectivity(&self) -> ConnectivityState {
        self.monitor.state()
    }

    pub fn is_draining(&self) -> bool {
        self.draining.load(Ordering::Acquire)
    }

    /// Receive one [`DrainReport`] per completed drain.
    pub fn reports(&self) -> mpsc::UnboundedReceiver<DrainReport> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.reporters.lock().unwrap_or_else(|e| e.into_inner()).push(tx);
        rx
    }

    /// Apply an operation now if online, otherwise queue it.
    ///
    /// An online failure is returned once as [`Error::ApplyFailed`](crate::Error::ApplyFailed)
    /// and the operation is not queued.
    pub async fn submit_operation(
        &self,
        action: Action,
        collection: &str,
        payload: Value,
    ) -> Result<SubmitOutcome> {
        let op = Operation::new(action, collection, payload)?;

        if !self.monitor.is_connected() {
            let id = self.queue.enqueue(op)?;
            return Ok(SubmitOutcome::Queued { id });
        }

        match apply_with_timeout(&self.remote, &op, self.queue.apply_timeout()).await {
            Ok(record) => {
                tracing::debug!(op = %op, "operation applied");
                Ok(SubmitOutcome::Applied(record))
            }
            Err(e) => {
                tracing::debug!(op = %op, error = %e, "operation failed");
                Err(e.into())
            }
        }
    }

    /// Drain the queue once.
    ///
    /// Returns `None` without touching the queue if a drain is already running.
    pub async fn drain(&self) -> Result<Option<DrainReport>> {
        if self
            .draining
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("drain already in progress");
            return Ok(None);
        }
        let _guard = DrainGuard(&self.draining);

        let report = self.queue.drain(&self.remote).await?;
        self.publish(&report);
        Ok(Some(report))
    }

    /// React to one connectivity transition. Only a reconnect drains.
    pub async fn handle_transition(&self, transition: &Transition) -> Result<Option<DrainReport>> {
        if !transition.is_reconnect() {
            return Ok(None);
        }
        tracing::info!(class = %transition.current.connection_class, "back online, draining queue");
        self.drain().await
    }

    /// Process connectivity transitions until `cancel` fires.
    ///
    /// Reconnects that arrive while a drain is running are dropped. An
    /// in-flight drain always runs to completion before this returns.
    pub async fn run(&self, cancel: CancellationToken) {
        let taken = self.transitions.lock().unwrap_or_else(|e| e.into_inner()).take();
        let Some(mut rx) = taken else {
            tracing::warn!("orchestrator loop already running");
            return;
        };

        loop {
            let transition = tokio::select! {
                _ = cancel.cancelled() => break,
                next = rx.recv() => match next {
                    Some(transition) => transition,
                    None => break,
                },
            };

            let drain = self.handle_transition(&transition);
            tokio::pin!(drain);
            let result = loop {
                tokio::select! {
                    result = &mut drain => break result,
                    Some(skipped) = rx.recv() => {
                        if skipped.is_reconnect() {
                            tracing::debug!("reconnect during drain ignored");
                        }
                    }
                }
            };
            if let Err(e) = result {
                tracing::warn!(error = %e, "drain failed");
            }
        }

        *self.transitions.lock().unwrap_or_else(|e| e.into_inner()) = Some(rx);
    }

    fn publish(&self, report: &DrainReport) {
        let mut reporters = self.reporters.lock().unwrap_or_else(|e| e.into_inner());
        reporters.retain(|tx| tx.send(report.clone()).is_ok());
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
