// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The remote collaborator: whatever actually persists data.
//!
//! The sync layer never looks inside the backend protocol. It hands an
//! [`Operation`] to a [`Remote`] and gets back the stored record or a typed
//! failure. [`Router`] composes per-collection remotes and rejects
//! collections and actions nobody registered.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use fieldsync_core::{Action, Operation};
use serde_json::Value;

use crate::BoxFuture;

/// Error type for remote operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    /// The backend could not be reached.
    #[error("backend unreachable: {0}")]
    Unreachable(String),

    /// The backend refused the operation.
    #[error("rejected by backend: {0}")]
    Rejected(String),

    /// No handler for the collection.
    #[error("unknown collection: '{0}'")]
    UnknownCollection(String),

    /// The collection does not accept this action.
    #[error("collection '{collection}' does not support {action}")]
    UnsupportedAction { collection: String, action: Action },

    /// The call did not finish in time.
    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

/// Result type for remote operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// A backend that applies mutations.
pub trait Remote: Send + Sync {
    /// Apply `op`, returning the record as stored by the backend.
    fn apply<'a>(&'a self, op: &'a Operation) -> BoxFuture<'a, RemoteResult<Value>>;
}

impl<R: Remote + ?Sized> Remote for Arc<R> {
    fn apply<'a>(&'a self, op: &'a Operation) -> BoxFuture<'a, RemoteResult<Value>> {
        (**self).apply(op)
    }
}

/// Apply `op`, failing with [`RemoteError::Timeout`] if it takes longer than `timeout`.
pub async fn apply_with_timeout<R: Remote + ?Sized>(
    remote: &R,
    op: &Operation,
    timeout: Option<Duration>,
) -> RemoteResult<Value> {
    match timeout {
        Some(limit) => tokio::time::timeout(limit, remote.apply(op))
            .await
            .unwrap_or(Err(RemoteError::Timeout(limit))),
        None => remote.apply(op).await,
    }
}

struct Route {
    remote: Arc<dyn Remote>,
    /// `None` accepts every action.
    actions: Option<HashSet<Action>>,
}

/// Dispatches operations to per-collection remotes.
#[derive(Default)]
pub struct Router {
    routes: HashMap<String, Route>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send every action on `collection` to `remote`.
    pub fn route(mut self, collection: impl Into<String>, remote: Arc<dyn Remote>) -> Self {
        self.routes.insert(collection.into(), Route { remote, actions: None });
        self
    }

    /// Send only `actions` on `collection` to `remote`; other actions fail.
    pub fn route_actions(
        mut self,
        collection: impl Into<String>,
        remote: Arc<dyn Remote>,
        actions: &[Action],
    ) -> Self {
        let actions = actions.iter().copied().collect();
        self.routes.insert(collection.into(), Route { remote, actions: Some(actions) });
        self
    }

    /// Registered collection names, sorted.
    pub fn collections(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.routes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Remote for Router {
    fn apply<'a>(&'a self, op: &'a Operation) -> BoxFuture<'a, RemoteResult<Value>> {
        Box::pin(async move {
            let route = self
                .routes
                .get(&op.collection)
                .ok_or_else(|| RemoteError::UnknownCollection(op.collection.clone()))?;

            if let Some(actions) = &route.actions {
                if !actions.contains(&op.action) {
                    return Err(RemoteError::UnsupportedAction {
                        collection: op.collection.clone(),
                        action: op.action,
                    });
                }
            }
            route.remote.apply(op).await
        })
    }
}

#[cfg(test)]
#[path = "remote_tests.rs"]
mod tests;
