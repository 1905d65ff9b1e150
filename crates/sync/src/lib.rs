// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! fieldsync: offline-first data layer for field apps.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Orchestrator │────►│    Remote    │────►│   Backend    │
//! │   (submit)   │◄────│   (trait)    │◄────│ (collections)│
//! └──────────────┘     └──────────────┘     └──────────────┘
//!    ▲        │
//!    │        └─────────────────┐
//!    │                          ▼
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Connectivity │     │ OfflineQueue │────►│   KvStore    │
//! │   Monitor    │     │   (replay)   │     │ (SQLite/mem) │
//! └──────────────┘     └──────────────┘     └──────────────┘
//!        ▲
//! ┌──────────────┐
//! │  Capability  │  (native plugin or web fallback)
//! │   Registry   │
//! └──────────────┘
//! ```
//!
//! Operations submitted while online go straight to the [`Remote`]. While
//! offline they are persisted in the [`OfflineQueue`] and replayed, in
//! order, the next time the [`ConnectivityMonitor`] reports a reconnect.

use std::future::Future;
use std::pin::Pin;

pub mod capability;
pub mod connectivity;
pub mod error;
pub mod orchestrator;
pub mod queue;
pub mod remote;

#[cfg(test)]
mod test_helpers;

#[cfg(test)]
mod scenario_tests;

pub use capability::{Capability, CapabilityRegistry, CapabilityResolution, CapabilityStatus};
pub use connectivity::{
    ConnectionClass, ConnectivityEvent, ConnectivityMonitor, ConnectivitySource, ConnectivityState,
    Transition,
};
pub use error::{Error, Result};
pub use orchestrator::{SubmitOutcome, SyncOrchestrator};
pub use queue::{DrainReport, OfflineQueue};
pub use remote::{Remote, RemoteError, Router};

/// A boxed future, as returned by the collaborator traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
