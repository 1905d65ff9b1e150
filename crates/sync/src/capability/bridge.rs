// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The seam to the native shell's plugin system.

use serde::{Deserialize, Serialize};

use super::Capability;
use crate::BoxFuture;

/// Error type for native bridge calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
    /// The shell has no plugin for this capability.
    #[error("plugin not implemented: {0}")]
    NotImplemented(String),

    /// The plugin exists but failed to load or answer.
    #[error("plugin failed: {0}")]
    InitFailed(String),
}

/// A loaded native plugin.
pub trait NativePlugin: Send + Sync {
    /// The capability this plugin provides.
    fn capability(&self) -> Capability;

    /// The network status surface, for plugins that provide `network`.
    fn as_network(&self) -> Option<&dyn NetworkPlugin> {
        None
    }
}

/// Status reading reported by a native network plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkStatus {
    pub connected: bool,
    /// `wifi`, `cellular`, `none` or `unknown`.
    pub connection_type: String,
}

impl NetworkStatus {
    pub fn new(connected: bool, connection_type: impl Into<String>) -> Self {
        NetworkStatus { connected, connection_type: connection_type.into() }
    }
}

/// Native network plugin surface.
pub trait NetworkPlugin: Send + Sync {
    /// Query the current network status.
    fn status(&self) -> BoxFuture<'_, Result<NetworkStatus, BridgeError>>;
}

/// Loads native plugins by capability.
///
/// Implementations report failure through [`BridgeError`]; the registry
/// turns every failure into a resolution status. Implementations must not
/// panic: a panic inside `import` is not caught and reaches the caller.
pub trait NativeBridge: Send + Sync {
    /// Load the plugin for `capability`.
    fn import(
        &self,
        capability: Capability,
    ) -> BoxFuture<'_, Result<std::sync::Arc<dyn NativePlugin>, BridgeError>>;
}

/// Bridge for hosts without a native shell. Every import fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoNativeBridge;

impl NativeBridge for NoNativeBridge {
    fn import(
        &self,
        capability: Capability,
    ) -> BoxFuture<'_, Result<std::sync::Arc<dyn NativePlugin>, BridgeError>> {
        Box::pin(async move { Err(BridgeError::NotImplemented(capability.to_string())) })
    }
}
