// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The capability registry: one cached resolution per capability.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};

use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

use super::platform::{detect_platform, PlatformDescriptor, PlatformProbe};
use super::{BridgeError, Capability, NativeBridge, NativePlugin};

/// How a capability resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityStatus {
    /// Resolution has started but not finished.
    Loading,
    /// Backed by a native plugin.
    Available,
    /// Backed by a web fallback.
    Fallback,
    /// No implementation on this platform.
    Unavailable,
    /// The native plugin exists but failed to load.
    Error,
}

impl CapabilityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CapabilityStatus::Loading => "loading",
            CapabilityStatus::Available => "available",
            CapabilityStatus::Fallback => "fallback",
            CapabilityStatus::Unavailable => "unavailable",
            CapabilityStatus::Error => "error",
        }
    }

    /// Whether callers can use the capability.
    pub fn is_usable(&self) -> bool {
        matches!(self, CapabilityStatus::Available | CapabilityStatus::Fallback)
    }
}

impl fmt::Display for CapabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Browser-based substitutes for native capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebFallback {
    /// online/offline events plus the connection-quality API.
    BrowserNetwork,
    /// Service worker plus the notification permission API.
    ServiceWorkerPush,
}

/// The code path behind a usable capability.
#[derive(Clone)]
pub enum CapabilityHandle {
    Native(Arc<dyn NativePlugin>),
    Web(WebFallback),
}

impl fmt::Debug for CapabilityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native(plugin) => {
                f.debug_tuple("Native").field(&plugin.capability().as_str()).finish()
            }
            Self::Web(fallback) => f.debug_tuple("Web").field(fallback).finish(),
        }
    }
}

/// Outcome of resolving one capability. Immutable once created.
#[derive(Debug, Clone)]
pub struct CapabilityResolution {
    pub capability: Capability,
    pub status: CapabilityStatus,
    pub is_native_platform: bool,
    pub handle: Option<CapabilityHandle>,
    pub error_detail: Option<String>,
}

impl CapabilityResolution {
    fn native(capability: Capability, plugin: Arc<dyn NativePlugin>) -> Self {
        CapabilityResolution {
            capability,
            status: CapabilityStatus::Available,
            is_native_platform: true,
            handle: Some(CapabilityHandle::Native(plugin)),
            error_detail: None,
        }
    }

    fn fallback(capability: Capability, fallback: WebFallback) -> Self {
        CapabilityResolution {
            capability,
            status: CapabilityStatus::Fallback,
            is_native_platform: false,
            handle: Some(CapabilityHandle::Web(fallback)),
            error_detail: None,
        }
    }

    fn failed(
        capability: Capability,
        status: CapabilityStatus,
        is_native_platform: bool,
        error_detail: Option<String>,
    ) -> Self {
        CapabilityResolution { capability, status, is_native_platform, handle: None, error_detail }
    }

    pub fn is_available(&self) -> bool {
        self.status.is_usable()
    }

    /// The native plugin, when the capability resolved natively.
    pub fn native_plugin(&self) -> Option<&Arc<dyn NativePlugin>> {
        match &self.handle {
            Some(CapabilityHandle::Native(plugin)) => Some(plugin),
            _ => None,
        }
    }
}

/// The web fallback for `capability`, if the probe shows its APIs exist.
fn web_fallback(capability: Capability, probe: &dyn PlatformProbe) -> Option<WebFallback> {
    match capability {
        Capability::Network => probe.has_browser_environment().then_some(WebFallback::BrowserNetwork),
        Capability::PushNotifications => {
            let supported = probe.has_service_worker() && probe.has_notification_api();
            supported.then_some(WebFallback::ServiceWorkerPush)
        }
        Capability::StatusBar | Capability::SplashScreen => None,
    }
}

type ResolutionCell = Arc<OnceCell<Arc<CapabilityResolution>>>;

/// Single authority for whether a capability can be used and through which path.
///
/// Platform detection runs once per registry; each capability is resolved
/// at most once and the result is kept until [`reset`](Self::reset).
pub struct CapabilityRegistry {
    probe: Arc<dyn PlatformProbe>,
    bridge: Arc<dyn NativeBridge>,
    platform: OnceLock<PlatformDescriptor>,
    resolutions: Mutex<HashMap<Capability, ResolutionCell>>,
}

impl CapabilityRegistry {
    pub fn new(probe: Arc<dyn PlatformProbe>, bridge: Arc<dyn NativeBridge>) -> Self {
        CapabilityRegistry {
            probe,
            bridge,
            platform: OnceLock::new(),
            resolutions: Mutex::new(HashMap::new()),
        }
    }

    /// The ambient probe this registry reads.
    pub fn probe(&self) -> &Arc<dyn PlatformProbe> {
        &self.probe
    }

    /// Detects the platform on first call; later calls reuse the result.
    ///
    /// The returned descriptor lists the capabilities resolved as usable so
    /// far, which is empty before any resolution.
    pub fn initialize_platform(&self) -> PlatformDescriptor {
        let detected = self.platform.get_or_init(|| {
            let descriptor = detect_platform(self.probe.as_ref());
            tracing::info!(
                platform = %descriptor.platform,
                native = descriptor.is_native,
                "platform detected"
            );
            descriptor
        });
        PlatformDescriptor { available: self.available_capabilities(), ..detected.clone() }
    }

    fn cell(&self, capability: Capability) -> ResolutionCell {
        let mut resolutions = self.resolutions.lock().unwrap_or_else(|e| e.into_inner());
        Arc::clone(resolutions.entry(capability).or_default())
    }

    /// Resolve `capability`, using the cached result when there is one.
    ///
    /// Never fails: bridge errors become [`CapabilityStatus::Unavailable`]
    /// or [`CapabilityStatus::Error`] with the message kept in
    /// `error_detail`. Concurrent first calls share one resolution.
    pub async fn resolve_capability(&self, capability: Capability) -> Arc<CapabilityResolution> {
        let cell = self.cell(capability);
        let resolution = cell
            .get_or_init(|| async { Arc::new(self.resolve_uncached(capability).await) })
            .await;
        Arc::clone(resolution)
    }

    async fn resolve_uncached(&self, capability: Capability) -> CapabilityResolution {
        let platform = self.initialize_platform();

        let resolution = if platform.is_native {
            match self.bridge.import(capability).await {
                Ok(plugin) => CapabilityResolution::native(capability, plugin),
                Err(BridgeError::NotImplemented(detail)) => CapabilityResolution::failed(
                    capability,
                    CapabilityStatus::Unavailable,
                    true,
                    Some(detail),
                ),
                Err(BridgeError::InitFailed(detail)) => CapabilityResolution::failed(
                    capability,
                    CapabilityStatus::Error,
                    true,
                    Some(detail),
                ),
            }
        } else {
            match web_fallback(capability, self.probe.as_ref()) {
                Some(fallback) => CapabilityResolution::fallback(capability, fallback),
                None => {
                    CapabilityResolution::failed(capability, CapabilityStatus::Unavailable, false, None)
                }
            }
        };

        match resolution.status {
            CapabilityStatus::Available | CapabilityStatus::Fallback => {
                tracing::info!(%capability, status = %resolution.status, "capability resolved");
            }
            _ => {
                tracing::warn!(
                    %capability,
                    status = %resolution.status,
                    detail = resolution.error_detail.as_deref().unwrap_or(""),
                    "capability not usable"
                );
            }
        }
        resolution
    }

    /// Current status without triggering resolution.
    ///
    /// `None` if the capability was never requested, `Loading` while the
    /// first resolution is in flight.
    pub fn status(&self, capability: Capability) -> Option<CapabilityStatus> {
        let resolutions = self.resolutions.lock().unwrap_or_else(|e| e.into_inner());
        let cell = resolutions.get(&capability)?;
        Some(cell.get().map_or(CapabilityStatus::Loading, |r| r.status))
    }

    /// Cached resolution, if one has completed.
    pub fn cached(&self, capability: Capability) -> Option<Arc<CapabilityResolution>> {
        let resolutions = self.resolutions.lock().unwrap_or_else(|e| e.into_inner());
        resolutions.get(&capability)?.get().cloned()
    }

    /// Whether `capability` resolved to something usable. Never resolves.
    pub fn is_capability_available(&self, capability: Capability) -> bool {
        self.cached(capability).is_some_and(|r| r.is_available())
    }

    /// Capabilities that resolved as usable, in declaration order.
    pub fn available_capabilities(&self) -> Vec<Capability> {
        Capability::ALL
            .into_iter()
            .filter(|capability| self.is_capability_available(*capability))
            .collect()
    }

    /// Forget the detected platform and every resolution.
    pub fn reset(&mut self) {
        self.platform = OnceLock::new();
        self.resolutions.get_mut().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
