// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Connectivity monitoring.
//!
//! The monitor tracks whether the device is online and over what class of
//! connection. Readings come from whichever path the `network` capability
//! resolved to: the native network plugin, or the browser's online flag
//! plus connection-quality API.
//!
//! State starts optimistic (connected over wifi) until the first reading.
//! Every event recomputes the state and is pushed to all subscribers as a
//! [`Transition`]. A missed event is corrected by the next one or by
//! [`ConnectivityMonitor::refresh`]; there is no retry or backoff here.

use std::fmt;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use fieldsync_core::{ClockSource, SystemClock};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::capability::{
    Capability, CapabilityHandle, CapabilityRegistry, NativePlugin, NetworkStatus, PlatformProbe,
};

/// Normalized connection class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionClass {
    Wifi,
    Cellular,
    None,
}

impl ConnectionClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionClass::Wifi => "wifi",
            ConnectionClass::Cellular => "cellular",
            ConnectionClass::None => "none",
        }
    }

    /// Classify a native plugin's `connectionType`.
    ///
    /// Unrecognized types (`ethernet`, `unknown`) count as wifi while connected.
    pub fn from_native(connected: bool, connection_type: &str) -> Self {
        if !connected {
            return ConnectionClass::None;
        }
        match connection_type.to_lowercase().as_str() {
            "cellular" | "2g" | "3g" | "4g" | "5g" => ConnectionClass::Cellular,
            "none" => ConnectionClass::None,
            _ => ConnectionClass::Wifi,
        }
    }

    /// Classify the browser's connection-quality reading.
    ///
    /// An explicit `type` wins; otherwise an `effectiveType` below 4g is
    /// taken as cellular. With no reading at all an online browser counts as wifi.
    pub fn from_browser(
        online: bool,
        connection_type: Option<&str>,
        effective_type: Option<&str>,
    ) -> Self {
        if !online {
            return ConnectionClass::None;
        }
        match connection_type.map(str::to_lowercase).as_deref() {
            Some("cellular") => return ConnectionClass::Cellular,
            Some("none") => return ConnectionClass::None,
            Some("wifi" | "ethernet" | "wimax") => return ConnectionClass::Wifi,
            _ => {}
        }
        match effective_type.map(str::to_lowercase).as_deref() {
            Some("slow-2g" | "2g" | "3g") => ConnectionClass::Cellular,
            _ => ConnectionClass::Wifi,
        }
    }
}

impl fmt::Display for ConnectionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Current connectivity as seen by the monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectivityState {
    pub is_connected: bool,
    pub connection_class: ConnectionClass,
    pub last_updated: DateTime<Utc>,
}

impl ConnectivityState {
    /// The optimistic starting state.
    pub fn initial(at: DateTime<Utc>) -> Self {
        ConnectivityState {
            is_connected: true,
            connection_class: ConnectionClass::Wifi,
            last_updated: at,
        }
    }
}

/// A recomputed state together with the one it replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub previous: ConnectivityState,
    pub current: ConnectivityState,
}

impl Transition {
    /// Disconnected → connected.
    pub fn is_reconnect(&self) -> bool {
        !self.previous.is_connected && self.current.is_connected
    }

    /// Connected → disconnected.
    pub fn is_disconnect(&self) -> bool {
        self.previous.is_connected && !self.current.is_connected
    }
}

/// Where readings come from.
#[derive(Clone)]
pub enum ConnectivitySource {
    /// Native network plugin.
    Native(Arc<dyn NativePlugin>),
    /// Browser online flag and connection-quality API.
    Browser(Arc<dyn PlatformProbe>),
    /// No network capability; the state only changes through events.
    Unavailable,
}

impl fmt::Debug for ConnectivitySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native(_) => f.debug_tuple("Native").field(&"<plugin>").finish(),
            Self::Browser(_) => f.debug_tuple("Browser").field(&"<probe>").finish(),
            Self::Unavailable => f.write_str("Unavailable"),
        }
    }
}

/// Raw signals fed into the monitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectivityEvent {
    /// Status change pushed by the native network plugin.
    Native(NetworkStatus),
    /// The browser fired `online`.
    BrowserOnline,
    /// The browser fired `offline`.
    BrowserOffline,
}

/// Observes online/offline state and notifies subscribers of every change.
pub struct ConnectivityMonitor {
    source: ConnectivitySource,
    clock: Arc<dyn ClockSource>,
    state: Mutex<ConnectivityState>,
    subscribers: Mutex<Vec<mpsc::UnboundedSender<Transition>>>,
}

impl ConnectivityMonitor {
    pub fn new(source: ConnectivitySource) -> Self {
        Self::with_clock(source, Arc::new(SystemClock))
    }

    /// Creates a monitor with a custom clock source.
    pub fn with_clock(source: ConnectivitySource, clock: Arc<dyn ClockSource>) -> Self {
        let state = ConnectivityState::initial(clock.now());
        ConnectivityMonitor {
            source,
            clock,
            state: Mutex::new(state),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Picks the reading source from the registry's `network` resolution.
    pub async fn from_registry(registry: &CapabilityRegistry) -> Self {
        Self::with_clock(source_from_registry(registry).await, Arc::new(SystemClock))
    }

    pub fn source(&self) -> &ConnectivitySource {
        &self.source
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ConnectivityState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn is_connected(&self) -> bool {
        self.state().is_connected
    }

    /// Receive every future [`Transition`], in order.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<Transition> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.lock().unwrap_or_else(|e| e.into_inner()).push(tx);
        rx
    }

    /// Apply a raw signal and notify subscribers.
    pub fn handle_event(&self, event: ConnectivityEvent) -> Transition {
        let (connected, class) = match event {
            ConnectivityEvent::Native(status) => (
                status.connected,
                ConnectionClass::from_native(status.connected, &status.connection_type),
            ),
            ConnectivityEvent::BrowserOnline => match &self.source {
                ConnectivitySource::Browser(probe) => (true, browser_class(probe.as_ref(), true)),
                _ => (true, ConnectionClass::Wifi),
            },
            ConnectivityEvent::BrowserOffline => (false, ConnectionClass::None),
        };
        self.update(connected, class)
    }

    /// Re-query the source and update the state.
    ///
    /// Native readings are asynchronous; a failed native query leaves the
    /// state untouched. Without a network capability this is a no-op.
    pub async fn refresh(&self) -> ConnectivityState {
        match &self.source {
            ConnectivitySource::Native(plugin) => {
                let Some(network) = plugin.as_network() else {
                    tracing::warn!("network plugin has no status surface");
                    return self.state();
                };
                match network.status().await {
                    Ok(status) => {
                        self.handle_event(ConnectivityEvent::Native(status));
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "network status query failed");
                    }
                }
            }
            ConnectivitySource::Browser(probe) => {
                let online = probe.navigator_online();
                self.update(online, browser_class(probe.as_ref(), online));
            }
            ConnectivitySource::Unavailable => {}
        }
        self.state()
    }

    fn update(&self, connected: bool, class: ConnectionClass) -> Transition {
        let class = if connected { class } else { ConnectionClass::None };
        let transition = {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            let previous = *state;
            *state = ConnectivityState {
                is_connected: connected,
                connection_class: class,
                last_updated: self.clock.now(),
            };
            Transition { previous, current: *state }
        };

        if transition.is_reconnect() {
            tracing::info!(class = %class, "connectivity restored");
        } else if transition.is_disconnect() {
            tracing::info!("connectivity lost");
        } else {
            tracing::debug!(connected, class = %class, "connectivity reading");
        }

        let mut subscribers = self.subscribers.lock().unwrap_or_else(|e| e.into_inner());
        subscribers.retain(|tx| tx.send(transition).is_ok());
        transition
    }
}

fn browser_class(probe: &dyn PlatformProbe, online: bool) -> ConnectionClass {
    let connection_type = probe.connection_type();
    let effective_type = probe.effective_type();
    let class =
        ConnectionClass::from_browser(online, connection_type.as_deref(), effective_type.as_deref());
    // the online event itself proves a link even when the quality API says "none"
    if online && class == ConnectionClass::None {
        ConnectionClass::Wifi
    } else {
        class
    }
}

/// Choose the reading source for the resolved `network` capability.
pub async fn source_from_registry(registry: &CapabilityRegistry) -> ConnectivitySource {
    let resolution = registry.resolve_capability(Capability::Network).await;
    match &resolution.handle {
        Some(CapabilityHandle::Native(plugin)) => ConnectivitySource::Native(Arc::clone(plugin)),
        Some(CapabilityHandle::Web(_)) => ConnectivitySource::Browser(Arc::clone(registry.probe())),
        None => ConnectivitySource::Unavailable,
    }
}

#[cfg(test)]
#[path = "connectivity_tests.rs"]
mod tests;
