// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fakes for sync crate tests.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use fieldsync_core::{Action, Operation};
use serde_json::{json, Value};

use crate::capability::{
    BridgeError, Capability, NativeBridge, NativePlugin, NetworkPlugin, NetworkStatus, Platform,
    PlatformProbe,
};
use crate::remote::{Remote, RemoteError, RemoteResult};
use crate::BoxFuture;

/// Build an operation, panicking on invalid input.
pub fn make_op(action: Action, collection: &str, id: &str) -> Operation {
    Operation::new(action, collection, json!({ "id": id, "name": format!("record {id}") })).unwrap()
}

/// Probe with scriptable ambient APIs.
pub struct FakeProbe {
    native: Result<Option<Platform>, BridgeError>,
    browser: bool,
    service_worker: bool,
    notifications: bool,
    online: AtomicBool,
    connection_type: Mutex<Option<String>>,
    effective_type: Mutex<Option<String>>,
    detections: AtomicUsize,
}

impl FakeProbe {
    /// Plain browser without push APIs.
    pub fn browser() -> Self {
        FakeProbe {
            native: Ok(None),
            browser: true,
            service_worker: false,
            notifications: false,
            online: AtomicBool::new(true),
            connection_type: Mutex::new(None),
            effective_type: Mutex::new(None),
            detections: AtomicUsize::new(0),
        }
    }

    /// Native shell on `platform`.
    pub fn native(platform: Platform) -> Self {
        FakeProbe { native: Ok(Some(platform)), ..Self::browser() }
    }

    /// Probe whose platform query fails.
    pub fn broken(message: &str) -> Self {
        FakeProbe { native: Err(BridgeError::InitFailed(message.to_string())), ..Self::browser() }
    }

    /// No browser globals at all.
    pub fn headless() -> Self {
        FakeProbe { browser: false, ..Self::browser() }
    }

    pub fn with_service_worker(mut self) -> Self {
        self.service_worker = true;
        self
    }

    pub fn with_notifications(mut self) -> Self {
        self.notifications = true;
        self
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    pub fn set_connection(&self, connection_type: Option<&str>, effective_type: Option<&str>) {
        *self.connection_type.lock().unwrap() = connection_type.map(String::from);
        *self.effective_type.lock().unwrap() = effective_type.map(String::from);
    }

    pub fn detections(&self) -> usize {
        self.detections.load(Ordering::SeqCst)
    }
}

impl PlatformProbe for FakeProbe {
    fn native_platform(&self) -> Result<Option<Platform>, BridgeError> {
        self.detections.fetch_add(1, Ordering::SeqCst);
        self.native.clone()
    }

    fn has_browser_environment(&self) -> bool {
        self.browser
    }

    fn has_service_worker(&self) -> bool {
        self.service_worker
    }

    fn has_notification_api(&self) -> bool {
        self.notifications
    }

    fn navigator_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    fn connection_type(&self) -> Option<String> {
        self.connection_type.lock().unwrap().clone()
    }

    fn effective_type(&self) -> Option<String> {
        self.effective_type.lock().unwrap().clone()
    }
}

/// A native plugin with no surface beyond its name.
pub struct FakePlugin(pub Capability);

impl NativePlugin for FakePlugin {
    fn capability(&self) -> Capability {
        self.0
    }
}

/// Native network plugin with a settable status reading.
pub struct FakeNetworkPlugin {
    status: Mutex<Result<NetworkStatus, BridgeError>>,
    queries: AtomicUsize,
}

impl FakeNetworkPlugin {
    pub fn new(connected: bool, connection_type: &str) -> Self {
        FakeNetworkPlugin {
            status: Mutex::new(Ok(NetworkStatus::new(connected, connection_type))),
            queries: AtomicUsize::new(0),
        }
    }

    pub fn set_status(&self, status: Result<NetworkStatus, BridgeError>) {
        *self.status.lock().unwrap() = status;
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl NativePlugin for FakeNetworkPlugin {
    fn capability(&self) -> Capability {
        Capability::Network
    }

    fn as_network(&self) -> Option<&dyn NetworkPlugin> {
        Some(self)
    }
}

impl NetworkPlugin for FakeNetworkPlugin {
    fn status(&self) -> BoxFuture<'_, Result<NetworkStatus, BridgeError>> {
        Box::pin(async move {
            self.queries.fetch_add(1, Ordering::SeqCst);
            self.status.lock().unwrap().clone()
        })
    }
}

/// Bridge that loads every plugin except the ones scripted to fail.
pub struct ScriptedBridge {
    failures: HashMap<Capability, BridgeError>,
    network: Arc<FakeNetworkPlugin>,
    imports: AtomicUsize,
}

impl ScriptedBridge {
    pub fn new() -> Self {
        ScriptedBridge {
            failures: HashMap::new(),
            network: Arc::new(FakeNetworkPlugin::new(true, "wifi")),
            imports: AtomicUsize::new(0),
        }
    }

    pub fn failing(mut self, capability: Capability, error: BridgeError) -> Self {
        self.failures.insert(capability, error);
        self
    }

    pub fn network(&self) -> Arc<FakeNetworkPlugin> {
        Arc::clone(&self.network)
    }

    pub fn imports(&self) -> usize {
        self.imports.load(Ordering::SeqCst)
    }
}

impl NativeBridge for ScriptedBridge {
    fn import(
        &self,
        capability: Capability,
    ) -> BoxFuture<'_, Result<Arc<dyn NativePlugin>, BridgeError>> {
        Box::pin(async move {
            self.imports.fetch_add(1, Ordering::SeqCst);
            // yield once so concurrent callers observe the in-flight state
            tokio::task::yield_now().await;
            if let Some(error) = self.failures.get(&capability) {
                return Err(error.clone());
            }
            let plugin: Arc<dyn NativePlugin> = match capability {
                Capability::Network => self.network.clone(),
                other => Arc::new(FakePlugin(other)),
            };
            Ok(plugin)
        })
    }
}

/// Remote that records every call and fails on request.
#[derive(Default)]
pub struct RecordingRemote {
    calls: Mutex<Vec<Operation>>,
    /// Remaining scripted failures per record id.
    failures: Mutex<HashMap<String, u32>>,
    delay: Option<Duration>,
}

impl RecordingRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remote that sleeps before answering each call.
    pub fn slow(delay: Duration) -> Self {
        RecordingRemote { delay: Some(delay), ..Self::default() }
    }

    /// Fail the next `times` calls touching `record_id`.
    pub fn fail_record(&self, record_id: &str, times: u32) {
        self.failures.lock().unwrap().insert(record_id.to_string(), times);
    }

    pub fn calls(&self) -> Vec<Operation> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls rendered as `action collection/id`.
    pub fn call_log(&self) -> Vec<String> {
        self.calls().iter().map(ToString::to_string).collect()
    }
}

impl Remote for RecordingRemote {
    fn apply<'a>(&'a self, op: &'a Operation) -> BoxFuture<'a, RemoteResult<Value>> {
        Box::pin(async move {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.calls.lock().unwrap().push(op.clone());

            if let Some(id) = op.record_id() {
                let mut failures = self.failures.lock().unwrap();
                if let Some(remaining) = failures.get_mut(&id) {
                    if *remaining > 0 {
                        *remaining -= 1;
                        return Err(RemoteError::Unreachable(format!("scripted failure for {id}")));
                    }
                }
            }
            Ok(Value::Object(op.payload.clone()))
        })
    }
}
