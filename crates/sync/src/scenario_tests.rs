// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end scenarios across registry, monitor, queue and orchestrator.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use fieldsync_core::{Action, KvCache, ManualClock, MemoryStore, SqliteStore};
use serde_json::json;
use tempfile::tempdir;
use tokio_util::sync::CancellationToken;

use crate::capability::{BridgeError, NetworkStatus, Platform};
use crate::test_helpers::{FakeProbe, RecordingRemote, ScriptedBridge};
use crate::{
    Capability, CapabilityRegistry, CapabilityStatus, ConnectivityEvent, ConnectivityMonitor,
    OfflineQueue, Router, SubmitOutcome, SyncOrchestrator,
};

struct Portal {
    bridge: Arc<ScriptedBridge>,
    contacts: Arc<RecordingRemote>,
    orchestrator: SyncOrchestrator<SqliteStore, Router>,
}

async fn portal(store: Arc<SqliteStore>) -> Portal {
    let bridge = Arc::new(ScriptedBridge::new());
    let registry =
        CapabilityRegistry::new(Arc::new(FakeProbe::native(Platform::Android)), bridge.clone());
    let monitor = Arc::new(ConnectivityMonitor::from_registry(&registry).await);
    let contacts = Arc::new(RecordingRemote::new());
    let router = Router::new().route("contacts", contacts.clone());
    let orchestrator = SyncOrchestrator::new(OfflineQueue::new(store), router, monitor);
    Portal { bridge, contacts, orchestrator }
}

fn set_network(portal: &Portal, connected: bool) {
    let status = NetworkStatus::new(connected, if connected { "wifi" } else { "none" });
    portal.bridge.network().set_status(Ok(status.clone()));
    portal.orchestrator.monitor().handle_event(ConnectivityEvent::Native(status));
}

#[tokio::test]
async fn offline_edits_replay_once_on_reconnect() {
    let portal = portal(Arc::new(SqliteStore::open_in_memory().unwrap())).await;
    let mut reports = portal.orchestrator.reports();
    set_network(&portal, false);

    for (action, id) in [(Action::Create, "x"), (Action::Update, "y"), (Action::Delete, "z")] {
        let outcome = portal
            .orchestrator
            .submit_operation(action, "contacts", json!({ "id": id }))
            .await
            .unwrap();
        assert!(outcome.is_queued());
    }
    assert!(portal.contacts.calls().is_empty());

    let cancel = CancellationToken::new();
    tokio::join!(portal.orchestrator.run(cancel.clone()), async {
        set_network(&portal, true);
        let report = reports.recv().await.unwrap();
        assert_eq!(report.success_count, 3);
        cancel.cancel();
    });

    assert_eq!(
        portal.contacts.call_log(),
        vec!["create contacts/x", "update contacts/y", "delete contacts/z"]
    );
    assert!(portal.orchestrator.queue().is_empty().unwrap());
    assert!(reports.try_recv().is_err());
}

#[tokio::test]
async fn failed_item_is_retried_after_later_items() {
    let portal = portal(Arc::new(SqliteStore::open_in_memory().unwrap())).await;
    set_network(&portal, false);
    for id in ["a", "b"] {
        portal
            .orchestrator
            .submit_operation(Action::Update, "contacts", json!({ "id": id }))
            .await
            .unwrap();
    }
    portal.contacts.fail_record("a", 1);

    let first = portal.orchestrator.drain().await.unwrap().unwrap();
    let second = portal.orchestrator.drain().await.unwrap().unwrap();

    assert_eq!((first.success_count, first.failure_count), (1, 1));
    assert_eq!((second.success_count, second.failure_count), (1, 0));
    assert_eq!(
        portal.contacts.call_log(),
        vec!["update contacts/a", "update contacts/b", "update contacts/a"]
    );
}

#[tokio::test]
async fn persistent_failure_is_abandoned_after_three_drains() {
    let portal = portal(Arc::new(SqliteStore::open_in_memory().unwrap())).await;
    set_network(&portal, false);
    portal
        .orchestrator
        .submit_operation(Action::Delete, "contacts", json!({ "id": "gone" }))
        .await
        .unwrap();
    portal.contacts.fail_record("gone", u32::MAX);

    let mut failures = 0;
    for _ in 0..3 {
        failures += portal.orchestrator.drain().await.unwrap().unwrap().failure_count;
    }

    assert_eq!(failures, 3);
    assert!(portal.orchestrator.queue().is_empty().unwrap());
}

#[tokio::test]
async fn unrouted_collection_is_abandoned_like_any_failure() {
    let portal = portal(Arc::new(SqliteStore::open_in_memory().unwrap())).await;
    set_network(&portal, false);
    portal
        .orchestrator
        .submit_operation(Action::Create, "invoices", json!({ "total": 12 }))
        .await
        .unwrap();

    let mut abandoned = Vec::new();
    for _ in 0..3 {
        let report = portal.orchestrator.drain().await.unwrap().unwrap();
        abandoned.extend(report.abandoned);
    }

    assert_eq!(abandoned.len(), 1);
    assert!(abandoned[0].last_error.contains("invoices"));
    assert!(portal.orchestrator.queue().is_empty().unwrap());
}

#[tokio::test]
async fn queued_edits_survive_restart() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fieldsync.db");

    {
        let portal = portal(Arc::new(SqliteStore::open(&path).unwrap())).await;
        set_network(&portal, false);
        portal
            .orchestrator
            .submit_operation(Action::Create, "contacts", json!({ "id": "late" }))
            .await
            .unwrap();
    }

    let portal = portal(Arc::new(SqliteStore::open(&path).unwrap())).await;
    assert_eq!(portal.orchestrator.queue().len().unwrap(), 1);
    let report = portal.orchestrator.drain().await.unwrap().unwrap();
    assert_eq!(report.success_count, 1);
    assert_eq!(portal.contacts.call_log(), vec!["create contacts/late"]);
}

#[tokio::test]
async fn online_submit_bypasses_queue() {
    let portal = portal(Arc::new(SqliteStore::open_in_memory().unwrap())).await;

    let outcome = portal
        .orchestrator
        .submit_operation(Action::Create, "contacts", json!({ "id": "now" }))
        .await
        .unwrap();

    assert!(matches!(outcome, SubmitOutcome::Applied(_)));
    assert!(portal.orchestrator.queue().is_empty().unwrap());
}

#[tokio::test]
async fn broken_push_plugin_is_unavailable() {
    let bridge = ScriptedBridge::new().failing(
        Capability::PushNotifications,
        BridgeError::NotImplemented("PushNotifications plugin is not implemented on android".into()),
    );
    let registry =
        CapabilityRegistry::new(Arc::new(FakeProbe::native(Platform::Android)), Arc::new(bridge));

    let resolution = registry.resolve_capability(Capability::PushNotifications).await;

    assert_eq!(resolution.status, CapabilityStatus::Unavailable);
    assert!(resolution.error_detail.as_deref().unwrap().contains("not implemented"));
    assert!(!registry.is_capability_available(Capability::PushNotifications));
    assert_eq!(registry.status(Capability::Network), None);
    registry.resolve_capability(Capability::Network).await;
    assert!(registry.is_capability_available(Capability::Network));
}

#[test]
fn cache_shares_store_with_queue_without_collisions() {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(0));
    let cache = KvCache::with_clock(store.clone(), clock.clone());
    let queue = OfflineQueue::with_clock(store, clock.clone());

    cache.set("contacts:list", &json!(["c1", "c2"]), 5).unwrap();
    queue
        .enqueue(crate::test_helpers::make_op(Action::Update, "contacts", "c1"))
        .unwrap();

    assert_eq!(cache.clear().unwrap(), 1);
    assert_eq!(queue.len().unwrap(), 1);

    cache.set("contacts:list", &json!(["c1"]), 5).unwrap();
    clock.advance(5 * 60_000);
    assert_eq!(cache.get::<serde_json::Value>("contacts:list").unwrap(), None);
}
