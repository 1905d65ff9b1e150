// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;
use std::sync::Arc;

use fieldsync::capability::{
    Capability, CapabilityRegistry, CapabilityStatus, HeadlessProbe, NoNativeBridge,
    PlatformDescriptor,
};
use fieldsync_core::cache::CACHE_PREFIX;
use fieldsync_core::KvStore;
use serde::Serialize;

use super::Context;
use crate::error::Result;

#[derive(Debug, Serialize)]
pub(crate) struct CapabilityLine {
    pub capability: Capability,
    pub status: CapabilityStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct StatusReport {
    pub platform: PlatformDescriptor,
    pub capabilities: Vec<CapabilityLine>,
    pub store: PathBuf,
    pub pending: usize,
    pub cached: usize,
}

pub fn run(context: &Context, json: bool) -> Result<()> {
    let report = collect(context)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let native = if report.platform.is_native { "native" } else { "not native" };
    println!("platform: {} ({})", report.platform.platform, native);
    println!("capabilities:");
    for line in &report.capabilities {
        match &line.detail {
            Some(detail) => println!("  {:<20} {} ({})", line.capability.as_str(), line.status, detail),
            None => println!("  {:<20} {}", line.capability.as_str(), line.status),
        }
    }
    println!("store: {}", report.store.display());
    println!("queue: {} pending", report.pending);
    println!("cache: {} entries", report.cached);
    Ok(())
}

/// Resolve every capability as seen from this host and count stored state.
pub(crate) fn collect(context: &Context) -> Result<StatusReport> {
    let registry = CapabilityRegistry::new(Arc::new(HeadlessProbe), Arc::new(NoNativeBridge));
    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    let capabilities = runtime.block_on(async {
        let mut lines = Vec::with_capacity(Capability::ALL.len());
        for capability in Capability::ALL {
            let resolution = registry.resolve_capability(capability).await;
            lines.push(CapabilityLine {
                capability,
                status: resolution.status,
                detail: resolution.error_detail.clone(),
            });
        }
        lines
    });

    Ok(StatusReport {
        platform: registry.initialize_platform(),
        capabilities,
        store: context.store_path.clone(),
        pending: context.queue().len()?,
        cached: context.store().keys_with_prefix(CACHE_PREFIX)?.len(),
    })
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
