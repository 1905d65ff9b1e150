// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Detection of the runtime platform and its ambient web APIs.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{BridgeError, Capability};

/// Where the application is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
    Web,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Android => "android",
            Platform::Ios => "ios",
            Platform::Web => "web",
        }
    }

    pub fn is_native(&self) -> bool {
        !matches!(self, Platform::Web)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of platform detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformDescriptor {
    pub platform: Platform,
    pub is_native: bool,
    /// Capabilities resolved as usable so far.
    pub available: Vec<Capability>,
}

impl PlatformDescriptor {
    pub fn web() -> Self {
        PlatformDescriptor { platform: Platform::Web, is_native: false, available: Vec::new() }
    }
}

/// Read-only view of the ambient runtime.
///
/// In production this wraps the shell and browser globals; tests substitute
/// a fake.
pub trait PlatformProbe: Send + Sync {
    /// The native shell platform, or `None` in a plain browser.
    fn native_platform(&self) -> Result<Option<Platform>, BridgeError>;

    /// Whether a browser environment (window/navigator) exists at all.
    fn has_browser_environment(&self) -> bool;

    fn has_service_worker(&self) -> bool;

    fn has_notification_api(&self) -> bool;

    /// `navigator.onLine`.
    fn navigator_online(&self) -> bool;

    /// `navigator.connection.type`, when the API exists.
    fn connection_type(&self) -> Option<String> {
        None
    }

    /// `navigator.connection.effectiveType`, when the API exists.
    fn effective_type(&self) -> Option<String> {
        None
    }
}

/// Detects native vs. web from the probe.
///
/// Never fails: a probe error, or a probe claiming the `web` platform is
/// native, degrades to a non-native web descriptor.
pub fn detect_platform(probe: &dyn PlatformProbe) -> PlatformDescriptor {
    match probe.native_platform() {
        Ok(Some(platform)) if platform.is_native() => {
            PlatformDescriptor { platform, is_native: true, available: Vec::new() }
        }
        Ok(_) => PlatformDescriptor::web(),
        Err(e) => {
            tracing::warn!(error = %e, "platform detection failed, assuming web");
            PlatformDescriptor::web()
        }
    }
}

/// Host probe for processes outside any browser or shell, such as the CLI.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessProbe;

impl PlatformProbe for HeadlessProbe {
    fn native_platform(&self) -> Result<Option<Platform>, BridgeError> {
        Ok(None)
    }

    fn has_browser_environment(&self) -> bool {
        false
    }

    fn has_service_worker(&self) -> bool {
        false
    }

    fn has_notification_api(&self) -> bool {
        false
    }

    fn navigator_online(&self) -> bool {
        true
    }
}

#[cfg(test)]
#[path = "platform_tests.rs"]
mod tests;
