// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Platform capabilities and how they are resolved.
//!
//! A capability is an optional platform feature. Inside a native shell it
//! comes from a plugin loaded through the [`NativeBridge`]; in a browser a
//! documented web fallback may stand in for it; otherwise it is unavailable.
//!
//! | Capability           | Native path          | Web fallback                              |
//! |----------------------|----------------------|-------------------------------------------|
//! | `network`            | network plugin       | online/offline events + connection quality |
//! | `push-notifications` | push plugin          | service worker + notification API         |
//! | `status-bar`         | status-bar plugin    | none                                      |
//! | `splash-screen`      | splash-screen plugin | none                                      |

mod bridge;
mod platform;
mod registry;

use std::fmt;
use std::str::FromStr;

use fieldsync_core::Error;
use serde::{Deserialize, Serialize};

pub use bridge::{
    BridgeError, NativeBridge, NativePlugin, NetworkPlugin, NetworkStatus, NoNativeBridge,
};
pub use platform::{detect_platform, HeadlessProbe, Platform, PlatformDescriptor, PlatformProbe};
pub use registry::{
    CapabilityHandle, CapabilityRegistry, CapabilityResolution, CapabilityStatus, WebFallback,
};

/// A named optional platform feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    Network,
    PushNotifications,
    StatusBar,
    SplashScreen,
}

impl Capability {
    pub const ALL: [Capability; 4] = [
        Capability::Network,
        Capability::PushNotifications,
        Capability::StatusBar,
        Capability::SplashScreen,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Network => "network",
            Capability::PushNotifications => "push-notifications",
            Capability::StatusBar => "status-bar",
            Capability::SplashScreen => "splash-screen",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Capability {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_lowercase().as_str() {
            "network" => Ok(Capability::Network),
            "push-notifications" => Ok(Capability::PushNotifications),
            "status-bar" => Ok(Capability::StatusBar),
            "splash-screen" => Ok(Capability::SplashScreen),
            _ => Err(Error::InvalidCapability(s.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
