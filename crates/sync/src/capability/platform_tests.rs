// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::test_helpers::FakeProbe;
use yare::parameterized;

#[parameterized(
    android = { Platform::Android },
    ios = { Platform::Ios },
)]
fn native_shell_is_detected(platform: Platform) {
    let descriptor = detect_platform(&FakeProbe::native(platform));
    assert_eq!(descriptor.platform, platform);
    assert!(descriptor.is_native);
    assert!(descriptor.available.is_empty());
}

#[test]
fn plain_browser_is_web() {
    let descriptor = detect_platform(&FakeProbe::browser());
    assert_eq!(descriptor, PlatformDescriptor::web());
}

#[test]
fn probe_failure_degrades_to_web() {
    let descriptor = detect_platform(&FakeProbe::broken("bridge missing"));
    assert_eq!(descriptor.platform, Platform::Web);
    assert!(!descriptor.is_native);
}

#[test]
fn web_reported_as_native_platform_is_still_web() {
    let descriptor = detect_platform(&FakeProbe::native(Platform::Web));
    assert!(!descriptor.is_native);
}

#[test]
fn headless_probe_has_no_browser() {
    let probe = HeadlessProbe;
    assert!(!probe.has_browser_environment());
    assert!(probe.navigator_online());
    assert_eq!(detect_platform(&probe), PlatformDescriptor::web());
}

#[test]
fn platform_names() {
    assert_eq!(Platform::Android.to_string(), "android");
    assert_eq!(Platform::Ios.to_string(), "ios");
    assert_eq!(Platform::Web.to_string(), "web");
    assert!(Platform::Ios.is_native());
    assert!(!Platform::Web.is_native());
}
