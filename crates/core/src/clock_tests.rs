// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn system_clock_is_past_2020() {
    // 2020-01-01T00:00:00Z
    assert!(SystemClock.now_ms() > 1_577_836_800_000);
}

#[test]
fn manual_clock_advances_only_when_told() {
    let clock = ManualClock::new(1000);
    assert_eq!(clock.now_ms(), 1000);
    assert_eq!(clock.now_ms(), 1000);

    clock.advance(250);
    assert_eq!(clock.now_ms(), 1250);

    clock.set(10);
    assert_eq!(clock.now_ms(), 10);
}

#[test]
fn now_converts_millis_to_utc() {
    let clock = ManualClock::new(1_700_000_000_123);
    assert_eq!(clock.now().timestamp_millis(), 1_700_000_000_123);
}

#[test]
fn references_and_arcs_delegate() {
    let clock = Arc::new(ManualClock::new(42));
    let by_ref: &ManualClock = &clock;
    assert_eq!(by_ref.now_ms(), 42);
    assert_eq!(ClockSource::now_ms(&clock), 42);

    let dynamic: Arc<dyn ClockSource> = clock.clone();
    clock.advance(1);
    assert_eq!(dynamic.now_ms(), 43);
}
