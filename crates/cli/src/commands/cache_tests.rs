// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use serde_json::json;
use yare::parameterized;

#[parameterized(
    number = { "42", json!(42) },
    array = { "[1,2]", json!([1, 2]) },
    object = { r#"{"a":true}"#, json!({ "a": true }) },
    quoted = { r#""hi""#, json!("hi") },
    bare_word = { "hello", json!("hello") },
    broken_json = { "{oops", json!("{oops") },
)]
fn parse_command_line_value(raw: &str, expected: Value) {
    assert_eq!(parse_value(raw), expected);
}

#[test]
fn strings_render_bare() {
    assert_eq!(render_value(&json!("plain")).unwrap(), "plain");
    assert_eq!(render_value(&json!([1])).unwrap(), "[\n  1\n]");
}
