// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Data-mutating operations against remote collections.
//!
//! An [`Operation`] is the caller's intent: an action, the collection it
//! targets, and a JSON object payload. When it cannot be applied right away
//! it is wrapped in a [`QueuedOperation`], which adds identity, an enqueue
//! timestamp and retry accounting.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Number of failed replay attempts after which a queued operation is abandoned.
pub const MAX_RETRIES: u32 = 3;

/// The kind of mutation an operation performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Update,
    Delete,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }

    /// Whether the payload must identify an existing record.
    pub fn requires_record_id(&self) -> bool {
        matches!(self, Action::Update | Action::Delete)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "create" => Ok(Action::Create),
            "update" => Ok(Action::Update),
            "delete" => Ok(Action::Delete),
            _ => Err(Error::InvalidAction(s.to_string())),
        }
    }
}

/// A mutation intent against a named remote collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub action: Action,
    pub collection: String,
    pub payload: Map<String, Value>,
}

impl Operation {
    /// Builds an operation, checking the payload shape.
    ///
    /// The payload must be a JSON object, and update/delete payloads must
    /// carry a non-empty `id` field.
    pub fn new(action: Action, collection: impl Into<String>, payload: Value) -> Result<Self> {
        let collection = collection.into();
        if collection.trim().is_empty() {
            return Err(Error::InvalidPayload("collection name is empty".to_string()));
        }

        let payload = match payload {
            Value::Object(map) => map,
            other => {
                return Err(Error::InvalidPayload(format!(
                    "expected a JSON object, got {}",
                    json_kind(&other)
                )))
            }
        };

        let op = Operation { action, collection, payload };
        if action.requires_record_id() && op.record_id().is_none() {
            return Err(Error::MissingRecordId {
                action: action.to_string(),
                collection: op.collection,
            });
        }
        Ok(op)
    }

    /// The identifier of the record this operation touches, if the payload has one.
    ///
    /// String and integer ids are both accepted.
    pub fn record_id(&self) -> Option<String> {
        match self.payload.get("id")? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.record_id() {
            Some(id) => write!(f, "{} {}/{}", self.action, self.collection, id),
            None => write!(f, "{} {}", self.action, self.collection),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// An operation waiting in the offline queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueuedOperation {
    /// Creation time in milliseconds plus a random suffix, e.g. `1718000000000-9f3a01c2`.
    pub id: String,
    #[serde(flatten)]
    pub operation: Operation,
    pub enqueued_at: DateTime<Utc>,
    #[serde(default)]
    pub retry_count: u32,
}

impl QueuedOperation {
    /// Wraps an operation for queueing at the given time.
    pub fn new(operation: Operation, enqueued_at: DateTime<Utc>) -> Self {
        QueuedOperation {
            id: generate_queue_id(enqueued_at),
            operation,
            enqueued_at,
            retry_count: 0,
        }
    }

    /// Records a failed replay attempt.
    ///
    /// Returns true when the operation has reached the retry ceiling and
    /// must be abandoned.
    pub fn record_failure(&mut self) -> bool {
        self.retry_count = self.retry_count.saturating_add(1);
        self.is_exhausted()
    }

    pub fn is_exhausted(&self) -> bool {
        self.retry_count >= MAX_RETRIES
    }
}

/// Generate a queue id from a timestamp and a random 32-bit suffix.
pub fn generate_queue_id(at: DateTime<Utc>) -> String {
    format!("{}-{:08x}", at.timestamp_millis(), rand::random::<u32>())
}

#[cfg(test)]
#[path = "op_tests.rs"]
mod tests;
