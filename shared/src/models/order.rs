//! Order snapshot model
//!
//! The ordering system owns orders; this service only ever reads a
//! before/after pair delivered with each update event.

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order status
///
/// Only `pending` and `ready` trigger notifications; every other value is
/// kept verbatim and passed through.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Pending,
    Ready,
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Ready => "ready",
            Self::Other(value) => value,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => Self::Pending,
            "ready" => Self::Ready,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Other(value) => value,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One side of an order update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSnapshot {
    pub status: OrderStatus,
    #[serde(default, with = "serde_helpers::option_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "serde_helpers::option_label")]
    pub table_number: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::option_non_empty")]
    pub server_id: Option<String>,
}

/// Order update event: the document state before and after one write
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdateEvent {
    pub order_id: String,
    #[serde(default)]
    pub before: Option<OrderSnapshot>,
    #[serde(default)]
    pub after: Option<OrderSnapshot>,
}

impl OrderUpdateEvent {
    /// Both snapshots, or `None` when the event carries no data
    pub fn snapshots(&self) -> Option<(&OrderSnapshot, &OrderSnapshot)> {
        self.before.as_ref().zip(self.after.as_ref())
    }
}
