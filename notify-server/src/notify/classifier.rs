//! Transition classifier

use chrono::{DateTime, Utc};
use shared::models::{OrderSnapshot, OrderStatus};

/// What an order transition means for notifications
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scenario {
    /// Nothing to announce
    NoOp,
    /// Order entered `pending`: alert the kitchen
    NewOrder {
        created_at: Option<DateTime<Utc>>,
        table_number: Option<String>,
    },
    /// Order entered `ready`: alert the assigned server
    OrderReady {
        server_id: Option<String>,
        table_number: Option<String>,
    },
}

/// Classify a before/after pair of one order
pub fn classify(before: &OrderSnapshot, after: &OrderSnapshot) -> Scenario {
    if before.status == after.status {
        return Scenario::NoOp;
    }
    match after.status {
        OrderStatus::Pending => Scenario::NewOrder {
            created_at: after.created_at,
            table_number: after.table_number.clone(),
        },
        OrderStatus::Ready => Scenario::OrderReady {
            server_id: after.server_id.clone(),
            table_number: after.table_number.clone(),
        },
        OrderStatus::Other(_) => Scenario::NoOp,
    }
}
