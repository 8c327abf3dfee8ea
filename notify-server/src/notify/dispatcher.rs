//! Notification dispatcher: payload composition and the single gateway call

use std::sync::Arc;

use shared::models::{NotificationPayload, Recipients};

use crate::BoxError;
use crate::gateway::PushGateway;

pub const NEW_ORDER_TITLE: &str = "Nouvelle Commande !";
pub const ORDER_READY_TITLE: &str = "Commande Prête !";

/// Label used when an order has no table (take-away)
pub const TAKEAWAY_LABEL: &str = "à emporter";

fn table_label(table_number: Option<&str>) -> &str {
    table_number.unwrap_or(TAKEAWAY_LABEL)
}

/// Kitchen alert for an order entering `pending`
pub fn new_order_payload(table_number: Option<&str>) -> NotificationPayload {
    NotificationPayload::new(
        NEW_ORDER_TITLE,
        format!("La table {} attend.", table_label(table_number)),
    )
}

/// Server alert for an order entering `ready`
pub fn order_ready_payload(table_number: Option<&str>) -> NotificationPayload {
    NotificationPayload::new(
        ORDER_READY_TITLE,
        format!(
            "La commande pour la table {} est prête.",
            table_label(table_number)
        ),
    )
}

#[derive(Clone)]
pub struct NotificationDispatcher {
    gateway: Arc<dyn PushGateway>,
}

impl NotificationDispatcher {
    pub fn new(gateway: Arc<dyn PushGateway>) -> Self {
        Self { gateway }
    }

    /// Exactly one gateway call carrying every recipient, no retry
    pub async fn dispatch(
        &self,
        recipients: &Recipients,
        payload: &NotificationPayload,
    ) -> Result<(), BoxError> {
        tracing::debug!(tokens = recipients.len(), title = %payload.title, "Dispatching notification");
        self.gateway.send(recipients, payload).await
    }
}
