//! Order event handler

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde::Serialize;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::OrderUpdateEvent;

use crate::auth::Caller;
use crate::error::ServiceResult;
use crate::notify::TriggerOutcome;
use crate::state::AppState;
use crate::utils::validation::{MAX_ID_LEN, require_text};

/// Terminal state reported back to the event source
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResult {
    pub order_id: String,
    /// `dispatched` or `suppressed`
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipients: Option<usize>,
}

impl EventResult {
    fn new(order_id: String, outcome: TriggerOutcome) -> Self {
        match outcome {
            TriggerOutcome::Suppressed(reason) => Self {
                order_id,
                outcome: "suppressed",
                reason: Some(reason.as_str()),
                recipients: None,
            },
            TriggerOutcome::Dispatched { recipients } => Self {
                order_id,
                outcome: "dispatched",
                reason: None,
                recipients: Some(recipients),
            },
        }
    }
}

/// POST /api/events/order-updated - 订单状态变更
pub async fn order_updated(
    State(state): State<AppState>,
    caller: Caller,
    payload: Result<Json<OrderUpdateEvent>, JsonRejection>,
) -> ServiceResult<ApiResponse<EventResult>> {
    let Json(event) = payload.map_err(|rejection| {
        AppError::with_message(ErrorCode::OrderEventInvalid, rejection.body_text())
    })?;
    require_text(Some(event.order_id.as_str()), "orderId", MAX_ID_LEN)?;

    tracing::debug!(order_id = %event.order_id, caller = %caller.uid, "Order event received");

    let outcome = state.order_trigger().handle(&event).await?;
    Ok(ApiResponse::success(EventResult::new(event.order_id, outcome)))
}
