//! Order event API

mod handler;

use axum::{Router, routing::post};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/events/order-updated", post(handler::order_updated))
}
