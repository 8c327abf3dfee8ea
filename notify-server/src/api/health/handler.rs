//! Health check handler

use axum::{Json, extract::State};

use crate::error::ServiceResult;
use crate::state::AppState;

/// GET /health - 存储连通性检查
pub async fn health_check(State(state): State<AppState>) -> ServiceResult<Json<serde_json::Value>> {
    state.documents.ping().await?;
    Ok(Json(serde_json::json!({
        "status": "ok",
        "service": "notify-server",
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.config.environment,
    })))
}
