//! HTTP API
//!
//! - [`health`] - store connectivity check (public)
//! - [`events`] - order update events from the ordering system
//! - [`staff`] - staff lifecycle commands and push-token registration

pub mod events;
pub mod extract;
pub mod health;
pub mod staff;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub use extract::AppJson;

/// Router with every route registered (no middleware)
pub fn build_router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(events::router())
        .merge(staff::router())
}

/// Fully configured application, used by the server and by oneshot tests
pub fn build_app(state: AppState) -> Router {
    build_router()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
