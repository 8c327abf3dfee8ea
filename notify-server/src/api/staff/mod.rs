//! Staff API

mod handler;

use axum::{
    Router,
    routing::{post, put},
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/staff", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(handler::create))
        .route("/update", post(handler::update))
        .route("/set-active", post(handler::set_active))
        .route("/remove", post(handler::remove))
        .route("/me/fcm-token", put(handler::register_push_token))
}
