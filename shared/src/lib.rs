//! Shared types for the notify service
//!
//! Domain models (staff, tables, order snapshots, notification payloads),
//! the unified error system and small utilities used by the server and its
//! clients.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
