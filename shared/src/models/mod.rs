//! Data models
//!
//! Shared between the notify server and its clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! Staff and table ids are opaque strings issued by the identity store.

pub mod dining_table;
pub mod notification;
pub mod order;
pub mod serde_helpers;
pub mod staff;

// Re-exports
pub use dining_table::*;
pub use notification::*;
pub use order::*;
pub use staff::*;
