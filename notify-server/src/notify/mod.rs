//! Order-status notification core
//!
//! ```text
//! OrderUpdateEvent ─► classify ─► is_fresh (NewOrder only)
//!                                   │
//!                       RecipientResolver ─► NotificationDispatcher ─► PushGateway
//! ```
//!
//! [`classifier`] and [`staleness`] are pure; [`trigger`] is the thin
//! orchestrator that performs the collaborator calls.

pub mod classifier;
pub mod dispatcher;
pub mod recipients;
pub mod staleness;
pub mod trigger;

pub use classifier::{Scenario, classify};
pub use dispatcher::NotificationDispatcher;
pub use recipients::RecipientResolver;
pub use staleness::is_fresh;
pub use trigger::{OrderStatusTrigger, SuppressReason, TriggerOutcome};
