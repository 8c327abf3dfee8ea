//! Order status trigger
//!
//! `Received → Classified → {Suppressed | Resolving → Dispatched}`. Both
//! terminal states are successful completions; only collaborator failures
//! surface as errors.

use std::fmt;

use chrono::{DateTime, Utc};
use shared::models::{OrderUpdateEvent, Recipients, StaffRole};

use super::classifier::{Scenario, classify};
use super::dispatcher::{NotificationDispatcher, new_order_payload, order_ready_payload};
use super::recipients::RecipientResolver;
use super::staleness::is_fresh;
use crate::BoxError;

/// Why an event produced no notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressReason {
    /// Event carried no before/after pair
    MissingSnapshot,
    /// Status unchanged, or changed to a status with no alert
    NoTransition,
    /// New order without a creation time
    MissingCreatedAt,
    /// New order older than the staleness threshold
    Stale,
    /// No active Chef with a push token
    NoChefTokens,
    /// Ready order with no assigned server
    NoServerAssigned,
    /// Assigned server missing or without a push token
    NoServerToken,
}

impl SuppressReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingSnapshot => "missing_snapshot",
            Self::NoTransition => "no_transition",
            Self::MissingCreatedAt => "missing_created_at",
            Self::Stale => "stale",
            Self::NoChefTokens => "no_chef_tokens",
            Self::NoServerAssigned => "no_server_assigned",
            Self::NoServerToken => "no_server_token",
        }
    }
}

impl fmt::Display for SuppressReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal state reached for one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    Suppressed(SuppressReason),
    /// One gateway call was made for `recipients` tokens
    Dispatched { recipients: usize },
}

impl TriggerOutcome {
    pub fn is_dispatched(&self) -> bool {
        matches!(self, Self::Dispatched { .. })
    }
}

#[derive(Clone)]
pub struct OrderStatusTrigger {
    resolver: RecipientResolver,
    dispatcher: NotificationDispatcher,
    threshold_minutes: f64,
}

impl OrderStatusTrigger {
    pub fn new(
        resolver: RecipientResolver,
        dispatcher: NotificationDispatcher,
        threshold_minutes: f64,
    ) -> Self {
        Self {
            resolver,
            dispatcher,
            threshold_minutes,
        }
    }

    /// Handle one order update event, evaluated against the current time
    pub async fn handle(&self, event: &OrderUpdateEvent) -> Result<TriggerOutcome, BoxError> {
        self.handle_at(event, Utc::now()).await
    }

    /// Handle one order update event, evaluated against `now`
    pub async fn handle_at(
        &self,
        event: &OrderUpdateEvent,
        now: DateTime<Utc>,
    ) -> Result<TriggerOutcome, BoxError> {
        let outcome = self.evaluate(event, now).await.inspect_err(|e| {
            tracing::error!(order_id = %event.order_id, error = %e, "Order trigger failed");
        })?;

        match outcome {
            TriggerOutcome::Suppressed(reason) => {
                tracing::info!(order_id = %event.order_id, reason = %reason, "Notification suppressed");
            }
            TriggerOutcome::Dispatched { recipients } => {
                tracing::info!(order_id = %event.order_id, recipients, "Notification dispatched");
            }
        }
        Ok(outcome)
    }

    async fn evaluate(
        &self,
        event: &OrderUpdateEvent,
        now: DateTime<Utc>,
    ) -> Result<TriggerOutcome, BoxError> {
        let Some((before, after)) = event.snapshots() else {
            return Ok(TriggerOutcome::Suppressed(SuppressReason::MissingSnapshot));
        };

        match classify(before, after) {
            Scenario::NoOp => Ok(TriggerOutcome::Suppressed(SuppressReason::NoTransition)),

            Scenario::NewOrder {
                created_at,
                table_number,
            } => {
                let Some(created_at) = created_at else {
                    return Ok(TriggerOutcome::Suppressed(SuppressReason::MissingCreatedAt));
                };
                if !is_fresh(created_at, now, self.threshold_minutes) {
                    return Ok(TriggerOutcome::Suppressed(SuppressReason::Stale));
                }

                let tokens = self.resolver.tokens_for_role(&StaffRole::Chef, true).await?;
                if tokens.is_empty() {
                    return Ok(TriggerOutcome::Suppressed(SuppressReason::NoChefTokens));
                }

                let recipients = Recipients::Multicast(tokens);
                let payload = new_order_payload(table_number.as_deref());
                self.dispatcher.dispatch(&recipients, &payload).await?;
                Ok(TriggerOutcome::Dispatched {
                    recipients: recipients.len(),
                })
            }

            Scenario::OrderReady {
                server_id,
                table_number,
            } => {
                let Some(server_id) = server_id else {
                    return Ok(TriggerOutcome::Suppressed(SuppressReason::NoServerAssigned));
                };
                let Some(token) = self.resolver.token_for_staff(&server_id).await? else {
                    return Ok(TriggerOutcome::Suppressed(SuppressReason::NoServerToken));
                };

                let payload = order_ready_payload(table_number.as_deref());
                self.dispatcher
                    .dispatch(&Recipients::Single(token), &payload)
                    .await?;
                Ok(TriggerOutcome::Dispatched { recipients: 1 })
            }
        }
    }
}
