//! Push gateway implementations
//!
//! [`FcmGateway`] talks to the FCM HTTP endpoint (no SDK dependency).
//! [`LogPushGateway`] only logs, and is used in development when no server
//! key is configured.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use shared::models::{NotificationPayload, Recipients};

use super::PushGateway;
use crate::BoxError;

/// FCM HTTP push gateway
#[derive(Clone)]
pub struct FcmGateway {
    client: reqwest::Client,
    endpoint: String,
    server_key: String,
}

/// Per-call delivery summary returned by FCM
#[derive(Debug, Default, Deserialize)]
struct SendSummary {
    #[serde(default)]
    success: u64,
    #[serde(default)]
    failure: u64,
}

impl FcmGateway {
    pub fn new(
        endpoint: impl Into<String>,
        server_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, BoxError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            server_key: server_key.into(),
        })
    }
}

/// Build the request body: `to` for one device, `registration_ids` for a set
pub(crate) fn build_message(
    recipients: &Recipients,
    payload: &NotificationPayload,
) -> serde_json::Value {
    let mut message = serde_json::json!({
        "notification": {
            "title": payload.title,
            "body": payload.body,
            "sound": payload.sound,
        }
    });
    match recipients {
        Recipients::Single(token) => message["to"] = serde_json::json!(token),
        Recipients::Multicast(tokens) => message["registration_ids"] = serde_json::json!(tokens),
    }
    message
}

#[async_trait]
impl PushGateway for FcmGateway {
    async fn send(
        &self,
        recipients: &Recipients,
        payload: &NotificationPayload,
    ) -> Result<(), BoxError> {
        let body = build_message(recipients, payload);

        let summary: SendSummary = self
            .client
            .post(&self.endpoint)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("key={}", self.server_key),
            )
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        // Per-token failures are the gateway's concern; only report them
        if summary.failure > 0 {
            tracing::warn!(
                success = summary.success,
                failure = summary.failure,
                "Push gateway reported undelivered tokens"
            );
        } else {
            tracing::debug!(success = summary.success, "Push gateway accepted message");
        }
        Ok(())
    }
}

/// Gateway that logs instead of sending
#[derive(Debug, Clone, Default)]
pub struct LogPushGateway;

#[async_trait]
impl PushGateway for LogPushGateway {
    async fn send(
        &self,
        recipients: &Recipients,
        payload: &NotificationPayload,
    ) -> Result<(), BoxError> {
        tracing::info!(
            tokens = recipients.len(),
            title = %payload.title,
            body = %payload.body,
            "Push notification (not sent, no server key)"
        );
        Ok(())
    }
}
