use reqwest::Client;
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

use super::payload::{CallbackPayload, ResponseType};
use crate::error::RelayError;
use crate::translate::TranslationOutcome;

/// Identifies the request a delivery belongs to, for logging
#[derive(Debug, Clone)]
pub struct DeliveryContext {
    pub request_id: Uuid,
    pub requester_id: String,
}

impl DeliveryContext {
    pub fn new(requester_id: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            requester_id: requester_id.into(),
        }
    }
}

/// Posts outcomes to caller-supplied callback URLs.
///
/// Delivery is best-effort: failures are logged and dropped.
#[derive(Debug, Clone)]
pub struct CallbackDispatcher {
    client: Client,
}

impl CallbackDispatcher {
    pub fn new(timeout: Duration) -> Result<Self, RelayError> {
        let client = Client::builder()
            .user_agent(concat!("chat-translate-relay/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| RelayError::Internal(e.to_string()))?;
        Ok(Self { client })
    }

    pub async fn deliver(
        &self,
        outcome: &TranslationOutcome,
        callback_url: &str,
        context: &DeliveryContext,
    ) {
        let payload = CallbackPayload::from_outcome(outcome);
        self.post_best_effort(callback_url, &payload, context).await;
    }

    pub async fn notify_rejection(
        &self,
        err: &RelayError,
        callback_url: &str,
        context: &DeliveryContext,
    ) {
        let payload = CallbackPayload::rejection(err);
        self.post_best_effort(callback_url, &payload, context).await;
    }

    async fn post_best_effort(
        &self,
        callback_url: &str,
        payload: &CallbackPayload,
        context: &DeliveryContext,
    ) {
        match self.post(callback_url, payload).await {
            Ok(()) => info!(
                request_id = %context.request_id,
                requester = %context.requester_id,
                "Delivered {} callback",
                match payload.response_type {
                    ResponseType::InChannel => "in_channel",
                    ResponseType::Ephemeral => "ephemeral",
                }
            ),
            Err(e) => warn!(
                request_id = %context.request_id,
                requester = %context.requester_id,
                "Callback delivery to {} failed: {}",
                callback_host(callback_url),
                e.without_url()
            ),
        }
    }

    async fn post(&self, callback_url: &str, payload: &CallbackPayload) -> Result<(), reqwest::Error> {
        self.client
            .post(callback_url)
            .json(payload)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// Host part of a callback URL. Paths and queries of these URLs carry tokens
/// and stay out of the logs.
fn callback_host(callback_url: &str) -> String {
    reqwest::Url::parse(callback_url)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
        .unwrap_or_else(|| "<invalid url>".to_string())
}
