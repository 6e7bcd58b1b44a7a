use serde::{Deserialize, Serialize};

use crate::error::RelayError;
use crate::translate::TranslationOutcome;

/// Who sees a message posted back to the channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    /// Visible to everyone in the originating channel
    InChannel,
    /// Visible only to the requester
    Ephemeral,
}

/// Chat message body, used both for the acknowledgment and for callbacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMessage {
    pub response_type: ResponseType,
    pub text: String,
}

pub type CallbackPayload = ResponseMessage;
pub type AckResponse = ResponseMessage;

const FALLBACK_FAILURE_MESSAGE: &str = "Translation failed for an unknown reason.";

impl ResponseMessage {
    pub fn ephemeral(text: impl Into<String>) -> Self {
        Self {
            response_type: ResponseType::Ephemeral,
            text: text.into(),
        }
    }

    pub fn from_outcome(outcome: &TranslationOutcome) -> Self {
        match outcome {
            TranslationOutcome::Success {
                original_text,
                translated_text,
            } => Self {
                response_type: ResponseType::InChannel,
                text: format!(
                    "*Original*\n{}\n\n*Translation*\n{}",
                    original_text, translated_text
                ),
            },
            TranslationOutcome::Failure { message, .. } => {
                if message.trim().is_empty() {
                    Self::ephemeral(FALLBACK_FAILURE_MESSAGE)
                } else {
                    Self::ephemeral(message.clone())
                }
            }
        }
    }

    pub fn rejection(err: &RelayError) -> Self {
        Self::ephemeral(err.to_string())
    }
}
