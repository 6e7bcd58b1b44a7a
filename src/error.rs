use axum::{
    extract::rejection::{FormRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm::LlmError;

/// Machine-readable classification carried by failure outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReasonCode {
    InvalidRequest,
    MissingBody,
    UnsupportedLanguage,
    UpstreamError,
    InternalError,
}

impl ReasonCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::InvalidRequest => "invalid_request",
            ReasonCode::MissingBody => "missing_body",
            ReasonCode::UnsupportedLanguage => "unsupported_language",
            ReasonCode::UpstreamError => "upstream_error",
            ReasonCode::InternalError => "internal_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ReasonCode::InvalidRequest
            | ReasonCode::MissingBody
            | ReasonCode::UnsupportedLanguage => StatusCode::BAD_REQUEST,
            ReasonCode::UpstreamError => StatusCode::BAD_GATEWAY,
            ReasonCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone)]
pub enum RelayError {
    /// The submission could not be decoded or lacks a required field
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("No text to translate. Add some text before the optional language code (en/ja).")]
    MissingBody,

    #[error("Unsupported target language: {0}. Use en or ja.")]
    UnsupportedLanguage(String),

    #[error("The translation service returned an error: {0}")]
    Upstream(String),

    #[error("An unexpected error occurred: {0}")]
    Internal(String),
}

impl RelayError {
    pub fn reason_code(&self) -> ReasonCode {
        match self {
            RelayError::InvalidRequest(_) => ReasonCode::InvalidRequest,
            RelayError::MissingBody => ReasonCode::MissingBody,
            RelayError::UnsupportedLanguage(_) => ReasonCode::UnsupportedLanguage,
            RelayError::Upstream(_) => ReasonCode::UpstreamError,
            RelayError::Internal(_) => ReasonCode::InternalError,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.reason_code().status_code()
    }
}

impl From<LlmError> for RelayError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Upstream { .. } => RelayError::Upstream(err.to_string()),
            other => RelayError::Internal(other.to_string()),
        }
    }
}

impl From<FormRejection> for RelayError {
    fn from(rejection: FormRejection) -> Self {
        RelayError::InvalidRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for RelayError {
    fn from(rejection: JsonRejection) -> Self {
        RelayError::InvalidRequest(rejection.body_text())
    }
}

/// Renders the `{ "status": "error", "error_message": ... }` body.
pub fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({
            "status": "error",
            "error_message": message
        })),
    )
        .into_response()
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        error_response(self.status_code(), &self.to_string())
    }
}
