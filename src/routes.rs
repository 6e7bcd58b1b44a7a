use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        Form, State,
    },
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{error_response, RelayError};
use crate::intake::{split_language_suffix, Submission};
use crate::state::AppState;
use crate::translate::{TargetLanguage, TranslationOutcome};

pub fn create_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/api/health", get(health_check))
        // Slash-command style submission, answered through response_url
        .route("/translate", post(submit_translation))
        // Synchronous variant, answered in the HTTP response
        .route("/translate/sync", post(translate_sync))
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn submit_translation(
    State(state): State<AppState>,
    form: Result<Form<Submission>, FormRejection>,
) -> Result<Response, RelayError> {
    let Form(submission) = form?;
    let ack = state.orchestrator.submit(&submission)?;
    Ok(Json(ack).into_response())
}

#[derive(Debug, Deserialize)]
struct SyncTranslateRequest {
    #[serde(default)]
    text: String,
    target_lang: Option<String>,
}

async fn translate_sync(
    State(state): State<AppState>,
    payload: Result<Json<SyncTranslateRequest>, JsonRejection>,
) -> Result<Response, RelayError> {
    let Json(payload) = payload?;
    let (text, target) = match payload.target_lang.as_deref() {
        Some(code) => (payload.text.trim(), TargetLanguage::from_code(code)?),
        None => split_language_suffix(&payload.text),
    };
    if text.is_empty() {
        return Err(RelayError::MissingBody);
    }

    match state.requester.translate(text, target).await {
        TranslationOutcome::Success {
            translated_text, ..
        } => Ok(Json(json!({
            "status": "success",
            "translated_text": translated_text
        }))
        .into_response()),
        TranslationOutcome::Failure {
            reason_code,
            message,
        } => Ok(error_response(reason_code.status_code(), &message)),
    }
}
