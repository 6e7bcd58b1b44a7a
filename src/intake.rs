use serde::Deserialize;

use crate::error::RelayError;
use crate::translate::TargetLanguage;

/// Raw form submission from the chat front end
#[derive(Debug, Clone, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub response_url: String,
    #[serde(default)]
    pub user_id: String,
}

/// A validated request, owned by the background unit that processes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub raw_text: String,
    pub target: TargetLanguage,
    pub callback_url: String,
    pub requester_id: String,
}

const LANGUAGE_SUFFIXES: [(&str, TargetLanguage); 2] = [
    ("en", TargetLanguage::English),
    ("ja", TargetLanguage::Japanese),
];

/// Splits a trailing `en`/`ja` off the text.
///
/// The match is purely on the last two characters, so `"chicken"` yields
/// `("chick", English)`.
pub fn split_language_suffix(text: &str) -> (&str, TargetLanguage) {
    let trimmed = text.trim();
    for (suffix, target) in LANGUAGE_SUFFIXES {
        if let Some(body) = trimmed.strip_suffix(suffix) {
            return (body.trim(), target);
        }
    }
    (trimmed, TargetLanguage::Auto)
}

pub fn validate(
    text: &str,
    callback_url: &str,
    requester_id: &str,
) -> Result<TranslationRequest, RelayError> {
    if callback_url.trim().is_empty() {
        return Err(RelayError::InvalidRequest(
            "missing field `response_url`".to_string(),
        ));
    }

    let (body, target) = split_language_suffix(text);
    if body.is_empty() {
        return Err(RelayError::MissingBody);
    }

    Ok(TranslationRequest {
        raw_text: body.to_string(),
        target,
        callback_url: callback_url.to_string(),
        requester_id: requester_id.to_string(),
    })
}

impl Submission {
    pub fn validate(&self) -> Result<TranslationRequest, RelayError> {
        validate(&self.text, &self.response_url, &self.user_id)
    }
}
