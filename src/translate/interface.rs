use serde::{Deserialize, Serialize};

use crate::error::{ReasonCode, RelayError};

/// Target language of a translation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetLanguage {
    English,
    Japanese,
    /// No explicit target; the model picks English or Japanese
    Auto,
}

impl TargetLanguage {
    /// Parses an explicit two-letter code.
    pub fn from_code(code: &str) -> Result<Self, RelayError> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(TargetLanguage::English),
            "ja" => Ok(TargetLanguage::Japanese),
            _ => Err(RelayError::UnsupportedLanguage(code.trim().to_string())),
        }
    }

    /// Wording used inside the user instruction
    pub fn description(&self) -> &'static str {
        match self {
            TargetLanguage::English => "English",
            TargetLanguage::Japanese => "Japanese",
            TargetLanguage::Auto => "English or Japanese, whichever is appropriate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutcome {
    Success {
        original_text: String,
        translated_text: String,
    },
    Failure {
        reason_code: ReasonCode,
        message: String,
    },
}

impl TranslationOutcome {
    pub fn failure(err: &RelayError) -> Self {
        TranslationOutcome::Failure {
            reason_code: err.reason_code(),
            message: err.to_string(),
        }
    }

    pub fn from_result(original_text: &str, result: Result<String, RelayError>) -> Self {
        match result {
            Ok(translated_text) => TranslationOutcome::Success {
                original_text: original_text.to_string(),
                translated_text,
            },
            Err(err) => Self::failure(&err),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TranslationOutcome::Success { .. })
    }
}
