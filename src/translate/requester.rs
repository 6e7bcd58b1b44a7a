use std::sync::Arc;
use tracing::{debug, error};

use super::interface::{TargetLanguage, TranslationOutcome};
use super::prompts::{user_instruction, TRANSLATOR_SYSTEM_PROMPT};
use crate::error::RelayError;
use crate::llm::{ChatMessage, StatelessLLMInterface};

/// Turns text into a translation through a completion provider.
pub struct TranslationRequester {
    llm: Arc<dyn StatelessLLMInterface>,
}

impl TranslationRequester {
    pub fn new(llm: Arc<dyn StatelessLLMInterface>) -> Self {
        Self { llm }
    }

    /// One provider call, classified into an outcome.
    pub async fn translate(&self, text: &str, target: TargetLanguage) -> TranslationOutcome {
        let result = self.request_completion(text, target).await;
        if let Err(err) = &result {
            error!("Translation failed ({}): {}", err.reason_code(), err);
        }
        TranslationOutcome::from_result(text, result)
    }

    async fn request_completion(
        &self,
        text: &str,
        target: TargetLanguage,
    ) -> Result<String, RelayError> {
        let messages = vec![
            ChatMessage::system(TRANSLATOR_SYSTEM_PROMPT),
            ChatMessage::user(user_instruction(target, text)),
        ];
        debug!("Requesting translation into {}", target.description());

        let translated = self.llm.chat_completion(messages).await?;
        Ok(translated.trim().to_string())
    }
}
