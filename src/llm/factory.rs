use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use anyhow::Result;

use super::openai_compatible_llm::OpenAICompatibleLLM;
use super::stateless_llm_interface::StatelessLLMInterface;
use crate::config::LlmConfig;

/// Factory for creating stateless LLM instances
pub struct StatelessLLMFactory;

impl StatelessLLMFactory {
    /// Create an LLM based on the configuration.
    ///
    /// Every supported provider speaks the OpenAI `chat/completions` protocol,
    /// so they share one client and differ only in base URL and credential.
    pub fn create_llm(config: &LlmConfig) -> Result<Arc<dyn StatelessLLMInterface>> {
        info!("Initializing LLM: {}", config.llm_provider);

        match config.llm_provider.as_str() {
            "openai_llm" | "openai_compatible_llm" | "ollama_llm" | "groq_llm" => {
                Ok(Arc::new(OpenAICompatibleLLM::new(
                    config.model.clone(),
                    config.base_url.clone(),
                    config.llm_api_key.clone(),
                    config.organization_id.clone(),
                    config.temperature,
                    Duration::from_secs(config.request_timeout_secs),
                )?))
            }
            other => Err(anyhow::anyhow!("Unsupported LLM provider: {}", other)),
        }
    }
}
