use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use super::stateless_llm_interface::{ChatMessage, LlmError, StatelessLLMInterface};

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI compatible LLM implementation
/// Talks to any server exposing `POST {base_url}/chat/completions`
pub struct OpenAICompatibleLLM {
    model: String,
    base_url: String,
    api_key: String,
    organization_id: Option<String>,
    temperature: f32,
    client: Client,
}

impl OpenAICompatibleLLM {
    pub fn new(
        model: String,
        base_url: String,
        api_key: String,
        organization_id: Option<String>,
        temperature: f32,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = Client::builder()
            .user_agent(concat!("chat-translate-relay/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        info!(
            "Initialized OpenAICompatibleLLM: model={}, base_url={}",
            model, base_url
        );
        Ok(Self {
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            organization_id,
            temperature,
            client,
        })
    }
}

/// Pulls a human-readable message out of an OpenAI-style `{"error": {...}}` body.
fn provider_error_message(body: &serde_json::Value) -> Option<String> {
    let error = body.get("error")?;
    if let Some(message) = error.get("message").and_then(|m| m.as_str()) {
        return Some(message.to_string());
    }
    match error {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[async_trait]
impl StatelessLLMInterface for OpenAICompatibleLLM {
    async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: &messages,
            temperature: self.temperature,
        };

        let mut request_builder = self.client.post(&url).json(&request);
        if !self.api_key.is_empty() {
            request_builder = request_builder.bearer_auth(&self.api_key);
        }
        if let Some(org) = &self.organization_id {
            request_builder = request_builder.header("OpenAI-Organization", org.as_str());
        }

        debug!("Sending chat completion to {} ({} messages)", url, messages.len());
        let response = request_builder.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let body: Option<serde_json::Value> = serde_json::from_str(&text).ok();

        if !status.is_success() {
            let message = body
                .as_ref()
                .and_then(provider_error_message)
                .unwrap_or_else(|| text.trim().to_string());
            return Err(LlmError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let body = body.ok_or_else(|| {
            LlmError::MalformedResponse(format!("response is not JSON: {}", text.trim()))
        })?;
        if let Some(message) = provider_error_message(&body) {
            return Err(LlmError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatCompletionResponse = serde_json::from_value(body)
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::MalformedResponse("response has no choices".to_string()))
    }
}
