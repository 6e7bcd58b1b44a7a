use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub system_config: SystemConfig,
    #[serde(default)]
    pub llm_config: LlmConfig,
    #[serde(default)]
    pub callback_config: CallbackConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

/// Configuration for the OpenAI-compatible completion provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_provider")]
    pub llm_provider: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub llm_api_key: String,

    pub organization_id: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_llm_timeout")]
    pub request_timeout_secs: u64,
}

fn default_llm_provider() -> String {
    "openai_llm".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_llm_timeout() -> u64 {
    60
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackConfig {
    #[serde(default = "default_callback_timeout")]
    pub timeout_secs: u64,

    /// Text of the immediate acknowledgment returned to the caller
    #[serde(default = "default_start_message")]
    pub start_message: String,
}

fn default_callback_timeout() -> u64 {
    10
}

fn default_start_message() -> String {
    "Translation in progress. The result will be posted shortly.".to_string()
}

/// Environment variables checked, in order, for the provider credential
const API_KEY_VARS: [&str; 2] = ["OPENAI_API_KEY", "LLM_API_KEY"];

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(path, &content)
    }

    /// Loads the first candidate that exists on disk.
    ///
    /// `Ok(None)` means no candidate exists. A file that exists but fails to
    /// read or parse is an error rather than a silent fallback to defaults.
    pub fn discover<S: AsRef<str>>(candidates: &[S]) -> Result<Option<(String, Self)>> {
        for candidate in candidates {
            let path: &str = candidate.as_ref();
            if !Path::new(path).exists() {
                continue;
            }
            let config = Self::load(path)
                .with_context(|| format!("Failed to load config from {}", path))?;
            return Ok(Some((path.to_string(), config)));
        }
        Ok(None)
    }

    /// Determine file type by extension and deserialize
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        let path_lower = path.to_lowercase();
        if path_lower.ends_with(".json") || path_lower.ends_with(".jsonld") {
            Ok(serde_json::from_str(content)?)
        } else {
            Ok(serde_yaml::from_str(content)?)
        }
    }

    /// Overlay values resolved from the process environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = API_KEY_VARS
            .into_iter()
            .filter_map(|name| lookup(name))
            .find(|value| !value.trim().is_empty())
        {
            self.llm_config.llm_api_key = key;
        }
        if let Some(url) = lookup("LLM_BASE_URL").filter(|v| !v.trim().is_empty()) {
            self.llm_config.base_url = url;
        }
        if let Some(port) = lookup("PORT").and_then(|v| v.parse().ok()) {
            self.system_config.port = port;
        }
    }

    /// Fails when the configured provider needs a credential and none was resolved.
    pub fn validate(&self) -> Result<()> {
        if self.llm_config.llm_provider == "openai_llm"
            && self.llm_config.llm_api_key.trim().is_empty()
        {
            anyhow::bail!(
                "No provider credential configured. Set llm_config.llm_api_key or one of {:?}",
                API_KEY_VARS
            );
        }
        Ok(())
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            llm_provider: default_llm_provider(),
            base_url: default_base_url(),
            llm_api_key: String::new(),
            organization_id: None,
            model: default_model(),
            temperature: default_temperature(),
            request_timeout_secs: default_llm_timeout(),
        }
    }
}

impl Default for CallbackConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_callback_timeout(),
            start_message: default_start_message(),
        }
    }
}
