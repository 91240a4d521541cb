//! Client for a locally hosted model server speaking the Ollama
//! `/api/generate` protocol.

use crate::error::InferenceError;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_MODEL: &str = "mistral:7b-instruct-v0.3-q4_0";
pub const DEFAULT_URL: &str = "http://localhost:11434/api/generate";

/// Anything that can answer a prompt.
pub trait LanguageModel {
    fn generate(&self, prompt: &str) -> Result<String, InferenceError>;
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub model: String,
    pub url: String,
    /// `None` waits for as long as the model takes
    pub timeout: Option<Duration>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            url: DEFAULT_URL.to_string(),
            timeout: None,
        }
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

pub struct LocalLlm {
    config: LlmConfig,
    client: Client,
}

impl LocalLlm {
    pub fn new(config: LlmConfig) -> Result<Self, InferenceError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

impl LanguageModel for LocalLlm {
    fn generate(&self, prompt: &str) -> Result<String, InferenceError> {
        let request = GenerateRequest {
            model: &self.config.model,
            prompt,
            stream: false,
        };

        debug!(url = %self.config.url, model = %self.config.model, "sending prompt");
        let response = self.client.post(&self.config.url).json(&request).send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(InferenceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = serde_json::from_str(&body)?;
        Ok(parsed.response)
    }
}
