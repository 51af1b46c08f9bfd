//! Anthropic API Provider
//!
//! Free-text generation via Anthropic's Messages API.
//!
//! Unlike the OpenAI backend there is no separate system role here: the
//! system instruction is folded into the single user message using the
//! legacy Human/Assistant delimiter convention, and the reply is the first
//! text block of the response.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use super::{LlmProvider, ProviderConfig};
use crate::types::{AuditError, Result};

const DEFAULT_API_BASE: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const PROVIDER_NAME: &str = "anthropic";

const HUMAN_PROMPT: &str = "\n\nHuman:";
const AI_PROMPT: &str = "\n\nAssistant:";

/// Anthropic API Provider with secure API key handling
pub struct AnthropicProvider {
    /// API key stored securely - never exposed in logs or debug output
    api_key: SecretString,
    api_base: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    client: reqwest::Client,
}

impl std::fmt::Debug for AnthropicProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicProvider")
            .field("api_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl AnthropicProvider {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let api_base = config
            .api_base
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                AuditError::provider(PROVIDER_NAME, format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            api_key: config.api_key,
            api_base,
            model: config.model,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            client,
        })
    }

    /// Fold the system instruction and user message into one user-role
    /// prompt using the Human/Assistant delimiters.
    fn build_prompt(system_prompt: &str, user_message: &str) -> String {
        format!(
            "{} System: {}\n\nUser: {}{}",
            HUMAN_PROMPT, system_prompt, user_message, AI_PROMPT
        )
    }

    fn build_request(&self, system_prompt: &str, user_message: &str) -> MessagesRequest {
        MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            messages: vec![Message {
                role: "user".to_string(),
                content: Self::build_prompt(system_prompt, user_message),
            }],
        }
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    async fn generate(&self, system_prompt: &str, user_message: &str) -> Result<String> {
        info!(
            "Generating with Anthropic (model: {}, temperature: {})",
            self.model, self.temperature
        );

        let request = self.build_request(system_prompt, user_message);
        let url = format!("{}/v1/messages", self.api_base);

        debug!("Sending request to Anthropic API");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AuditError::provider(PROVIDER_NAME, format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AuditError::provider(
                PROVIDER_NAME,
                format!("API error ({}): {}", status, body),
            ));
        }

        let response_body: MessagesResponse = response.json().await.map_err(|e| {
            AuditError::provider(PROVIDER_NAME, format!("Failed to parse response: {}", e))
        })?;

        let content = response_body
            .content
            .first()
            .and_then(|block| block.text.as_ref())
            .ok_or_else(|| AuditError::provider(PROVIDER_NAME, "No content in response"))?;

        Ok(content.clone())
    }

    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: Option<String>,
}
