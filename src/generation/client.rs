// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Text generation client via an OpenAI-compatible chat completions API

use async_trait::async_trait;
use reqwest::Client;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

#[cfg(test)]
use mockall::automock;

/// Default hosted endpoint (Groq, OpenAI-compatible)
pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1";

/// Default model for the `Quality` profile
pub const DEFAULT_QUALITY_MODEL: &str = "llama-3.3-70b-versatile";

/// Default model for the `Fast` profile
pub const DEFAULT_FAST_MODEL: &str = "llama-3.1-8b-instant";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Text generation request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Text generation service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid text generation response: {0}")]
    InvalidResponse(String),
}

/// Which model a request should run on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelProfile {
    /// Larger model, used for listing descriptions
    Quality,
    /// Smaller model, used for social captions
    Fast,
}

/// Anything that can turn a single user prompt into text
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns `Ok(None)` when the service answered without any content
    async fn generate(
        &self,
        profile: ModelProfile,
        prompt: &str,
    ) -> Result<Option<String>, GenerationError>;
}

// --- OpenAI-compatible serde structs ---

#[derive(serde::Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(serde::Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(serde::Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(serde::Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(serde::Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Connection settings for the chat completions service
#[derive(Clone)]
pub struct GenerationConfig {
    /// Base URL, e.g. `https://api.groq.com/openai/v1`
    pub endpoint: String,
    /// Bearer credential
    pub api_key: String,
    pub quality_model: String,
    pub fast_model: String,
    pub timeout: Duration,
}

impl GenerationConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            quality_model: DEFAULT_QUALITY_MODEL.to_string(),
            fast_model: DEFAULT_FAST_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl fmt::Debug for GenerationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .field("quality_model", &self.quality_model)
            .field("fast_model", &self.fast_model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Client for a hosted chat completions service
pub struct ChatCompletionsClient {
    client: Client,
    endpoint: String,
    api_key: String,
    quality_model: String,
    fast_model: String,
}

impl ChatCompletionsClient {
    /// Create a new client
    pub fn new(config: GenerationConfig) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        let endpoint = config.endpoint.trim_end_matches('/').to_string();
        info!(
            "Text generation client configured: endpoint={}, quality_model={}, fast_model={}",
            endpoint, config.quality_model, config.fast_model
        );

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key,
            quality_model: config.quality_model,
            fast_model: config.fast_model,
        })
    }

    /// Model name used for a profile
    pub fn model_for(&self, profile: ModelProfile) -> &str {
        match profile {
            ModelProfile::Quality => &self.quality_model,
            ModelProfile::Fast => &self.fast_model,
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.endpoint)
    }
}

#[async_trait]
impl TextGenerator for ChatCompletionsClient {
    async fn generate(
        &self,
        profile: ModelProfile,
        prompt: &str,
    ) -> Result<Option<String>, GenerationError> {
        let start = std::time::Instant::now();
        let model = self.model_for(profile);

        let request = ChatRequest {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Text generation failed: model={}, status={}", model, status);
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content);

        debug!(
            "Text generation complete: model={}, chars={}, {}ms",
            model,
            content.as_ref().map(|c| c.len()).unwrap_or(0),
            start.elapsed().as_millis()
        );

        Ok(content)
    }
}
