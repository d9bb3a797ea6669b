//! Text-generation model client
//!
//! The pipeline only sees [`ModelClient`]: one prompt in, raw text out.
//! [`OllamaClient`] talks to an Ollama-compatible `/api/chat` endpoint and
//! rate limits all requests through a shared governor quota.

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use thiserror::Error;

use crate::config::ModelSettings;

/// Model client errors
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Single system + user exchange
#[derive(Debug, Clone, PartialEq)]
pub struct ChatPrompt {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Black-box prompt/response exchange against a text-generation model
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Return the raw reply text, untrimmed and unvalidated
    async fn complete(&self, prompt: &ChatPrompt) -> Result<String, ModelError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    stream: bool,
    options: ChatOptions,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: String,
}

/// Ollama chat client
pub struct OllamaClient {
    http_client: reqwest::Client,
    settings: ModelSettings,
    rate_limiter: DefaultDirectRateLimiter,
}

impl OllamaClient {
    pub fn new(settings: ModelSettings) -> Result<Self, ModelError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| ModelError::Network(e.to_string()))?;

        let per_second = NonZeroU32::new(settings.requests_per_second).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = RateLimiter::direct(Quota::per_second(per_second));

        Ok(Self {
            http_client,
            settings,
            rate_limiter,
        })
    }
}

#[async_trait]
impl ModelClient for OllamaClient {
    async fn complete(&self, prompt: &ChatPrompt) -> Result<String, ModelError> {
        self.rate_limiter.until_ready().await;

        let url = format!("{}/api/chat", self.settings.base_url);
        let request = ChatRequest {
            model: &self.settings.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            stream: false,
            options: ChatOptions {
                temperature: prompt.temperature,
                num_predict: prompt.max_tokens,
            },
        };

        tracing::debug!(model = %self.settings.model, url = %url, "Querying model");

        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ModelError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ModelError::Api(status.as_u16(), error_text));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| ModelError::Parse(e.to_string()))?;

        tracing::debug!(chars = chat.message.content.len(), "Model replied");

        Ok(chat.message.content)
    }
}
