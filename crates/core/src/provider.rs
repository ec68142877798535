//! Chat-completion provider interface and the OpenAI-compatible implementation.
//!
//! The provider is the only external collaborator of this crate. It is modelled as a trait so
//! the synthesizer can be exercised against scripted providers in tests, and every failure mode
//! is an explicit [`ProviderError`] variant so fallback selection happens in exactly one place.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

/// A single chat message in provider wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

/// Everything that can go wrong on the provider path.
///
/// None of these variants escape the synthesizer; they are consumed by fallback selection.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("no provider client configured")]
    Unavailable,
    #[error("provider call timed out after {0:?}")]
    Timeout(Duration),
    #[error("provider transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("provider returned status {status}: {detail}")]
    Api { status: u16, detail: String },
    #[error("provider response had no message content")]
    Malformed,
    #[error("provider returned empty output")]
    EmptyOutput,
}

impl ProviderError {
    /// Short stable class name used in response metadata and operator logs.
    pub fn class(&self) -> &'static str {
        match self {
            ProviderError::Unavailable => "no_client",
            ProviderError::Timeout(_) => "timeout",
            ProviderError::Transport(_) => "transport_error",
            ProviderError::Api { .. } => "api_error",
            ProviderError::Malformed => "malformed_response",
            ProviderError::EmptyOutput => "empty_output",
        }
    }
}

/// Chat-completion provider interface.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Provider name for diagnostics and logging.
    fn name(&self) -> &'static str;

    /// Send one chat request and return the trimmed completion text.
    ///
    /// Implementations must honour `timeout` as a bound on the whole round-trip and must map
    /// blank completions to [`ProviderError::EmptyOutput`].
    async fn chat(
        &self,
        messages: Vec<ChatMessage>,
        timeout: Duration,
    ) -> Result<String, ProviderError>;
}

/// OpenAI-compatible chat/completions client.
///
/// Holds one long-lived `reqwest::Client`; the handle is cheap to clone and safe to share
/// across concurrent requests.
#[derive(Clone)]
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    api_base: String,
    model: String,
}

impl OpenAiProvider {
    pub fn new(api_key: String, api_base: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            api_base,
            model,
        }
    }

    async fn chat_inner(&self, messages: Vec<ChatMessage>) -> Result<String, ProviderError> {
        let url = format!("{}/chat/completions", self.api_base);
        let body = json!({
            "model": self.model,
            "messages": messages,
        });

        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let detail = resp.text().await.unwrap_or_default();
            return Err(ProviderError::Api { status, detail });
        }

        let resp_json: serde_json::Value = resp.json().await?;
        let content = resp_json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or(ProviderError::Malformed)?;

        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(ProviderError::EmptyOutput);
        }
        Ok(trimmed.to_owned())
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn chat(
        &self,
        messages: Vec<ChatMessage>,
        timeout: Duration,
    ) -> Result<String, ProviderError> {
        tokio::time::timeout(timeout, self.chat_inner(messages))
            .await
            .map_err(|_| ProviderError::Timeout(timeout))?
    }
}
