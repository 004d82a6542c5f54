//! Client for the external chat-completion endpoint.
//!
//! The upstream provider is treated as an OpenAI-compatible HTTP service:
//! POST `{model, messages}` to the completions URL, read the first choice's
//! message content back. The trait seam exists so the chat service can be
//! tested against a stub backend.

use crate::error::{Error, Result};
use crate::types::ChatMessage;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Fallback reply when the provider returns no usable choice
pub const NO_RESPONSE_FALLBACK: &str = "No response";

/// Timeout for the health probe; the probe must never hang a health check.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// External completion provider seam
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Submit a context payload, returning the assistant reply text
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;

    /// Lightweight reachability check for the provider
    async fn probe(&self) -> Result<()>;
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl CompletionResponse {
    /// First choice's message content, or the fixed fallback string
    fn content(mut self) -> String {
        if self.choices.is_empty() {
            return NO_RESPONSE_FALLBACK.to_string();
        }
        self.choices
            .swap_remove(0)
            .message
            .and_then(|m| m.content)
            .unwrap_or_else(|| NO_RESPONSE_FALLBACK.to_string())
    }
}

/// HTTP client for an OpenAI-compatible completion provider
pub struct HttpCompletionClient {
    client: reqwest::Client,
    completions_url: String,
    probe_url: String,
    model: String,
}

impl HttpCompletionClient {
    /// Build a client with a bounded per-request timeout
    pub fn new(
        completions_url: impl Into<String>,
        probe_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::UpstreamUnavailable(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            completions_url: completions_url.into(),
            probe_url: probe_url.into(),
            model: model.into(),
        })
    }
}

#[async_trait]
impl CompletionBackend for HttpCompletionClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        debug!(
            url = %self.completions_url,
            model = %self.model,
            context_len = messages.len(),
            "submitting completion request"
        );

        let body = CompletionRequest {
            model: &self.model,
            messages,
        };

        let response = self
            .client
            .post(&self.completions_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!("completion request failed: {e}");
                Error::UpstreamUnavailable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!(%status, "completion endpoint returned non-success");
            return Err(Error::UpstreamUnavailable(format!(
                "completion endpoint returned {status}: {detail}"
            )));
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::UpstreamUnavailable(format!("malformed completion response: {e}")))?;

        Ok(parsed.content())
    }

    async fn probe(&self) -> Result<()> {
        let response = self
            .client
            .get(&self.probe_url)
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
            .map_err(|e| Error::UpstreamUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::UpstreamUnavailable(format!(
                "probe returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}
