//! OpenRouter chat-completion provider.
//!
//! Speaks the OpenAI-compatible `/chat/completions` API that OpenRouter exposes
//! for hosted models.

use super::{error_body, ChatMessage, ChatProvider, ProviderError};
use crate::config::OpenRouterConfig;
use crate::services::metrics::record_upstream_call;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// OpenRouter chat provider.
pub struct OpenRouterChatProvider {
    config: OpenRouterConfig,
    client: Client,
}

impl OpenRouterChatProvider {
    pub fn new(config: OpenRouterConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                ProviderError::NotConfigured(format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl ChatProvider for OpenRouterChatProvider {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String, ProviderError> {
        let api_key = self.config.api_key.as_ref().ok_or_else(|| {
            ProviderError::NotConfigured("OPENROUTER_API_KEY is not set".to_string())
        })?;

        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages,
        };

        tracing::debug!(
            model = %self.config.model,
            message_count = messages.len(),
            "Sending request to OpenRouter"
        );

        let started = Instant::now();
        let result = self
            .client
            .post(self.completions_url())
            .bearer_auth(api_key.expose_secret())
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &self.config.app_title)
            .json(&request)
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                record_upstream_call("openrouter", "transport_error", started.elapsed());
                tracing::warn!(model = %self.config.model, error = %e, "OpenRouter request failed");
                return Err(e.into());
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = error_body("openrouter", response).await;
            record_upstream_call("openrouter", "http_error", started.elapsed());
            tracing::warn!(
                model = %self.config.model,
                status = status.as_u16(),
                "OpenRouter returned an error status"
            );
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            record_upstream_call("openrouter", "parse_error", started.elapsed());
            ProviderError::Parse(format!("failed to parse completion: {}", e))
        })?;
        record_upstream_call("openrouter", "ok", started.elapsed());

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|text| text.trim().to_string())
            .ok_or_else(|| ProviderError::Parse("completion contained no choices".to_string()))
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

// ============================================================================
// OpenRouter API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
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
