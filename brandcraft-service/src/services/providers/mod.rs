//! AI provider abstractions and implementations.
//!
//! Each hosted service sits behind a trait so handlers and orchestration logic
//! can be exercised with the mock providers in [`mock`].

pub mod mock;
pub mod openrouter;
pub mod watson;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// A credential or endpoint is missing; no request was sent.
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    /// The service rejected the credential. Never worth retrying.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The response arrived but its content was not in the expected shape.
    #[error("Invalid response: {0}")]
    Parse(String),

    #[error("Cannot connect: {0}")]
    Unreachable(String),

    #[error("Network error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            ProviderError::Unreachable(err.to_string())
        } else if err.is_decode() {
            ProviderError::Parse(err.to_string())
        } else if err.is_timeout() {
            ProviderError::Transport(format!("request timed out: {}", err))
        } else {
            ProviderError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Parse(err.to_string())
    }
}

/// Text of an error response. A body that cannot be read is described rather than dropped.
pub(crate) async fn error_body(provider: &str, response: reqwest::Response) -> String {
    describe_body(provider, response.text().await)
}

fn describe_body(provider: &str, body: Result<String, reqwest::Error>) -> String {
    match body {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(provider, error = %e, "Failed to read error response body");
            format!("<unreadable body: {}>", e)
        }
    }
}

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Trait for chat-completion providers (e.g., OpenRouter).
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send the whole conversation and return the first completion, trimmed.
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String, ProviderError>;

    /// Model identifier requests are sent to.
    fn model(&self) -> &str;
}

/// Document-level sentiment returned by an NLU provider.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSentiment {
    pub label: String,
    pub score: f64,
}

/// Document-level emotion scores, in the order the NLU service reports them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct EmotionScores {
    #[serde(default)]
    pub sadness: f64,
    #[serde(default)]
    pub joy: f64,
    #[serde(default)]
    pub fear: f64,
    #[serde(default)]
    pub disgust: f64,
    #[serde(default)]
    pub anger: f64,
}

impl EmotionScores {
    /// Emotions paired with their names; the order breaks ties for the dominant emotion.
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("sadness", self.sadness),
            ("joy", self.joy),
            ("fear", self.fear),
            ("disgust", self.disgust),
            ("anger", self.anger),
        ]
    }
}

/// Everything the sentiment endpoint needs from one NLU call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NluAnalysis {
    pub sentiment: Option<DocumentSentiment>,
    pub emotions: Option<EmotionScores>,
    pub keywords: Vec<String>,
}

/// Trait for natural-language-understanding providers (e.g., Watson NLU).
#[async_trait]
pub trait NluProvider: Send + Sync {
    /// Analyze sentiment, emotion and up to five keywords for `text`.
    async fn analyze(&self, text: &str) -> Result<NluAnalysis, ProviderError>;
}
