//! Mock provider implementations for testing.

use super::{ChatMessage, ChatProvider, NluAnalysis, NluProvider, ProviderError};
use async_trait::async_trait;
use std::sync::Mutex;

/// How a mock chat provider answers every call.
#[derive(Debug, Clone)]
enum ChatBehavior {
    Reply(String),
    Status { status: u16, body: String },
    NotConfigured,
}

/// Mock chat provider that records every conversation it receives.
pub struct MockChatProvider {
    behavior: ChatBehavior,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockChatProvider {
    /// Always answer with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_behavior(ChatBehavior::Reply(text.into()))
    }

    /// Always fail as if the service returned `status`.
    pub fn failing(status: u16, body: impl Into<String>) -> Self {
        Self::with_behavior(ChatBehavior::Status {
            status,
            body: body.into(),
        })
    }

    /// Always fail as if no credential were configured.
    pub fn unconfigured() -> Self {
        Self::with_behavior(ChatBehavior::NotConfigured)
    }

    fn with_behavior(behavior: ChatBehavior) -> Self {
        Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Conversations received so far, oldest first.
    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChatProvider for MockChatProvider {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String, ProviderError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(messages.to_vec());
        }

        match &self.behavior {
            ChatBehavior::Reply(text) => Ok(text.trim().to_string()),
            ChatBehavior::Status { status, body } => Err(ProviderError::Upstream {
                status: *status,
                body: body.clone(),
            }),
            ChatBehavior::NotConfigured => Err(ProviderError::NotConfigured(
                "OPENROUTER_API_KEY is not set".to_string(),
            )),
        }
    }

    fn model(&self) -> &str {
        "mock/chat"
    }
}

/// How a mock NLU provider answers every call.
#[derive(Debug, Clone)]
pub enum NluBehavior {
    Analysis(NluAnalysis),
    Status { status: u16, body: String },
    Unauthorized,
    Unreachable,
    Timeout,
}

/// Mock NLU provider that records the text it was asked to analyze.
pub struct MockNluProvider {
    behavior: NluBehavior,
    texts: Mutex<Vec<String>>,
}

impl MockNluProvider {
    pub fn new(behavior: NluBehavior) -> Self {
        Self {
            behavior,
            texts: Mutex::new(Vec::new()),
        }
    }

    /// Texts sent upstream so far, oldest first.
    pub fn texts(&self) -> Vec<String> {
        self.texts
            .lock()
            .map(|texts| texts.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl NluProvider for MockNluProvider {
    async fn analyze(&self, text: &str) -> Result<NluAnalysis, ProviderError> {
        if let Ok(mut texts) = self.texts.lock() {
            texts.push(text.to_string());
        }

        match &self.behavior {
            NluBehavior::Analysis(analysis) => Ok(analysis.clone()),
            NluBehavior::Status { status, body } => Err(ProviderError::Upstream {
                status: *status,
                body: body.clone(),
            }),
            NluBehavior::Unauthorized => Err(ProviderError::Unauthorized(
                "Provided API key could not be found".to_string(),
            )),
            NluBehavior::Unreachable => Err(ProviderError::Unreachable(
                "connection refused".to_string(),
            )),
            NluBehavior::Timeout => Err(ProviderError::Transport(
                "request timed out".to_string(),
            )),
        }
    }
}
