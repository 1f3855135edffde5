use crate::services::providers::ChatMessage;
use serde::{Deserialize, Serialize};

/// Who wrote a prior turn. System messages cannot be supplied by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryMessage {
    pub role: ConversationRole,
    pub content: String,
}

impl From<&HistoryMessage> for ChatMessage {
    fn from(message: &HistoryMessage) -> Self {
        match message.role {
            ConversationRole::User => ChatMessage::user(message.content.clone()),
            ConversationRole::Assistant => ChatMessage::assistant(message.content.clone()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssistantRequest {
    #[serde(default)]
    pub messages: Vec<HistoryMessage>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantResponse {
    pub response: String,
}
