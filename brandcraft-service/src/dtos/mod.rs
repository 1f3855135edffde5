//! Request and response bodies for the HTTP API.

pub mod assistant;
pub mod content;
pub mod logo;
pub mod naming;
pub mod sentiment;

pub use assistant::{AssistantRequest, AssistantResponse, ConversationRole, HistoryMessage};
pub use content::{ContentRequest, ContentResponse, ContentResult, ContentType};
pub use logo::{LogoRequest, LogoResult};
pub use naming::{BrandNameIdea, NamingRequest, NamingResult};
pub use sentiment::{SentimentLabel, SentimentRequest, SentimentResult, SentimentScore};

pub(crate) fn default_tone() -> String {
    "professional".to_string()
}
