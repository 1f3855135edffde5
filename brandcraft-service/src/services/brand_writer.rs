//! Text generation for brand names, marketing copy and the branding assistant.
//!
//! Every operation builds a fixed prompt, sends it through a [`ChatProvider`]
//! and, for structured outputs, validates the reply against its declared shape.

use super::json_extract::extract_json;
use super::providers::{ChatMessage, ChatProvider, ProviderError};
use crate::dtos::content::{AdSet, BioSet, SocialPostSet, TaglineSet, WelcomeEmail};
use crate::dtos::{ContentResult, ContentType, HistoryMessage, NamingResult};
use std::sync::Arc;

/// Prior turns forwarded to the assistant; older ones are dropped.
pub const MAX_HISTORY_TURNS: usize = 10;

const NAMING_SYSTEM_PROMPT: &str = "You are an expert brand naming consultant. \
Always respond with valid JSON only, no markdown.";

const CONTENT_SYSTEM_PROMPT: &str = "You are a brand content writer. \
Always respond with valid JSON only, no markdown fences.";

const ASSISTANT_PERSONA: &str = "You are BrandCraft AI, an expert branding consultant with 20 years of experience.
You help entrepreneurs and creators build powerful brand identities from scratch.
You are warm, encouraging, and give actionable, specific advice.
Ask clarifying questions to understand their vision. Guide them step by step through:
1. Brand purpose & mission
2. Target audience definition
3. Brand personality & tone
4. Naming strategy
5. Visual identity direction
6. Content voice & messaging

Keep responses concise (under 200 words) but impactful. Use bullet points sparingly.";

/// Writes brand names, copy and assistant replies with a chat model.
#[derive(Clone)]
pub struct BrandWriter {
    provider: Arc<dyn ChatProvider>,
}

impl BrandWriter {
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self { provider }
    }

    /// Ask for six brand names with tagline, meaning and style.
    #[tracing::instrument(skip(self), fields(model = %self.provider.model()))]
    pub async fn generate_brand_names(
        &self,
        niche: &str,
        tone: &str,
        audience: &str,
    ) -> Result<NamingResult, ProviderError> {
        let messages = [
            ChatMessage::system(NAMING_SYSTEM_PROMPT),
            ChatMessage::user(naming_prompt(niche, tone, audience)),
        ];

        let text = self.provider.chat(&messages).await?;
        let result: NamingResult = extract_json(&text)?;

        tracing::info!(count = result.names.len(), "Generated brand names");
        Ok(result)
    }

    /// Write one kind of marketing copy for an existing brand.
    #[tracing::instrument(
        skip(self),
        fields(model = %self.provider.model(), content_type = content_type.as_str())
    )]
    pub async fn generate_brand_content(
        &self,
        brand_name: &str,
        niche: &str,
        content_type: ContentType,
        tone: &str,
    ) -> Result<ContentResult, ProviderError> {
        let messages = [
            ChatMessage::system(CONTENT_SYSTEM_PROMPT),
            ChatMessage::user(content_prompt(content_type, brand_name, niche, tone)),
        ];

        let text = self.provider.chat(&messages).await?;
        parse_content(content_type, &text)
    }

    /// Continue a branding conversation; the reply is free-form prose.
    #[tracing::instrument(skip(self, history, message), fields(history_len = history.len()))]
    pub async fn assistant_chat(
        &self,
        history: &[HistoryMessage],
        message: &str,
    ) -> Result<String, ProviderError> {
        let conversation = assistant_conversation(history, message);
        self.provider.chat(&conversation).await
    }
}

/// System persona, the most recent history turns, then the new user message.
pub fn assistant_conversation(history: &[HistoryMessage], message: &str) -> Vec<ChatMessage> {
    let recent = &history[history.len().saturating_sub(MAX_HISTORY_TURNS)..];

    let mut conversation = Vec::with_capacity(recent.len() + 2);
    conversation.push(ChatMessage::system(ASSISTANT_PERSONA));
    conversation.extend(recent.iter().map(ChatMessage::from));
    conversation.push(ChatMessage::user(message));
    conversation
}

fn naming_prompt(niche: &str, tone: &str, audience: &str) -> String {
    format!(
        r#"You are an expert brand naming consultant.
Generate 6 unique, memorable brand names for a {niche} business.
Target audience: {audience}
Brand tone: {tone}

For each name return:
- name: the brand name
- tagline: a catchy one-liner tagline
- meaning: brief explanation of why this name works (1-2 sentences)
- style: personality descriptor (e.g., Bold, Playful, Sophisticated)

Respond ONLY in this exact JSON format (no markdown fences):
{{
  "names": [
    {{"name": "...", "tagline": "...", "meaning": "...", "style": "..."}}
  ]
}}"#
    )
}

fn content_prompt(content_type: ContentType, brand_name: &str, niche: &str, tone: &str) -> String {
    match content_type {
        ContentType::Tagline => format!(
            r#"Create 5 powerful taglines for '{brand_name}', a {niche} brand with a {tone} tone.
Return JSON only: {{"taglines": [{{"text": "...", "use_case": "..."}}]}}"#
        ),
        ContentType::Bio => format!(
            r#"Write 3 versions of a brand bio for '{brand_name}' ({niche}, {tone} tone):
- short: 50 words for Twitter/X
- medium: 100 words for Instagram/LinkedIn
- long: 200 words for website About page
Return JSON only: {{"bios": {{"short": "...", "medium": "...", "long": "..."}}}}"#
        ),
        ContentType::AdCopy => format!(
            r#"Write 3 ad copies for '{brand_name}' ({niche}, {tone} tone).
Each with: headline, body (2-3 sentences), cta, platform.
Return JSON only: {{"ads": [{{"platform": "Facebook", "headline": "...", "body": "...", "cta": "..."}}]}}"#
        ),
        ContentType::Email => format!(
            r#"Write a welcome email for '{brand_name}' ({niche}, {tone} tone).
Return JSON only: {{"subject": "...", "preview": "...", "body": "...", "sign_off": "..."}}"#
        ),
        ContentType::Social => format!(
            r#"Write 4 social media posts for '{brand_name}' ({niche}, {tone} tone) for different platforms.
Return JSON only: {{"posts": [{{"platform": "...", "content": "...", "hashtags": ["..."]}}]}}"#
        ),
    }
}

/// Validate model output against the shape declared for `content_type`.
pub fn parse_content(content_type: ContentType, text: &str) -> Result<ContentResult, ProviderError> {
    let result = match content_type {
        ContentType::Tagline => ContentResult::Taglines(extract_json::<TaglineSet>(text)?),
        ContentType::Bio => ContentResult::Bios(extract_json::<BioSet>(text)?),
        ContentType::AdCopy => ContentResult::Ads(extract_json::<AdSet>(text)?),
        ContentType::Email => ContentResult::Email(extract_json::<WelcomeEmail>(text)?),
        ContentType::Social => ContentResult::Social(extract_json::<SocialPostSet>(text)?),
    };
    Ok(result)
}
