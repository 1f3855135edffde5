//! Keyword heuristic used whenever the remote NLU service cannot answer.

use crate::dtos::{SentimentLabel, SentimentResult, SentimentScore};
use crate::services::providers::ProviderError;
use std::collections::BTreeMap;

const POSITIVE_WORDS: &[&str] = &[
    "great",
    "amazing",
    "innovative",
    "love",
    "best",
    "excellent",
    "powerful",
    "inspiring",
    "beautiful",
    "simple",
    "easy",
    "fast",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "poor",
    "terrible",
    "hard",
    "difficult",
    "slow",
    "complex",
    "expensive",
    "limited",
];

const BASIC_ANALYSIS_NOTICE: &str =
    "ℹ️ Using basic keyword analysis. Add IBM credentials for deep insights.";

const NEUTRAL_SCORE: f64 = 0.1;

/// Why the remote analysis was not used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// Named environment variable is unset.
    MissingCredential(&'static str),
    ClientUnavailable(String),
    KeyInvalid,
    NotProvisioned,
    TextTooShort,
    WrongEndpoint,
    Unreachable,
    ServiceError(String),
}

impl FallbackReason {
    /// Short label for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            FallbackReason::MissingCredential(_) => "not_configured",
            FallbackReason::ClientUnavailable(_) => "client_unavailable",
            FallbackReason::KeyInvalid => "key_invalid",
            FallbackReason::NotProvisioned => "not_provisioned",
            FallbackReason::TextTooShort => "text_too_short",
            FallbackReason::WrongEndpoint => "wrong_endpoint",
            FallbackReason::Unreachable => "unreachable",
            FallbackReason::ServiceError(_) => "service_error",
        }
    }

    /// Human readable reason, shown as the first brand insight.
    pub fn message(&self) -> String {
        match self {
            FallbackReason::MissingCredential(var) => {
                format!("⚠️ {} is not set. IBM Watson analysis is disabled.", var)
            }
            FallbackReason::ClientUnavailable(reason) => {
                format!("⚠️ IBM Watson NLU client is unavailable: {}", reason)
            }
            FallbackReason::KeyInvalid => {
                "⚠️ IBM Watson rejected the API key. Check IBM_API_KEY.".to_string()
            }
            FallbackReason::NotProvisioned => {
                "⚠️ IBM Watson denied access. Make sure the NLU service is provisioned for this key."
                    .to_string()
            }
            FallbackReason::TextTooShort => {
                "⚠️ Text is too short for IBM Watson analysis. Add more content.".to_string()
            }
            FallbackReason::WrongEndpoint => {
                "⚠️ IBM Watson endpoint not found. Check IBM_URL.".to_string()
            }
            FallbackReason::Unreachable => {
                "⚠️ Cannot reach IBM Watson. Check IBM_URL and network access.".to_string()
            }
            FallbackReason::ServiceError(message) => {
                format!("⚠️ IBM Watson service error: {}", message)
            }
        }
    }
}

/// Map a failed remote analysis to a fallback reason, by status first and
/// then by the error text.
pub fn classify(err: &ProviderError) -> FallbackReason {
    match err {
        ProviderError::Unauthorized(_) | ProviderError::Upstream { status: 401, .. } => {
            return FallbackReason::KeyInvalid
        }
        ProviderError::Upstream { status: 403, .. } => return FallbackReason::NotProvisioned,
        ProviderError::Upstream { status: 422, .. } => return FallbackReason::TextTooShort,
        ProviderError::Upstream { status: 404, .. } => return FallbackReason::WrongEndpoint,
        ProviderError::Unreachable(_) => return FallbackReason::Unreachable,
        _ => {}
    }

    let message = err.to_string();
    let lowered = message.to_lowercase();

    if lowered.contains("unauthorized") || lowered.contains("invalid credentials") {
        FallbackReason::KeyInvalid
    } else if lowered.contains("forbidden") {
        FallbackReason::NotProvisioned
    } else if lowered.contains("not enough text") {
        FallbackReason::TextTooShort
    } else if lowered.contains("not found") {
        FallbackReason::WrongEndpoint
    } else {
        FallbackReason::ServiceError(message)
    }
}

fn count_hits(text: &str, words: &[&str]) -> usize {
    words.iter().filter(|word| text.contains(*word)).count()
}

fn keyword_score(hits: usize) -> f64 {
    let raw = 0.3 + 0.08 * hits as f64;
    ((raw * 100.0).round() / 100.0).min(1.0)
}

/// Score `text` by counting positive and negative keywords.
pub fn fallback_sentiment(text: &str, reason: &FallbackReason) -> SentimentResult {
    let lowered = text.to_lowercase();
    let positive = count_hits(&lowered, POSITIVE_WORDS);
    let negative = count_hits(&lowered, NEGATIVE_WORDS);

    let sentiment = if positive > negative {
        SentimentScore {
            label: SentimentLabel::Positive,
            score: keyword_score(positive),
        }
    } else if negative > positive {
        SentimentScore {
            label: SentimentLabel::Negative,
            score: keyword_score(negative),
        }
    } else {
        SentimentScore {
            label: SentimentLabel::Neutral,
            score: NEUTRAL_SCORE,
        }
    };

    let emotions = BTreeMap::from([
        ("joy".to_string(), 0.4),
        ("sadness".to_string(), 0.1),
        ("anger".to_string(), 0.0),
        ("fear".to_string(), 0.1),
        ("disgust".to_string(), 0.0),
    ]);

    SentimentResult {
        success: true,
        sentiment,
        emotions,
        dominant_emotion: "joy".to_string(),
        keywords: Vec::new(),
        brand_insights: vec![reason.message(), BASIC_ANALYSIS_NOTICE.to_string()],
        fallback: true,
    }
}
