//! Sentiment analysis for brand copy.
//!
//! Remote analysis goes through an [`NluProvider`]; whenever it cannot be
//! used, the keyword heuristic in [`fallback`] answers instead, so analysis
//! never fails.

pub mod fallback;
pub mod insights;

use self::fallback::{classify, fallback_sentiment, FallbackReason};
use self::insights::{brand_insights, dominant_emotion};
use super::metrics::record_sentiment_fallback;
use super::providers::watson::WatsonNluProvider;
use super::providers::{NluAnalysis, NluProvider};
use crate::config::WatsonConfig;
use crate::dtos::{SentimentLabel, SentimentResult, SentimentScore};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Texts shorter than this are padded before being sent upstream.
pub const MIN_UPSTREAM_CHARS: usize = 100;
/// Padded texts are cut to this length.
pub const MAX_UPSTREAM_CHARS: usize = 300;

const PAD_SEPARATOR: &str = " ";

/// Remote NLU availability, decided once at startup.
#[derive(Clone)]
pub enum RemoteNlu {
    /// Named environment variable is unset.
    NotConfigured(&'static str),
    /// Credentials are present but the client could not be built.
    Unavailable(String),
    Ready(Arc<dyn NluProvider>),
}

impl RemoteNlu {
    pub fn from_config(config: &WatsonConfig) -> Self {
        let Some(api_key) = config.api_key.clone() else {
            tracing::warn!("IBM_API_KEY is not set, sentiment uses keyword analysis");
            return RemoteNlu::NotConfigured("IBM_API_KEY");
        };
        let Some(url) = config.url.as_deref() else {
            tracing::warn!("IBM_URL is not set, sentiment uses keyword analysis");
            return RemoteNlu::NotConfigured("IBM_URL");
        };

        match WatsonNluProvider::new(api_key, url, config) {
            Ok(provider) => {
                tracing::info!(endpoint = %provider.analyze_url(), "Initialized Watson NLU provider");
                RemoteNlu::Ready(Arc::new(provider))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Watson NLU provider unavailable");
                RemoteNlu::Unavailable(e.to_string())
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, RemoteNlu::Ready(_))
    }
}

/// Repeat a short text until it reaches [`MIN_UPSTREAM_CHARS`], then cut it
/// to [`MAX_UPSTREAM_CHARS`]. Longer texts are returned unchanged.
pub fn pad_for_analysis(text: &str) -> String {
    if text.chars().count() >= MIN_UPSTREAM_CHARS || text.trim().is_empty() {
        return text.to_string();
    }

    let mut padded = text.to_string();
    while padded.chars().count() < MIN_UPSTREAM_CHARS {
        padded.push_str(PAD_SEPARATOR);
        padded.push_str(text);
    }

    match padded.char_indices().nth(MAX_UPSTREAM_CHARS) {
        Some((cut, _)) => padded[..cut].to_string(),
        None => padded,
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Turn a successful remote analysis into the response shape.
pub fn remote_result(analysis: NluAnalysis) -> SentimentResult {
    let (label, raw_score) = analysis
        .sentiment
        .as_ref()
        .map(|s| (SentimentLabel::from_label(&s.label), s.score))
        .unwrap_or((SentimentLabel::Neutral, 0.0));

    let dominant = dominant_emotion(analysis.emotions.as_ref());
    let insights = brand_insights(label, raw_score, analysis.emotions.as_ref(), dominant);

    let emotions: BTreeMap<String, f64> = analysis
        .emotions
        .map(|scores| {
            scores
                .entries()
                .into_iter()
                .map(|(name, value)| (name.to_string(), round3(value)))
                .collect()
        })
        .unwrap_or_default();

    SentimentResult {
        success: true,
        sentiment: SentimentScore {
            label,
            score: round3(raw_score),
        },
        emotions,
        dominant_emotion: dominant.to_string(),
        keywords: analysis.keywords.into_iter().take(5).collect(),
        brand_insights: insights,
        fallback: false,
    }
}

/// Sentiment analysis with a local fallback.
#[derive(Clone)]
pub struct SentimentAnalyzer {
    remote: RemoteNlu,
}

impl SentimentAnalyzer {
    pub fn new(remote: RemoteNlu) -> Self {
        Self { remote }
    }

    pub fn remote(&self) -> &RemoteNlu {
        &self.remote
    }

    /// Analyze `text`. Remote failures are folded into a fallback result.
    #[tracing::instrument(skip(self, text), fields(text_len = text.len(), remote = self.remote.is_ready()))]
    pub async fn analyze(&self, text: &str) -> SentimentResult {
        let provider = match &self.remote {
            RemoteNlu::Ready(provider) => provider,
            RemoteNlu::NotConfigured(var) => {
                return self.fallback(text, FallbackReason::MissingCredential(*var))
            }
            RemoteNlu::Unavailable(reason) => {
                return self.fallback(text, FallbackReason::ClientUnavailable(reason.clone()))
            }
        };

        let upstream_text = pad_for_analysis(text);
        match provider.analyze(&upstream_text).await {
            Ok(analysis) => remote_result(analysis),
            Err(e) => {
                tracing::warn!(error = %e, "Watson NLU analysis failed");
                self.fallback(text, classify(&e))
            }
        }
    }

    fn fallback(&self, text: &str, reason: FallbackReason) -> SentimentResult {
        tracing::info!(reason = reason.label(), "Using keyword sentiment fallback");
        record_sentiment_fallback(reason.label());
        fallback_sentiment(text, &reason)
    }
}
