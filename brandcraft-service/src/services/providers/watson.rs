//! IBM Watson Natural Language Understanding provider.
//!
//! Calls the `/v1/analyze` endpoint with API-key basic auth and requests
//! document sentiment, document emotion and sentiment-scored keywords.

use super::{
    error_body, DocumentSentiment, EmotionScores, NluAnalysis, NluProvider, ProviderError,
};
use crate::config::WatsonConfig;
use crate::services::metrics::record_upstream_call;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Maximum keywords requested per analysis.
pub const KEYWORD_LIMIT: u32 = 5;

/// Strip a trailing slash and default to `https://` when no scheme is given.
pub fn normalize_service_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

/// Watson NLU provider.
pub struct WatsonNluProvider {
    api_key: Secret<String>,
    analyze_url: reqwest::Url,
    version: String,
    client: Client,
}

impl WatsonNluProvider {
    /// Build a provider for the given credential and service instance URL.
    ///
    /// Fails when the HTTP client cannot be constructed or the URL is unusable;
    /// callers treat that as the remote service being unavailable.
    pub fn new(
        api_key: Secret<String>,
        service_url: &str,
        config: &WatsonConfig,
    ) -> Result<Self, ProviderError> {
        let base = normalize_service_url(service_url);
        let analyze_url = reqwest::Url::parse(&format!("{}/v1/analyze", base)).map_err(|e| {
            ProviderError::NotConfigured(format!("IBM_URL '{}' is not a valid URL: {}", base, e))
        })?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                ProviderError::NotConfigured(format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            api_key,
            analyze_url,
            version: config.version.clone(),
            client,
        })
    }

    pub fn analyze_url(&self) -> &reqwest::Url {
        &self.analyze_url
    }
}

#[async_trait]
impl NluProvider for WatsonNluProvider {
    async fn analyze(&self, text: &str) -> Result<NluAnalysis, ProviderError> {
        let request = AnalyzeRequest {
            text,
            features: Features {
                sentiment: EmptyOptions {},
                emotion: EmptyOptions {},
                keywords: KeywordOptions {
                    sentiment: true,
                    limit: KEYWORD_LIMIT,
                },
            },
        };

        tracing::debug!(text_len = text.len(), "Sending request to Watson NLU");

        let started = Instant::now();
        let response = self
            .client
            .post(self.analyze_url.clone())
            .query(&[("version", self.version.as_str())])
            .basic_auth("apikey", Some(self.api_key.expose_secret()))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                record_upstream_call("watson", "transport_error", started.elapsed());
                ProviderError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body("watson", response).await;
            record_upstream_call("watson", "http_error", started.elapsed());
            if status == StatusCode::UNAUTHORIZED {
                return Err(ProviderError::Unauthorized(body));
            }
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let result: AnalyzeResponse = response.json().await.map_err(|e| {
            record_upstream_call("watson", "parse_error", started.elapsed());
            ProviderError::Parse(format!("failed to parse NLU response: {}", e))
        })?;
        record_upstream_call("watson", "ok", started.elapsed());

        Ok(result.into())
    }
}

// ============================================================================
// Watson NLU API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
    features: Features,
}

#[derive(Debug, Serialize)]
struct Features {
    sentiment: EmptyOptions,
    emotion: EmptyOptions,
    keywords: KeywordOptions,
}

#[derive(Debug, Serialize)]
struct EmptyOptions {}

#[derive(Debug, Serialize)]
struct KeywordOptions {
    sentiment: bool,
    limit: u32,
}

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    #[serde(default)]
    sentiment: Option<SentimentResult>,
    #[serde(default)]
    emotion: Option<EmotionResult>,
    #[serde(default)]
    keywords: Vec<KeywordResult>,
}

#[derive(Debug, Deserialize)]
struct SentimentResult {
    document: Option<SentimentDocument>,
}

#[derive(Debug, Deserialize)]
struct SentimentDocument {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    score: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct EmotionResult {
    document: Option<EmotionDocument>,
}

#[derive(Debug, Deserialize)]
struct EmotionDocument {
    emotion: Option<EmotionScores>,
}

#[derive(Debug, Deserialize)]
struct KeywordResult {
    text: String,
}

impl From<AnalyzeResponse> for NluAnalysis {
    fn from(response: AnalyzeResponse) -> Self {
        let sentiment = response
            .sentiment
            .and_then(|s| s.document)
            .map(|doc| DocumentSentiment {
                label: doc.label.unwrap_or_else(|| "neutral".to_string()),
                score: doc.score.unwrap_or(0.0),
            });

        let emotions = response
            .emotion
            .and_then(|e| e.document)
            .and_then(|d| d.emotion);

        let keywords = response
            .keywords
            .into_iter()
            .take(KEYWORD_LIMIT as usize)
            .map(|k| k.text)
            .collect();

        NluAnalysis {
            sentiment,
            emotions,
            keywords,
        }
    }
}
