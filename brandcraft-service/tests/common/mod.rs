//! Test helpers for brandcraft-service integration tests.
//!
//! Builds the router around in-crate mock providers so no hosted service is
//! contacted unless a test points a client at a wiremock server.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use brandcraft_service::config::{BrandcraftConfig, HuggingFaceConfig, OpenRouterConfig, WatsonConfig};
use brandcraft_service::services::providers::mock::{MockChatProvider, MockNluProvider, NluBehavior};
use brandcraft_service::services::providers::{DocumentSentiment, EmotionScores, NluAnalysis};
use brandcraft_service::services::{BrandWriter, LogoGenerator, RemoteNlu, SentimentAnalyzer};
use brandcraft_service::{build_router, AppState};
use secrecy::Secret;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt;

pub fn test_config() -> BrandcraftConfig {
    BrandcraftConfig {
        common: service_core::config::Config {
            port: 0,
            environment: "test".to_string(),
        },
        service_name: "brandcraft-service".to_string(),
        api_prefix: "/api".to_string(),
        allowed_origins: vec!["*".to_string()],
        otlp_endpoint: None,
        openrouter: OpenRouterConfig {
            api_key: None,
            base_url: "http://127.0.0.1:9".to_string(),
            model: "test/model".to_string(),
            referer: "http://localhost:8000".to_string(),
            app_title: "BrandCraft".to_string(),
            timeout: Duration::from_secs(5),
        },
        huggingface: HuggingFaceConfig {
            token: None,
            base_url: "http://127.0.0.1:9/models".to_string(),
            models: vec!["org/model-a".to_string(), "org/model-b".to_string()],
            request_timeout: Duration::from_secs(2),
            default_warmup_wait: Duration::from_millis(10),
            max_warmup_wait: Duration::from_millis(50),
        },
        watson: WatsonConfig {
            api_key: None,
            url: None,
            version: "2022-04-07".to_string(),
            timeout: Duration::from_secs(5),
        },
    }
}

/// Hugging Face settings pointing at `base_url` with a token.
pub fn huggingface_at(base_url: &str) -> HuggingFaceConfig {
    HuggingFaceConfig {
        token: Some(Secret::new("hf_test".to_string())),
        base_url: format!("{}/models", base_url),
        ..test_config().huggingface
    }
}

pub struct TestApp {
    pub router: Router,
    pub chat: Arc<MockChatProvider>,
    pub nlu: Option<Arc<MockNluProvider>>,
}

pub struct TestAppBuilder {
    chat: MockChatProvider,
    nlu: Option<NluBehavior>,
    huggingface: HuggingFaceConfig,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            chat: MockChatProvider::replying("{}"),
            nlu: None,
            huggingface: test_config().huggingface,
        }
    }

    pub fn chat(mut self, chat: MockChatProvider) -> Self {
        self.chat = chat;
        self
    }

    pub fn nlu(mut self, behavior: NluBehavior) -> Self {
        self.nlu = Some(behavior);
        self
    }

    pub fn huggingface(mut self, config: HuggingFaceConfig) -> Self {
        self.huggingface = config;
        self
    }

    pub fn build(self) -> TestApp {
        let chat = Arc::new(self.chat);
        let nlu = self.nlu.map(|behavior| Arc::new(MockNluProvider::new(behavior)));

        let remote = match &nlu {
            Some(provider) => RemoteNlu::Ready(provider.clone()),
            None => RemoteNlu::NotConfigured("IBM_API_KEY"),
        };

        let state = AppState {
            config: test_config(),
            writer: BrandWriter::new(chat.clone()),
            logo: Arc::new(
                LogoGenerator::new(&self.huggingface).expect("Failed to build logo generator"),
            ),
            sentiment: SentimentAnalyzer::new(remote),
        };

        TestApp {
            router: build_router(state),
            chat,
            nlu,
        }
    }
}

pub fn positive_analysis() -> NluAnalysis {
    NluAnalysis {
        sentiment: Some(DocumentSentiment {
            label: "positive".to_string(),
            score: 0.87654,
        }),
        emotions: Some(EmotionScores {
            sadness: 0.02,
            joy: 0.71,
            fear: 0.05,
            disgust: 0.01,
            anger: 0.03,
        }),
        keywords: vec!["coffee".to_string(), "ritual".to_string()],
    }
}

/// POST `body` as JSON and return the status with the parsed response body.
pub async fn post_json(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .expect("Failed to build request"),
        )
        .await
        .expect("Failed to execute request");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
