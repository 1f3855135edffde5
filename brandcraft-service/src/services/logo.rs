//! Logo generation against Hugging Face hosted diffusion models.
//!
//! Models are tried in order. A rejected token stops the whole request; a
//! model that is still loading gets one retry after its suggested wait; any
//! other failure moves on to the next model.

use super::metrics::{record_logo_attempt, record_upstream_call};
use super::providers::ProviderError;
use crate::config::HuggingFaceConfig;
use crate::dtos::LogoResult;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::{Duration, Instant};

const MISSING_TOKEN_MESSAGE: &str = "HF_TOKEN is not set in your .env file.";
const INVALID_TOKEN_MESSAGE: &str =
    "HF_TOKEN is invalid. Get a new one from https://huggingface.co/settings/tokens";
const EXHAUSTED_MESSAGE: &str =
    "Logo generation failed. Try again or check the server logs for details.";

/// Bodies larger than this are treated as images even without an image content type.
const MIN_IMAGE_BYTES: usize = 1000;
const PREVIEW_BYTES: usize = 200;

const STYLE_PROMPTS: &[(&str, &str)] = &[
    (
        "minimalist",
        "minimalist flat vector logo, clean lines, simple geometric shapes",
    ),
    (
        "modern",
        "modern professional logo, bold typography, sleek design",
    ),
    (
        "playful",
        "playful colorful logo, fun shapes, friendly design, cartoon style",
    ),
    (
        "luxury",
        "luxury premium logo, elegant serif, gold accents, sophisticated",
    ),
    (
        "tech",
        "tech startup logo, futuristic geometric, gradient, digital aesthetic",
    ),
    (
        "organic",
        "organic natural logo, hand-drawn feel, earthy, botanical elements",
    ),
];

const DEFAULT_STYLE: &str = "modern";

/// Style description for `style`; unknown styles fall back to "modern".
pub fn style_description(style: &str) -> &'static str {
    let key = style.trim().to_ascii_lowercase();
    let lookup = |name: &str| {
        STYLE_PROMPTS
            .iter()
            .find(|(style, _)| *style == name)
            .map(|(_, desc)| *desc)
    };
    lookup(&key)
        .or_else(|| lookup(DEFAULT_STYLE))
        .unwrap_or_default()
}

pub fn build_prompt(brand_name: &str, style: &str, primary_color: &str, industry: &str) -> String {
    format!(
        "{} for '{}' brand in {} industry, {} color scheme, white background, professional, \
         high quality, vector art style, centered composition",
        style_description(style),
        brand_name,
        industry,
        primary_color
    )
}

/// What one POST to a model produced.
#[derive(Debug)]
enum ImageAttempt {
    Image(Vec<u8>),
    Unauthorized,
    WarmingUp(Duration),
    NotImage(String),
    Failed(String),
}

impl ImageAttempt {
    fn outcome(&self) -> &'static str {
        match self {
            ImageAttempt::Image(_) => "image",
            ImageAttempt::Unauthorized => "unauthorized",
            ImageAttempt::WarmingUp(_) => "warming_up",
            ImageAttempt::NotImage(_) => "not_image",
            ImageAttempt::Failed(_) => "failed",
        }
    }
}

#[derive(Debug, Deserialize)]
struct LoadingBody {
    estimated_time: Option<f64>,
}

/// Image inference client that turns brand attributes into a logo.
pub struct LogoGenerator {
    token: Option<Secret<String>>,
    base_url: String,
    models: Vec<String>,
    default_warmup_wait: Duration,
    max_warmup_wait: Duration,
    client: Client,
}

impl LogoGenerator {
    pub fn new(config: &HuggingFaceConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                ProviderError::NotConfigured(format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            token: config.token.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            models: config.models.clone(),
            default_warmup_wait: config.default_warmup_wait,
            max_warmup_wait: config.max_warmup_wait,
            client,
        })
    }

    /// Generate a logo. Every failure is reported inside the returned result.
    #[tracing::instrument(skip(self), fields(models = self.models.len()))]
    pub async fn generate_logo(
        &self,
        brand_name: &str,
        style: &str,
        primary_color: &str,
        industry: &str,
    ) -> LogoResult {
        let Some(token) = self.token.as_ref() else {
            tracing::warn!("HF_TOKEN is not configured, skipping logo generation");
            return LogoResult::failed(MISSING_TOKEN_MESSAGE);
        };

        let prompt = build_prompt(brand_name, style, primary_color, industry);

        for model in &self.models {
            let url = format!("{}/{}", self.base_url, model);

            match self.attempt(&url, model, &prompt, token).await {
                ImageAttempt::Image(bytes) => {
                    return generated(bytes, prompt, model);
                }
                ImageAttempt::Unauthorized => {
                    tracing::error!(model = %model, "HF_TOKEN rejected, not trying further models");
                    return LogoResult::failed(INVALID_TOKEN_MESSAGE);
                }
                ImageAttempt::WarmingUp(wait) => {
                    tracing::info!(model = %model, wait_secs = wait.as_secs_f64(), "Model loading, waiting before retry");
                    tokio::time::sleep(wait).await;

                    // Only an image ends the loop after a warm-up retry.
                    match self.attempt(&url, model, &prompt, token).await {
                        ImageAttempt::Image(bytes) => return generated(bytes, prompt, model),
                        other => {
                            tracing::warn!(model = %model, outcome = other.outcome(), "Retry after warm-up failed, trying next");
                        }
                    }
                }
                ImageAttempt::NotImage(preview) => {
                    tracing::warn!(model = %model, preview = %preview, "Non-image response, trying next");
                }
                ImageAttempt::Failed(reason) => {
                    tracing::warn!(model = %model, reason = %reason, "Logo attempt failed, trying next");
                }
            }
        }

        tracing::error!("All logo models failed");
        LogoResult::failed(EXHAUSTED_MESSAGE)
    }

    async fn attempt(
        &self,
        url: &str,
        model: &str,
        prompt: &str,
        token: &Secret<String>,
    ) -> ImageAttempt {
        let started = Instant::now();
        let attempt = self.send(url, prompt, token).await;

        tracing::debug!(model = %model, outcome = attempt.outcome(), "Logo attempt finished");
        record_logo_attempt(model, attempt.outcome());
        record_upstream_call("huggingface", attempt.outcome(), started.elapsed());
        attempt
    }

    async fn send(&self, url: &str, prompt: &str, token: &Secret<String>) -> ImageAttempt {
        let response = match self
            .client
            .post(url)
            .bearer_auth(token.expose_secret())
            .json(&serde_json::json!({ "inputs": prompt }))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return ImageAttempt::Failed(ProviderError::from(e).to_string()),
        };

        let status = response.status();
        let is_image_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.contains("image"))
            .unwrap_or(false);

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => return ImageAttempt::Failed(ProviderError::from(e).to_string()),
        };

        match status {
            StatusCode::UNAUTHORIZED => ImageAttempt::Unauthorized,
            StatusCode::SERVICE_UNAVAILABLE => ImageAttempt::WarmingUp(self.warmup_wait(&body)),
            s if s.is_success() => {
                if is_image_type || body.len() > MIN_IMAGE_BYTES {
                    ImageAttempt::Image(body.to_vec())
                } else {
                    ImageAttempt::NotImage(preview(&body))
                }
            }
            s => ImageAttempt::Failed(format!("HTTP {}: {}", s.as_u16(), preview(&body))),
        }
    }

    /// Suggested wait from a loading response, bounded by the configured maximum.
    fn warmup_wait(&self, body: &[u8]) -> Duration {
        let max_secs = self.max_warmup_wait.as_secs_f64();
        serde_json::from_slice::<LoadingBody>(body)
            .ok()
            .and_then(|loading| loading.estimated_time)
            .filter(|secs| secs.is_finite() && *secs >= 0.0)
            .map(|secs| Duration::from_secs_f64(secs.min(max_secs)))
            .unwrap_or(self.default_warmup_wait)
            .min(self.max_warmup_wait)
    }
}

fn generated(bytes: Vec<u8>, prompt: String, model: &str) -> LogoResult {
    tracing::info!(model = %model, bytes = bytes.len(), "Logo generated");
    LogoResult::generated(STANDARD.encode(bytes), prompt, model.to_string())
}

fn preview(body: &[u8]) -> String {
    let end = body.len().min(PREVIEW_BYTES);
    String::from_utf8_lossy(&body[..end]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MODELS: [&str; 3] = ["org/model-a", "org/model-b", "org/model-c"];

    fn config(server: &MockServer, token: Option<&str>) -> HuggingFaceConfig {
        HuggingFaceConfig {
            token: token.map(|t| Secret::new(t.to_string())),
            base_url: format!("{}/models", server.uri()),
            models: MODELS.iter().map(|m| m.to_string()).collect(),
            request_timeout: Duration::from_millis(300),
            default_warmup_wait: Duration::from_millis(10),
            max_warmup_wait: Duration::from_millis(50),
        }
    }

    fn generator(server: &MockServer) -> LogoGenerator {
        LogoGenerator::new(&config(server, Some("hf_test"))).unwrap()
    }

    fn model_path(index: usize) -> String {
        format!("/models/{}", MODELS[index])
    }

    fn png() -> ResponseTemplate {
        ResponseTemplate::new(200)
            .insert_header("content-type", "image/png")
            .set_body_bytes(vec![0x89, b'P', b'N', b'G'])
    }

    #[test]
    fn unknown_style_uses_modern() {
        assert_eq!(style_description("grunge"), style_description("modern"));
        assert_eq!(
            style_description(" Luxury "),
            "luxury premium logo, elegant serif, gold accents, sophisticated"
        );
    }

    #[test]
    fn prompt_names_brand_industry_and_color() {
        let prompt = build_prompt("Brewly", "minimalist", "teal", "coffee");
        assert_eq!(
            prompt,
            "minimalist flat vector logo, clean lines, simple geometric shapes for 'Brewly' brand \
             in coffee industry, teal color scheme, white background, professional, high quality, \
             vector art style, centered composition"
        );
    }

    #[tokio::test]
    async fn missing_token_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(png())
            .expect(0)
            .mount(&server)
            .await;

        let generator = LogoGenerator::new(&config(&server, None)).unwrap();
        let result = generator
            .generate_logo("Brewly", "modern", "blue", "coffee")
            .await;

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some(MISSING_TOKEN_MESSAGE));
    }

    #[tokio::test]
    async fn first_model_image_is_returned() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(model_path(0)))
            .and(header("authorization", "Bearer hf_test"))
            .and(body_partial_json(serde_json::json!({
                "inputs": build_prompt("Brewly", "modern", "blue", "coffee")
            })))
            .respond_with(png())
            .expect(1)
            .mount(&server)
            .await;

        let result = generator(&server)
            .generate_logo("Brewly", "modern", "blue", "coffee")
            .await;

        assert!(result.success);
        assert_eq!(result.model.as_deref(), Some(MODELS[0]));
        assert_eq!(result.image_base64.as_deref(), Some("iVBORw=="));
        assert_eq!(
            result.prompt_used,
            Some(build_prompt("Brewly", "modern", "blue", "coffee"))
        );
    }

    #[tokio::test]
    async fn timeout_then_warmup_retry_succeeds_without_third_model() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(model_path(0)))
            .respond_with(png().set_delay(Duration::from_secs(2)))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path(model_path(1)))
            .respond_with(
                ResponseTemplate::new(503)
                    .set_body_json(serde_json::json!({ "estimated_time": 0.01 })),
            )
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path(model_path(1)))
            .respond_with(png())
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path(model_path(2)))
            .respond_with(ResponseTemplate::new(401))
            .expect(0)
            .mount(&server)
            .await;

        let result = generator(&server)
            .generate_logo("Brewly", "tech", "black", "software")
            .await;

        assert!(result.success);
        assert_eq!(result.model.as_deref(), Some(MODELS[1]));
    }

    #[tokio::test]
    async fn unauthorized_stops_before_next_model() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(model_path(0)))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid credentials"))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path(model_path(1)))
            .respond_with(png())
            .expect(0)
            .mount(&server)
            .await;

        let result = generator(&server)
            .generate_logo("Brewly", "modern", "blue", "coffee")
            .await;

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some(INVALID_TOKEN_MESSAGE));
    }

    #[tokio::test]
    async fn small_non_image_body_moves_on() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(model_path(0)))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "error": "nsfw" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        // No image content type, but large enough to count as one.
        Mock::given(method("POST"))
            .and(path(model_path(1)))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/octet-stream")
                    .set_body_bytes(vec![7u8; 1500]),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result = generator(&server)
            .generate_logo("Brewly", "modern", "blue", "coffee")
            .await;

        assert!(result.success);
        assert_eq!(result.model.as_deref(), Some(MODELS[1]));
    }

    #[tokio::test]
    async fn exhausted_models_report_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(3)
            .mount(&server)
            .await;

        let result = generator(&server)
            .generate_logo("Brewly", "modern", "blue", "coffee")
            .await;

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some(EXHAUSTED_MESSAGE));
    }

    #[tokio::test]
    async fn loading_model_is_retried_exactly_once() {
        let server = MockServer::start().await;

        // Loading body without an estimate uses the default wait.
        Mock::given(method("POST"))
            .and(path(model_path(0)))
            .respond_with(ResponseTemplate::new(503).set_body_string("loading"))
            .expect(2)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path(model_path(1)))
            .respond_with(png())
            .expect(1)
            .mount(&server)
            .await;

        let result = generator(&server)
            .generate_logo("Brewly", "modern", "blue", "coffee")
            .await;

        assert!(result.success);
        assert_eq!(result.model.as_deref(), Some(MODELS[1]));
    }

    #[test]
    fn warmup_wait_is_capped() {
        let config = HuggingFaceConfig {
            token: None,
            base_url: "http://localhost".to_string(),
            models: Vec::new(),
            request_timeout: Duration::from_secs(90),
            default_warmup_wait: Duration::from_secs(20),
            max_warmup_wait: Duration::from_secs(30),
        };
        let generator = LogoGenerator::new(&config).unwrap();

        assert_eq!(
            generator.warmup_wait(br#"{"estimated_time": 120.5}"#),
            Duration::from_secs(30)
        );
        assert_eq!(
            generator.warmup_wait(br#"{"estimated_time": 4.0}"#),
            Duration::from_secs(4)
        );
        assert_eq!(generator.warmup_wait(b"not json"), Duration::from_secs(20));
        assert_eq!(
            generator.warmup_wait(br#"{"estimated_time": 1e20}"#),
            Duration::from_secs(30)
        );
    }

    #[tokio::test]
    async fn huge_estimate_waits_the_cap_and_reports_a_result() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(503)
                    .set_body_json(serde_json::json!({ "estimated_time": 1e20 })),
            )
            .expect(6)
            .mount(&server)
            .await;

        let result = generator(&server)
            .generate_logo("Brewly", "modern", "blue", "coffee")
            .await;

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some(EXHAUSTED_MESSAGE));
    }

    #[tokio::test]
    async fn unauthorized_retry_moves_to_next_model() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(model_path(0)))
            .respond_with(
                ResponseTemplate::new(503).set_body_json(serde_json::json!({ "estimated_time": 0 })),
            )
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path(model_path(0)))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path(model_path(1)))
            .respond_with(png())
            .expect(1)
            .mount(&server)
            .await;

        let result = generator(&server)
            .generate_logo("Brewly", "modern", "blue", "coffee")
            .await;

        assert!(result.success);
        assert_eq!(result.model.as_deref(), Some(MODELS[1]));
    }
}
