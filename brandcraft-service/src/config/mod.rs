use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_OPENROUTER_MODEL: &str = "arcee-ai/trinity-large-preview:free";
const DEFAULT_HF_BASE_URL: &str = "https://router.huggingface.co/hf-inference/models";
const DEFAULT_HF_MODELS: &str = "black-forest-labs/FLUX.1-schnell,\
stabilityai/stable-diffusion-xl-base-1.0,\
runwayml/stable-diffusion-v1-5";
const DEFAULT_NLU_VERSION: &str = "2022-04-07";

#[derive(Debug, Clone)]
pub struct BrandcraftConfig {
    pub common: core_config::Config,
    pub service_name: String,
    /// Path prefix for every API route, e.g. `/api`.
    pub api_prefix: String,
    pub allowed_origins: Vec<String>,
    pub otlp_endpoint: Option<String>,
    pub openrouter: OpenRouterConfig,
    pub huggingface: HuggingFaceConfig,
    pub watson: WatsonConfig,
}

/// Chat-completion backend used for names, copy and the assistant.
#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    pub api_key: Option<Secret<String>>,
    pub base_url: String,
    pub model: String,
    pub referer: String,
    pub app_title: String,
    pub timeout: Duration,
}

/// Image inference backend used for logos.
#[derive(Debug, Clone)]
pub struct HuggingFaceConfig {
    pub token: Option<Secret<String>>,
    pub base_url: String,
    /// Models tried in order until one returns an image.
    pub models: Vec<String>,
    pub request_timeout: Duration,
    /// Wait used when a loading model does not say how long it needs.
    pub default_warmup_wait: Duration,
    /// Upper bound on any warm-up wait.
    pub max_warmup_wait: Duration,
}

/// Watson Natural Language Understanding backend used for sentiment.
#[derive(Debug, Clone)]
pub struct WatsonConfig {
    pub api_key: Option<Secret<String>>,
    pub url: Option<String>,
    pub version: String,
    pub timeout: Duration,
}

impl BrandcraftConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        Ok(BrandcraftConfig {
            common,
            service_name: "brandcraft-service".to_string(),
            api_prefix: normalize_prefix(&get_env("API_PREFIX", "/api")),
            allowed_origins: split_list(&get_env("CORS_ALLOWED_ORIGINS", "*")),
            otlp_endpoint: get_optional("OTLP_ENDPOINT"),
            openrouter: OpenRouterConfig {
                api_key: get_secret("OPENROUTER_API_KEY"),
                base_url: get_env("OPENROUTER_BASE_URL", DEFAULT_OPENROUTER_BASE_URL),
                model: get_env("OPENROUTER_MODEL", DEFAULT_OPENROUTER_MODEL),
                referer: get_env("OPENROUTER_REFERER", "http://localhost:8000"),
                app_title: "BrandCraft".to_string(),
                timeout: Duration::from_secs(60),
            },
            huggingface: HuggingFaceConfig {
                token: get_secret("HF_TOKEN"),
                base_url: get_env("HF_BASE_URL", DEFAULT_HF_BASE_URL),
                models: split_list(&get_env("HF_MODELS", DEFAULT_HF_MODELS)),
                request_timeout: Duration::from_secs(90),
                default_warmup_wait: Duration::from_secs(20),
                max_warmup_wait: Duration::from_secs(30),
            },
            watson: WatsonConfig {
                api_key: get_secret("IBM_API_KEY"),
                url: get_optional("IBM_URL"),
                version: get_env("IBM_NLU_VERSION", DEFAULT_NLU_VERSION),
                timeout: Duration::from_secs(30),
            },
        })
    }
}

fn get_env(key: &str, default: &str) -> String {
    get_optional(key).unwrap_or_else(|| default.to_string())
}

fn get_optional(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Credentials are often pasted into `.env` with stray quotes; strip them.
fn get_secret(key: &str) -> Option<Secret<String>> {
    env::var(key)
        .ok()
        .map(|raw| clean_credential(&raw))
        .filter(|v| !v.is_empty())
        .map(Secret::new)
}

fn clean_credential(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c| c == '\'' || c == '"')
        .trim()
        .to_string()
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
