use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct LogoRequest {
    pub brand_name: String,
    #[serde(default = "default_style")]
    pub style: String,
    #[serde(default = "default_primary_color")]
    pub primary_color: String,
    #[serde(default = "default_industry")]
    pub industry: String,
}

fn default_style() -> String {
    "modern".to_string()
}

fn default_primary_color() -> String {
    "blue".to_string()
}

fn default_industry() -> String {
    "technology".to_string()
}

/// Outcome of a logo request. Failures are reported here rather than through
/// the HTTP status, so callers must check `success`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogoResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_used: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LogoResult {
    pub fn generated(image_base64: String, prompt_used: String, model: String) -> Self {
        Self {
            success: true,
            image_base64: Some(image_base64),
            prompt_used: Some(prompt_used),
            model: Some(model),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            image_base64: None,
            prompt_used: None,
            model: None,
            error: Some(error.into()),
        }
    }
}
