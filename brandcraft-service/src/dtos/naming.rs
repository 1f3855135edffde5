use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct NamingRequest {
    pub niche: String,
    #[serde(default = "super::default_tone")]
    pub tone: String,
    #[serde(default = "default_audience")]
    pub audience: String,
}

fn default_audience() -> String {
    "general consumers".to_string()
}

/// Brand name suggestions; six are requested but the count is not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamingResult {
    pub names: Vec<BrandNameIdea>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandNameIdea {
    pub name: String,
    pub tagline: String,
    /// Why the name works.
    pub meaning: String,
    /// Personality descriptor such as "Bold" or "Playful".
    pub style: String,
}
