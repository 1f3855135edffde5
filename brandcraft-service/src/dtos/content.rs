use serde::{Deserialize, Serialize};

/// Kind of marketing copy to write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    #[default]
    Tagline,
    Bio,
    AdCopy,
    Email,
    Social,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Tagline => "tagline",
            ContentType::Bio => "bio",
            ContentType::AdCopy => "ad_copy",
            ContentType::Email => "email",
            ContentType::Social => "social",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentRequest {
    pub brand_name: String,
    pub niche: String,
    #[serde(default)]
    pub content_type: ContentType,
    #[serde(default = "super::default_tone")]
    pub tone: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentResponse {
    pub content_type: ContentType,
    pub data: ContentResult,
}

/// Generated copy, shaped by the requested [`ContentType`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContentResult {
    Taglines(TaglineSet),
    Bios(BioSet),
    Ads(AdSet),
    Email(WelcomeEmail),
    Social(SocialPostSet),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaglineSet {
    pub taglines: Vec<Tagline>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tagline {
    pub text: String,
    pub use_case: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BioSet {
    pub bios: Bios,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bios {
    pub short: String,
    pub medium: String,
    pub long: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdSet {
    pub ads: Vec<Ad>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ad {
    pub platform: String,
    pub headline: String,
    pub body: String,
    pub cta: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WelcomeEmail {
    pub subject: String,
    pub preview: String,
    pub body: String,
    pub sign_off: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialPostSet {
    pub posts: Vec<SocialPost>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialPost {
    pub platform: String,
    pub content: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
}
