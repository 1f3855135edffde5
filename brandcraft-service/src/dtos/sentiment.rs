use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SentimentRequest {
    #[validate(length(min = 10, message = "Text must be at least 10 characters"))]
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    #[serde(other)]
    Neutral,
}

impl SentimentLabel {
    /// Parse a provider label; anything unrecognized reads as neutral.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "positive" => SentimentLabel::Positive,
            "negative" => SentimentLabel::Negative,
            _ => SentimentLabel::Neutral,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    pub label: SentimentLabel,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub success: bool,
    pub sentiment: SentimentScore,
    pub emotions: BTreeMap<String, f64>,
    pub dominant_emotion: String,
    pub keywords: Vec<String>,
    pub brand_insights: Vec<String>,
    /// True when the local keyword heuristic produced this result.
    pub fallback: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_parse_case_insensitively() {
        assert_eq!(SentimentLabel::from_label("Positive"), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_label("negative"), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_label("mixed"), SentimentLabel::Neutral);
    }

    #[test]
    fn short_text_fails_validation() {
        let request = SentimentRequest {
            text: "too short".to_string(),
        };
        assert!(request.validate().is_err());

        let request = SentimentRequest {
            text: "long enough".to_string(),
        };
        assert!(request.validate().is_ok());
    }
}
