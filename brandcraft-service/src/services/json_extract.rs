//! Pull a JSON document out of model output that may be wrapped in a
//! markdown code fence.

use super::providers::ProviderError;
use serde::de::DeserializeOwned;

const FENCE: &str = "```";

/// Strip an optional ```` ```json ```` fence and return the enclosed text, trimmed.
pub fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix(FENCE) else {
        return text;
    };

    let inner = rest.split(FENCE).next().unwrap_or(rest);
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.trim()
}

/// Parse model output into `T`, tolerating a surrounding code fence.
///
/// Anything that is not valid JSON of the expected shape is a
/// [`ProviderError::Parse`]; nothing is substituted.
pub fn extract_json<T: DeserializeOwned>(text: &str) -> Result<T, ProviderError> {
    let body = strip_code_fence(text);
    serde_json::from_str(body).map_err(|e| {
        ProviderError::Parse(format!("model response is not the expected JSON: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn fenced_json_matches_inner_parse() {
        let inner = r#"{"names": [{"name": "Brewly", "tagline": "Sip smarter"}]}"#;
        let fenced = format!("```json\n{}\n```", inner);

        let from_fence: Value = extract_json(&fenced).unwrap();
        let direct: Value = serde_json::from_str(inner).unwrap();
        assert_eq!(from_fence, direct);
    }

    #[test]
    fn fence_without_language_tag() {
        let value: Value = extract_json("```\n{\"a\": 1}\n```").unwrap();
        assert_eq!(value, json!({ "a": 1 }));
    }

    #[test]
    fn unfenced_json_is_parsed_as_is() {
        let value: Value = extract_json("  {\"subject\": \"Hi\"}\n").unwrap();
        assert_eq!(value, json!({ "subject": "Hi" }));
    }

    #[test]
    fn prose_is_a_parse_error() {
        let err = extract_json::<Value>("Sure! Here are some names: Brewly, Beanery").unwrap_err();
        assert!(matches!(err, ProviderError::Parse(_)));
    }

    #[test]
    fn fenced_prose_is_a_parse_error() {
        let err = extract_json::<Value>("```json\nnot json at all\n```").unwrap_err();
        assert!(matches!(err, ProviderError::Parse(_)));
    }

    #[test]
    fn wrong_shape_is_a_parse_error() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Expected {
            names: Vec<String>,
        }

        let err = extract_json::<Expected>("{\"taglines\": []}").unwrap_err();
        assert!(matches!(err, ProviderError::Parse(_)));
    }
}
