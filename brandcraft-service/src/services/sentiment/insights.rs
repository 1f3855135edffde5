//! Branding advice derived from an NLU analysis.

use crate::dtos::SentimentLabel;
use crate::services::providers::EmotionScores;

/// Highest scoring emotion; earlier emotions win ties. "neutral" without data.
pub fn dominant_emotion(emotions: Option<&EmotionScores>) -> &'static str {
    let Some(emotions) = emotions else {
        return "neutral";
    };

    let mut entries = emotions.entries().into_iter();
    let Some(first) = entries.next() else {
        return "neutral";
    };

    entries
        .fold(first, |best, entry| if entry.1 > best.1 { entry } else { best })
        .0
}

pub fn brand_insights(
    label: SentimentLabel,
    score: f64,
    emotions: Option<&EmotionScores>,
    dominant: &str,
) -> Vec<String> {
    let mut insights = Vec::new();

    let tone = match label {
        SentimentLabel::Positive if score > 0.5 => {
            "✅ Your brand messaging is strongly positive, which builds customer trust."
        }
        SentimentLabel::Positive => {
            "👍 Your messaging leans positive. Consider amplifying emotional language."
        }
        SentimentLabel::Negative => {
            "⚠️ Your brand text reads as negative. Try reframing with benefits instead of problems."
        }
        SentimentLabel::Neutral => {
            "💡 Neutral tone detected. Add more passion and personality to stand out."
        }
    };
    insights.push(tone.to_string());

    if let Some(emotions) = emotions {
        if emotions.joy > 0.5 {
            insights.push("😊 High joy score: great for consumer and lifestyle brands.".to_string());
        }
        if emotions.fear > 0.3 {
            insights.push(
                "😰 Fear detected. Reduce urgency and scarcity language for a friendlier feel."
                    .to_string(),
            );
        }
        // "trust" is not in the current emotion set.
        if dominant == "trust" {
            insights.push(
                "🤝 Trust-forward tone: ideal for financial, health, or professional services."
                    .to_string(),
            );
        }
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(sadness: f64, joy: f64, fear: f64, disgust: f64, anger: f64) -> EmotionScores {
        EmotionScores {
            sadness,
            joy,
            fear,
            disgust,
            anger,
        }
    }

    #[test]
    fn dominant_is_the_maximum() {
        let emotions = scores(0.1, 0.2, 0.7, 0.05, 0.3);
        assert_eq!(dominant_emotion(Some(&emotions)), "fear");
    }

    #[test]
    fn ties_go_to_the_earlier_emotion() {
        let emotions = scores(0.1, 0.6, 0.6, 0.0, 0.6);
        assert_eq!(dominant_emotion(Some(&emotions)), "joy");

        let emotions = scores(0.0, 0.0, 0.0, 0.0, 0.0);
        assert_eq!(dominant_emotion(Some(&emotions)), "sadness");
    }

    #[test]
    fn no_emotions_is_neutral() {
        assert_eq!(dominant_emotion(None), "neutral");
    }

    #[test]
    fn strong_positive_with_joy_and_fear() {
        let emotions = scores(0.0, 0.8, 0.4, 0.0, 0.0);
        let insights = brand_insights(SentimentLabel::Positive, 0.9, Some(&emotions), "joy");

        assert_eq!(insights.len(), 3);
        assert!(insights[0].contains("strongly positive"));
        assert!(insights[1].contains("High joy"));
        assert!(insights[2].contains("Fear detected"));
    }

    #[test]
    fn tone_insight_by_label() {
        let mild = brand_insights(SentimentLabel::Positive, 0.3, None, "neutral");
        assert_eq!(mild.len(), 1);
        assert!(mild[0].contains("leans positive"));

        let negative = brand_insights(SentimentLabel::Negative, -0.8, None, "neutral");
        assert!(negative[0].contains("reads as negative"));

        let neutral = brand_insights(SentimentLabel::Neutral, 0.0, None, "neutral");
        assert!(neutral[0].contains("Neutral tone"));
    }

    #[test]
    fn trust_insight_only_with_emotion_data() {
        let emotions = EmotionScores::default();
        let with_data = brand_insights(SentimentLabel::Neutral, 0.0, Some(&emotions), "trust");
        assert!(with_data.iter().any(|i| i.contains("Trust-forward")));

        let without = brand_insights(SentimentLabel::Neutral, 0.0, None, "trust");
        assert_eq!(without.len(), 1);
    }
}
