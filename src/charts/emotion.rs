//! @ai:module:intent Ordinal emotion scores for the trajectory timeline
//! @ai:module:layer domain
//! @ai:module:public_api Emotion, EmotionSample, emotion_score, emotion_series, axis_label
//! @ai:module:stateless true

use crate::model::EmotionPoint;
use serde::Serialize;

/// Score used for any label outside the table.
pub const NEUTRAL_SCORE: u8 = 3;

/// @ai:intent Closed set of emotion labels understood by the timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emotion {
    Hopeful,
    Curiosity,
    Trust,
    Positive,
    Confident,
    Neutral,
    Cautious,
    Skepticism,
    Anxiety,
    Frustrated,
    Negative,
    Resigned,
    Angry,
}

impl Emotion {
    /// @ai:intent Parse a label case-insensitively
    /// @ai:effects pure
    pub fn from_label(label: &str) -> Option<Self> {
        let emotion = match label.trim().to_lowercase().as_str() {
            "hopeful" => Emotion::Hopeful,
            "curiosity" => Emotion::Curiosity,
            "trust" => Emotion::Trust,
            "positive" => Emotion::Positive,
            "confident" => Emotion::Confident,
            "neutral" => Emotion::Neutral,
            "cautious" => Emotion::Cautious,
            "skepticism" => Emotion::Skepticism,
            "anxiety" => Emotion::Anxiety,
            "frustrated" => Emotion::Frustrated,
            "negative" => Emotion::Negative,
            "resigned" => Emotion::Resigned,
            "angry" => Emotion::Angry,
            _ => return None,
        };
        Some(emotion)
    }

    /// @ai:intent Ordinal tone, 1 (negative) to 5 (positive)
    /// @ai:effects pure
    pub fn score(self) -> u8 {
        match self {
            Emotion::Hopeful | Emotion::Curiosity => 5,
            Emotion::Trust | Emotion::Positive | Emotion::Confident => 4,
            Emotion::Neutral | Emotion::Cautious | Emotion::Skepticism => 3,
            Emotion::Anxiety | Emotion::Frustrated | Emotion::Negative => 2,
            Emotion::Resigned | Emotion::Angry => 1,
        }
    }
}

/// @ai:intent Score for a raw label, neutral when unrecognized
/// @ai:effects pure
pub fn emotion_score(label: &str) -> u8 {
    Emotion::from_label(label)
        .map(Emotion::score)
        .unwrap_or(NEUTRAL_SCORE)
}

/// @ai:intent Timeline point: the source fields plus the plotted value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionSample {
    pub segment: u32,
    pub emotion: String,
    pub quote: String,
    pub value: u8,
}

impl EmotionSample {
    /// @ai:intent Tooltip heading for this point
    /// @ai:effects pure
    pub fn tooltip(&self) -> String {
        format!("Phase {}: {}", self.segment, self.emotion)
    }
}

/// @ai:intent Attach an ordinal value to every emotion point, in order
/// @ai:effects pure
pub fn emotion_series(points: &[EmotionPoint]) -> Vec<EmotionSample> {
    points
        .iter()
        .map(|p| EmotionSample {
            segment: p.segment,
            emotion: p.emotion.clone(),
            quote: p.quote.clone(),
            value: emotion_score(&p.emotion),
        })
        .collect()
}

/// @ai:intent Y-axis tick label; only the extremes and the midpoint are named
/// @ai:effects pure
pub fn axis_label(value: i64) -> &'static str {
    match value {
        1 => "Negative",
        3 => "Neutral",
        5 => "Positive",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_case_insensitively() {
        let table = [
            ("hopeful", 5),
            ("Curiosity", 5),
            ("TRUST", 4),
            ("positive", 4),
            ("Confident", 4),
            ("neutral", 3),
            ("Cautious", 3),
            ("skepticism", 3),
            ("Anxiety", 2),
            ("frustrated", 2),
            ("Negative", 2),
            ("resigned", 1),
            ("ANGRY", 1),
        ];
        for (label, expected) in table {
            assert_eq!(emotion_score(label), expected, "label {label}");
        }
    }

    #[test]
    fn test_unlisted_label_defaults_to_neutral() {
        assert_eq!(emotion_score("ecstatic"), 3);
        assert_eq!(emotion_score(""), 3);
        assert_eq!(emotion_score("Joy"), 3);
    }

    #[test]
    fn test_series_keeps_order_and_source_fields() {
        let points = vec![
            EmotionPoint {
                segment: 1,
                emotion: "Angry".to_string(),
                quote: "no".to_string(),
            },
            EmotionPoint {
                segment: 2,
                emotion: "Hopeful".to_string(),
                quote: "yes".to_string(),
            },
        ];
        let series = emotion_series(&points);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].value, 1);
        assert_eq!(series[1].value, 5);
        assert_eq!(series[1].quote, "yes");
        assert_eq!(series[0].tooltip(), "Phase 1: Angry");
    }

    #[test]
    fn test_axis_labels() {
        assert_eq!(axis_label(1), "Negative");
        assert_eq!(axis_label(2), "");
        assert_eq!(axis_label(3), "Neutral");
        assert_eq!(axis_label(4), "");
        assert_eq!(axis_label(5), "Positive");
    }
}
