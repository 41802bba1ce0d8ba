//! @ai:module:intent In-memory representation of a generated analysis report
//! @ai:module:layer domain
//! @ai:module:public_api AnalysisReport, Section, Commentary, ExecutiveSummary, EmotionPoint, Archetype, InsightTheme, InsightGraph, Contradiction, ActionableRecommendation, ParticipantPersona, AgenticAnalysis, Sentiment
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// @ai:intent Root entity produced once per successful generation call
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub executive_summary: ExecutiveSummary,
    pub narrative_summary: String,
    pub agentic_analysis: AgenticAnalysis,
    pub emotion_trajectory: Section<Vec<EmotionPoint>>,
    pub archetype_mapping: Section<Vec<Archetype>>,
    pub top_themes: Section<Vec<InsightTheme>>,
    pub insight_graph: Section<InsightGraph>,
    pub contradiction_finder: Section<Vec<Contradiction>>,
    pub actionable_recommendations: Section<Vec<ActionableRecommendation>>,
    pub participant_personas: Section<Vec<ParticipantPersona>>,
}

/// @ai:intent Analytical section: raw data plus executive commentary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section<T> {
    pub data: T,
    pub commentary: Commentary,
}

/// @ai:intent Objective, key insights and (for charts) a reading guide
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commentary {
    pub objective: String,
    pub key_insights: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub how_to_read: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutiveSummary {
    pub summary: String,
    pub swot: SwotAnalysis,
    pub strategic_recommendations: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwotAnalysis {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub opportunities: Vec<String>,
    pub threats: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgenticAnalysis {
    pub summary: String,
    #[serde(default)]
    pub stuck_moments: Vec<StuckMoment>,
    #[serde(default)]
    pub cognitive_biases: Vec<CognitiveBias>,
    #[serde(default)]
    pub key_metaphors: Vec<KeyMetaphor>,
    pub commentary: Commentary,
}

/// A point where moderator probing failed, with the follow-up that was missed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StuckMoment {
    #[serde(default)]
    pub quote: String,
    #[serde(default)]
    pub suggestion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CognitiveBias {
    #[serde(default)]
    pub bias: String,
    #[serde(default)]
    pub quote: String,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyMetaphor {
    #[serde(default)]
    pub metaphor: String,
    #[serde(default)]
    pub quote: String,
    #[serde(default)]
    pub meaning: String,
}

/// @ai:intent One phase of the group's emotional journey
/// @ai:invariant segment >= 1, strictly increasing across a normalized sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionPoint {
    pub segment: u32,
    /// Kept verbatim; mapped to an ordinal score by `charts::emotion`.
    pub emotion: String,
    pub quote: String,
}

/// @ai:intent Behavioral cluster with its share of the group
/// @ai:invariant percentage in [0, 100]; shares across a report are not forced to sum to 100
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Archetype {
    pub name: String,
    pub percentage: f64,
    pub description: String,
    pub quotes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightTheme {
    pub theme: String,
    pub supporting_quotes: Vec<String>,
    pub sentiment: Sentiment,
}

/// @ai:intent Closed sentiment set; unknown labels fall back to Neutral
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Mixed,
    #[serde(other)]
    Neutral,
}

impl Sentiment {
    /// @ai:intent Display label
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
            Sentiment::Mixed => "Mixed",
        }
    }
}

/// @ai:intent Small directed graph of themes and labeled links
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightGraph {
    pub themes: Vec<String>,
    pub connections: Vec<InsightConnection>,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightConnection {
    pub from: String,
    pub to: String,
    pub relationship: String,
}

/// @ai:intent Two statements in tension about one topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contradiction {
    pub topic: String,
    pub contradictory_quotes: [String; 2],
    pub analysis: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionableRecommendation {
    pub area: String,
    pub recommendation: String,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantPersona {
    pub persona_name: String,
    pub description: String,
    pub key_characteristics: Vec<String>,
    pub representative_quotes: Vec<String>,
}

impl AnalysisReport {
    /// @ai:intent Repair ordering invariants once, before the report is exposed
    /// @ai:post emotion segments strictly increasing; graph themes distinct
    /// @ai:effects pure
    pub fn normalized(mut self) -> Self {
        let points = &mut self.emotion_trajectory.data;
        let before = points.len();
        points.sort_by_key(|p| p.segment);
        points.dedup_by_key(|p| p.segment);
        if points.len() != before {
            tracing::warn!(
                "Dropped {} emotion points with duplicate segments",
                before - points.len()
            );
        }

        let themes = &mut self.insight_graph.data.themes;
        let before = themes.len();
        let mut seen = HashSet::new();
        themes.retain(|theme| seen.insert(theme.clone()));
        if themes.len() != before {
            tracing::warn!(
                "Dropped {} duplicate insight graph themes",
                before - themes.len()
            );
        }

        self
    }

    /// @ai:intent Sum of archetype shares as given by the model
    /// @ai:effects pure
    pub fn archetype_total(&self) -> f64 {
        self.archetype_mapping.data.iter().map(|a| a.percentage).sum()
    }
}

/// Sample report bundled for dry runs and tests.
pub const SAMPLE_REPORT_JSON: &str = include_str!("../assets/sample_report.json");

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AnalysisReport {
        serde_json::from_str(SAMPLE_REPORT_JSON).unwrap()
    }

    #[test]
    fn test_sample_report_parses() {
        let report = sample();
        assert_eq!(report.contradiction_finder.data[0].contradictory_quotes.len(), 2);
        assert!(report.emotion_trajectory.commentary.how_to_read.is_some());
        assert!(report.top_themes.commentary.how_to_read.is_none());
    }

    #[test]
    fn test_unknown_sentiment_falls_back_to_neutral() {
        let theme: InsightTheme = serde_json::from_str(
            r#"{"theme": "Price", "supportingQuotes": [], "sentiment": "Ambivalent"}"#,
        )
        .unwrap();
        assert_eq!(theme.sentiment, Sentiment::Neutral);

        let mixed: InsightTheme = serde_json::from_str(
            r#"{"theme": "Price", "supportingQuotes": [], "sentiment": "Mixed"}"#,
        )
        .unwrap();
        assert_eq!(mixed.sentiment, Sentiment::Mixed);
        assert_eq!(serde_json::to_string(&Sentiment::Neutral).unwrap(), "\"Neutral\"");
    }

    #[test]
    fn test_contradiction_requires_two_quotes() {
        let three = r#"{"topic": "t", "contradictoryQuotes": ["a", "b", "c"], "analysis": "x"}"#;
        assert!(serde_json::from_str::<Contradiction>(three).is_err());
    }

    #[test]
    fn test_normalized_orders_and_dedups_segments() {
        let mut report = sample();
        report.emotion_trajectory.data = vec![
            EmotionPoint { segment: 3, emotion: "Trust".into(), quote: "c".into() },
            EmotionPoint { segment: 1, emotion: "Curiosity".into(), quote: "a".into() },
            EmotionPoint { segment: 3, emotion: "Angry".into(), quote: "dup".into() },
            EmotionPoint { segment: 2, emotion: "Cautious".into(), quote: "b".into() },
        ];
        report.insight_graph.data.themes = vec!["A".into(), "B".into(), "A".into()];

        let report = report.normalized();
        let segments: Vec<u32> = report.emotion_trajectory.data.iter().map(|p| p.segment).collect();
        assert_eq!(segments, vec![1, 2, 3]);
        assert_eq!(report.emotion_trajectory.data[2].quote, "c");
        assert_eq!(report.insight_graph.data.themes, vec!["A", "B"]);
    }

    #[test]
    fn test_serialization_omits_absent_how_to_read() {
        let commentary = Commentary {
            objective: "o".into(),
            key_insights: "k".into(),
            how_to_read: None,
        };
        let json = serde_json::to_value(&commentary).unwrap();
        assert!(json.get("howToRead").is_none());
        assert_eq!(json["keyInsights"], "k");
    }
}
