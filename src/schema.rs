//! @ai:module:intent Declarative report schema shipped with every generation request
//! @ai:module:layer domain
//! @ai:module:public_api ReportSchema, SchemaError, EMOTION_LABELS, SENTIMENT_LABELS
//! @ai:module:stateless true
//!
//! The schema is written once, in JSON Schema vocabulary. The wire projection
//! upper-cases type names for the generation service; the validation
//! projection drops the closed `enum` sets so unknown labels degrade to
//! neutral defaults instead of rejecting the whole report.

use serde_json::{json, Map, Value};
use thiserror::Error;

/// Emotion labels the model is asked to choose from.
pub const EMOTION_LABELS: [&str; 13] = [
    "Hopeful",
    "Curiosity",
    "Trust",
    "Positive",
    "Confident",
    "Neutral",
    "Cautious",
    "Skepticism",
    "Anxiety",
    "Frustrated",
    "Negative",
    "Resigned",
    "Angry",
];

pub const SENTIMENT_LABELS: [&str; 4] = ["Positive", "Negative", "Neutral", "Mixed"];

/// Top-level sections every response must carry.
pub const REQUIRED_SECTIONS: [&str; 10] = [
    "executiveSummary",
    "narrativeSummary",
    "agenticAnalysis",
    "emotionTrajectory",
    "archetypeMapping",
    "topThemes",
    "insightGraph",
    "contradictionFinder",
    "actionableRecommendations",
    "participantPersonas",
];

/// @ai:intent Schema compilation or validation failure
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Schema compilation error: {0}")]
    Compile(String),

    #[error("Validation failed: {errors:?}")]
    ValidationFailed { errors: Vec<String> },
}

/// @ai:intent Report schema document plus its compiled validator
pub struct ReportSchema {
    document: Value,
    validator: jsonschema::Validator,
}

impl ReportSchema {
    /// @ai:intent Build the schema and compile its validation projection
    /// @ai:effects pure
    pub fn new() -> Result<Self, SchemaError> {
        let document = report_schema_document();
        let validation = strip_enums(&document);
        let validator = jsonschema::validator_for(&validation)
            .map_err(|e| SchemaError::Compile(format!("{e}")))?;

        Ok(Self {
            document,
            validator,
        })
    }

    /// @ai:intent Canonical schema document (JSON Schema vocabulary)
    /// @ai:effects pure
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// @ai:intent Schema in the generation service's dialect, as sent on the wire
    /// @ai:effects pure
    pub fn wire(&self) -> Value {
        to_wire_dialect(&self.document)
    }

    /// @ai:intent Schema actually used for validation (closed sets removed)
    /// @ai:effects pure
    pub fn validation(&self) -> Value {
        strip_enums(&self.document)
    }

    /// @ai:intent Validate a parsed response against the structural contract
    /// @ai:effects pure
    pub fn validate(&self, instance: &Value) -> Result<(), SchemaError> {
        let errors: Vec<String> = self
            .validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }
}

/// @ai:intent Commentary shape; chart-backed sections also require a reading guide
/// @ai:effects pure
fn commentary_schema(chart: bool) -> Value {
    let mut properties = Map::new();
    properties.insert(
        "objective".to_string(),
        json!({
            "type": "string",
            "description": "One sentence explaining what this section achieves for a business leader."
        }),
    );
    if chart {
        properties.insert(
            "howToRead".to_string(),
            json!({
                "type": "string",
                "description": "A short, plain explanation of how to interpret the chart."
            }),
        );
    }
    properties.insert(
        "keyInsights".to_string(),
        json!({
            "type": "string",
            "description": "The most critical, actionable insights from this section's data, written for executives."
        }),
    );

    let required: Vec<&str> = if chart {
        vec!["objective", "howToRead", "keyInsights"]
    } else {
        vec!["objective", "keyInsights"]
    };

    json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

fn string_list(description: &str) -> Value {
    json!({ "type": "array", "items": { "type": "string" }, "description": description })
}

fn swot_list(description: &str) -> Value {
    json!({
        "type": "array",
        "items": { "type": "string" },
        "minItems": 1,
        "description": description
    })
}

fn section(data: Value, chart: bool) -> Value {
    json!({
        "type": "object",
        "properties": {
            "data": data,
            "commentary": commentary_schema(chart)
        },
        "required": ["data", "commentary"]
    })
}

/// @ai:intent Full structured-output contract for one analysis report
/// @ai:effects pure
fn report_schema_document() -> Value {
    let executive_summary = json!({
        "type": "object",
        "description": "High-level synthesis for C-suite readers.",
        "properties": {
            "summary": {
                "type": "string",
                "description": "Three to four sentences on the most critical findings and overall sentiment."
            },
            "swot": {
                "type": "object",
                "description": "SWOT analysis grounded in the transcript.",
                "properties": {
                    "strengths": swot_list("2-3 key strengths or positive sentiments."),
                    "weaknesses": swot_list("2-3 key weaknesses, risks or negative sentiments."),
                    "opportunities": swot_list("2-3 market or product opportunities raised by participants."),
                    "threats": swot_list("2-3 competitive or market threats highlighted.")
                },
                "required": ["strengths", "weaknesses", "opportunities", "threats"]
            },
            "strategicRecommendations": {
                "type": "string",
                "description": "One high-level strategic recommendation drawn from the whole analysis."
            }
        },
        "required": ["summary", "swot", "strategicRecommendations"]
    });

    let agentic_analysis = json!({
        "type": "object",
        "properties": {
            "summary": {
                "type": "string",
                "description": "Brief summary of the most impactful biases, metaphors and stuck moments."
            },
            "stuckMoments": {
                "type": "array",
                "description": "Moments where moderator probing failed.",
                "items": {
                    "type": "object",
                    "properties": {
                        "quote": { "type": "string" },
                        "suggestion": {
                            "type": "string",
                            "description": "A follow-up question the moderator could have asked."
                        }
                    }
                }
            },
            "cognitiveBiases": {
                "type": "array",
                "description": "Cognitive biases such as anchoring or social proof.",
                "items": {
                    "type": "object",
                    "properties": {
                        "bias": { "type": "string" },
                        "quote": { "type": "string" },
                        "explanation": { "type": "string" }
                    }
                }
            },
            "keyMetaphors": {
                "type": "array",
                "description": "Recurring symbols and metaphors.",
                "items": {
                    "type": "object",
                    "properties": {
                        "metaphor": { "type": "string" },
                        "quote": { "type": "string" },
                        "meaning": { "type": "string" }
                    }
                }
            },
            "commentary": commentary_schema(false)
        },
        "required": ["summary", "stuckMoments", "cognitiveBiases", "keyMetaphors", "commentary"]
    });

    let emotion_points = json!({
        "type": "array",
        "description": "The group's emotional journey through 5-7 sequential phases, each with a representative quote.",
        "items": {
            "type": "object",
            "properties": {
                "segment": {
                    "type": "integer",
                    "minimum": 1,
                    "description": "Sequential order of the phase (1, 2, 3...)."
                },
                "emotion": {
                    "type": "string",
                    "enum": EMOTION_LABELS,
                    "description": "The dominant emotion for this phase."
                },
                "quote": {
                    "type": "string",
                    "description": "A verbatim quote that best represents this emotion."
                }
            },
            "required": ["segment", "emotion", "quote"]
        }
    });

    let archetypes = json!({
        "type": "array",
        "description": "Participants mapped to archetypes. Percentages should sum to 100.",
        "items": {
            "type": "object",
            "properties": {
                "name": { "type": "string", "description": "Archetype name, e.g. Explorer, Caregiver, Skeptic." },
                "percentage": {
                    "type": "number",
                    "minimum": 0,
                    "maximum": 100,
                    "description": "Share of the group embodying this archetype."
                },
                "description": { "type": "string", "description": "The archetype in the context of this discussion." },
                "quotes": string_list("Key quotes that map to this archetype.")
            },
            "required": ["name", "percentage", "description", "quotes"]
        }
    });

    let themes = json!({
        "type": "array",
        "description": "The top 5 most salient themes discussed.",
        "items": {
            "type": "object",
            "properties": {
                "theme": { "type": "string" },
                "supportingQuotes": { "type": "array", "items": { "type": "string" } },
                "sentiment": { "type": "string", "enum": SENTIMENT_LABELS }
            },
            "required": ["theme", "supportingQuotes", "sentiment"]
        }
    });

    let graph = json!({
        "type": "object",
        "description": "A small knowledge graph linking themes, emotions and rationales.",
        "properties": {
            "themes": { "type": "array", "items": { "type": "string" } },
            "connections": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "from": { "type": "string" },
                        "to": { "type": "string" },
                        "relationship": {
                            "type": "string",
                            "description": "The link, e.g. 'leads to', 'causes', 'is associated with'."
                        }
                    },
                    "required": ["from", "to", "relationship"]
                }
            },
            "summary": { "type": "string", "description": "The causal or correlational paths discovered." }
        },
        "required": ["themes", "connections", "summary"]
    });

    let contradictions = json!({
        "type": "array",
        "description": "Key contradictions in participant statements.",
        "items": {
            "type": "object",
            "properties": {
                "topic": { "type": "string" },
                "contradictoryQuotes": {
                    "type": "array",
                    "items": { "type": "string" },
                    "minItems": 2,
                    "maxItems": 2
                },
                "analysis": { "type": "string", "description": "Why this contradiction matters." }
            },
            "required": ["topic", "contradictoryQuotes", "analysis"]
        }
    });

    let recommendations = json!({
        "type": "array",
        "description": "Strategic, actionable recommendations.",
        "items": {
            "type": "object",
            "properties": {
                "area": { "type": "string", "description": "Business area, e.g. 'Marketing', 'Product Development'." },
                "recommendation": { "type": "string" },
                "reasoning": { "type": "string", "description": "The findings behind the recommendation." }
            },
            "required": ["area", "recommendation", "reasoning"]
        }
    });

    let personas = json!({
        "type": "array",
        "description": "2-4 distinct participant personas built from recurring attitudes and emotional responses.",
        "items": {
            "type": "object",
            "properties": {
                "personaName": { "type": "string", "description": "Descriptive name, e.g. 'The Pragmatic Planner'." },
                "description": { "type": "string", "description": "Core motivations, fears and role in the group dynamic." },
                "keyCharacteristics": string_list("3-5 key traits."),
                "representativeQuotes": string_list("Two or three verbatim quotes for this persona.")
            },
            "required": ["personaName", "description", "keyCharacteristics", "representativeQuotes"]
        }
    });

    json!({
        "type": "object",
        "properties": {
            "executiveSummary": executive_summary,
            "narrativeSummary": {
                "type": "string",
                "description": "A group narrative weaving all findings into one story about the group's collective mindset."
            },
            "agenticAnalysis": agentic_analysis,
            "emotionTrajectory": section(emotion_points, true),
            "archetypeMapping": section(archetypes, true),
            "topThemes": section(themes, false),
            "insightGraph": section(graph, true),
            "contradictionFinder": section(contradictions, false),
            "actionableRecommendations": section(recommendations, false),
            "participantPersonas": section(personas, false)
        },
        "required": REQUIRED_SECTIONS
    })
}

/// @ai:intent Upper-case every schema `type` for the generation service
/// @ai:effects pure
fn to_wire_dialect(node: &Value) -> Value {
    match node {
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, value) in map {
                let converted = match (key.as_str(), value) {
                    ("type", Value::String(t)) => Value::String(t.to_uppercase()),
                    ("properties", Value::Object(props)) => Value::Object(
                        props
                            .iter()
                            .map(|(name, schema)| (name.clone(), to_wire_dialect(schema)))
                            .collect(),
                    ),
                    _ => to_wire_dialect(value),
                };
                out.insert(key.clone(), converted);
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(to_wire_dialect).collect()),
        other => other.clone(),
    }
}

/// @ai:intent Remove closed label sets; unknown labels are tolerated downstream
/// @ai:effects pure
fn strip_enums(node: &Value) -> Value {
    match node {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(key, _)| key.as_str() != "enum")
                .map(|(key, value)| (key.clone(), strip_enums(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(strip_enums).collect()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SAMPLE_REPORT_JSON;

    fn sample_value() -> Value {
        serde_json::from_str(SAMPLE_REPORT_JSON).unwrap()
    }

    #[test]
    fn test_sample_report_conforms() {
        let schema = ReportSchema::new().unwrap();
        schema.validate(&sample_value()).unwrap();
    }

    #[test]
    fn test_every_section_declares_data_and_commentary() {
        let schema = ReportSchema::new().unwrap();
        let props = &schema.document()["properties"];
        for name in [
            "emotionTrajectory",
            "archetypeMapping",
            "topThemes",
            "insightGraph",
            "contradictionFinder",
            "actionableRecommendations",
            "participantPersonas",
        ] {
            let required = props[name]["required"].as_array().unwrap();
            assert!(required.contains(&json!("data")), "{name} missing data");
            assert!(required.contains(&json!("commentary")), "{name} missing commentary");
        }
    }

    #[test]
    fn test_chart_sections_require_how_to_read() {
        let schema = ReportSchema::new().unwrap();
        let props = &schema.document()["properties"];
        let requires_guide = |name: &str| {
            props[name]["properties"]["commentary"]["required"]
                .as_array()
                .unwrap()
                .contains(&json!("howToRead"))
        };
        assert!(requires_guide("emotionTrajectory"));
        assert!(requires_guide("archetypeMapping"));
        assert!(requires_guide("insightGraph"));
        assert!(!requires_guide("topThemes"));
        assert!(!requires_guide("participantPersonas"));
    }

    #[test]
    fn test_missing_how_to_read_on_chart_section_is_rejected() {
        let schema = ReportSchema::new().unwrap();
        let mut value = sample_value();
        value["archetypeMapping"]["commentary"]
            .as_object_mut()
            .unwrap()
            .remove("howToRead");
        assert!(matches!(
            schema.validate(&value),
            Err(SchemaError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn test_contradiction_arity_is_enforced() {
        let schema = ReportSchema::new().unwrap();
        let mut value = sample_value();
        value["contradictionFinder"]["data"][0]["contradictoryQuotes"] = json!(["only one"]);
        assert!(schema.validate(&value).is_err());
    }

    #[test]
    fn test_missing_section_is_rejected() {
        let schema = ReportSchema::new().unwrap();
        let mut value = sample_value();
        value.as_object_mut().unwrap().remove("insightGraph");
        let err = schema.validate(&value).unwrap_err();
        let SchemaError::ValidationFailed { errors } = err else {
            panic!("expected validation failure");
        };
        assert!(errors.iter().any(|e| e.contains("insightGraph")));
    }

    #[test]
    fn test_unknown_labels_pass_validation() {
        let schema = ReportSchema::new().unwrap();
        let mut value = sample_value();
        value["emotionTrajectory"]["data"][0]["emotion"] = json!("Ecstatic");
        value["topThemes"]["data"][0]["sentiment"] = json!("Bittersweet");
        schema.validate(&value).unwrap();
    }

    #[test]
    fn test_wire_schema_uses_service_dialect_and_keeps_enums() {
        let schema = ReportSchema::new().unwrap();
        let wire = schema.wire();
        assert_eq!(wire["type"], "OBJECT");
        let emotion = &wire["properties"]["emotionTrajectory"]["properties"]["data"]["items"]
            ["properties"]["emotion"];
        assert_eq!(emotion["type"], "STRING");
        assert_eq!(emotion["enum"].as_array().unwrap().len(), 13);
        assert!(schema.validation()["properties"]["topThemes"]["properties"]["data"]["items"]
            ["properties"]["sentiment"]
            .get("enum")
            .is_none());
    }
}
