//! @ai:module:intent Compose the system instruction and user message for one analysis
//! @ai:module:layer application
//! @ai:module:public_api AnalysisInput, PromptBuilder, Prompt, NO_CUSTOM_PROMPT
//! @ai:module:stateless true

use crate::error::InputError;

/// Placeholder sent when the user gave no custom directive.
pub const NO_CUSTOM_PROMPT: &str =
    "No custom prompt provided. Perform a general analysis and generate a full executive report.";

/// @ai:intent User-supplied material for one analysis request
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisInput {
    pub transcript: String,
    pub context: String,
    pub custom_prompt: Option<String>,
}

impl AnalysisInput {
    /// @ai:intent Build an input, treating a blank custom prompt as absent
    /// @ai:effects pure
    pub fn new(
        transcript: impl Into<String>,
        context: impl Into<String>,
        custom_prompt: Option<String>,
    ) -> Self {
        Self {
            transcript: transcript.into(),
            context: context.into(),
            custom_prompt: custom_prompt.filter(|p| !p.trim().is_empty()),
        }
    }

    /// @ai:intent Reject input that must never reach the generation service
    /// @ai:post Ok implies transcript and context both contain non-whitespace text
    /// @ai:effects pure
    pub fn validate(&self) -> Result<(), InputError> {
        if self.transcript.trim().is_empty() {
            return Err(InputError::MissingTranscript);
        }
        if self.context.trim().is_empty() {
            return Err(InputError::MissingContext);
        }
        Ok(())
    }
}

/// @ai:intent The two strings carried by a generation request
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// @ai:intent Fills the analyst templates
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Analyst persona plus the data-then-commentary rule
    /// @ai:effects pure
    pub fn system_instruction(&self) -> String {
        r#"You are a senior qualitative research analyst who turns focus-group transcripts into executive-ready insight reports.

Work in two passes for every section of the report:
1. Data pass: extract the analytical data the section asks for, grounded in what participants actually said. Quote participants verbatim.
2. Commentary pass: looking only at the data you just produced, write the section commentary. State the objective of the section, the key insights an executive should take away, and, for chart sections, how to read the chart.

Rules:
- Answer with a single JSON object that matches the response schema exactly.
- Do not add markdown, code fences, or any text before or after the JSON.
- Use only the labels the schema allows for emotions and sentiments.
- Archetype percentages must add up to 100.
- Every contradiction holds exactly two quotes."#
            .to_string()
    }

    /// @ai:intent User message embedding context, transcript and directive
    /// @ai:pre input.validate() succeeded
    /// @ai:effects pure
    pub fn user_message(&self, input: &AnalysisInput) -> String {
        let directive = input
            .custom_prompt
            .as_deref()
            .unwrap_or(NO_CUSTOM_PROMPT);

        format!(
            "## Focus group context\n{}\n\n## Transcript\n```\n{}\n```\n\n## Analysis directive\n{}\n",
            input.context.trim(),
            input.transcript.trim_end(),
            directive.trim()
        )
    }

    /// @ai:intent Both prompt parts for one request
    /// @ai:effects pure
    pub fn build(&self, input: &AnalysisInput) -> Prompt {
        Prompt {
            system: self.system_instruction(),
            user: self.user_message(input),
        }
    }
}
