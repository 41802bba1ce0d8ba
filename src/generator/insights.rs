//! @ai:module:intent Turn one generation call into a validated, typed report
//! @ai:module:layer application
//! @ai:module:public_api InsightGenerator, parse_report, extract_json
//! @ai:module:stateless true

use crate::error::GenerationError;
use crate::generator::client::{GenerationClientTrait, GenerationRequest};
use crate::model::AnalysisReport;
use crate::prompt::{AnalysisInput, PromptBuilder};
use crate::schema::ReportSchema;
use serde_json::Value;

/// @ai:intent Prompt + schema + client, producing one report per call
pub struct InsightGenerator<C: GenerationClientTrait> {
    client: C,
    schema: ReportSchema,
    prompts: PromptBuilder,
}

impl<C: GenerationClientTrait> InsightGenerator<C> {
    /// @ai:intent Create a generator around a client
    /// @ai:effects pure
    pub fn new(client: C, schema: ReportSchema) -> Self {
        Self {
            client,
            schema,
            prompts: PromptBuilder::new(),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn schema(&self) -> &ReportSchema {
        &self.schema
    }

    /// @ai:intent Issue exactly one request and return the normalized report
    /// @ai:pre input.validate() succeeded
    /// @ai:post on Err the underlying cause has been logged
    /// @ai:effects network
    pub async fn generate(&self, input: &AnalysisInput) -> Result<AnalysisReport, GenerationError> {
        let prompt = self.prompts.build(input);
        let request = GenerationRequest {
            system: prompt.system,
            user: prompt.user,
            response_schema: self.schema.wire(),
        };

        tracing::info!(
            "Requesting analysis from {} ({} transcript chars)",
            self.client.model(),
            input.transcript.len()
        );

        let response = match self.client.generate(&request).await {
            Ok(r) => r,
            Err(e) => {
                tracing::error!("Generation call failed: {}", e);
                return Err(e);
            }
        };

        tracing::info!(
            "Generation finished: {} input tokens, {} output tokens",
            response.input_tokens,
            response.output_tokens
        );

        parse_report(&self.schema, &response.text).inspect_err(|e| {
            tracing::error!("Rejected generation output: {}", e);
        })
    }
}

/// @ai:intent Parse, validate and normalize raw model text
/// @ai:effects pure
pub fn parse_report(schema: &ReportSchema, text: &str) -> Result<AnalysisReport, GenerationError> {
    let json_str = extract_json(text)?;
    let value: Value = serde_json::from_str(json_str)
        .map_err(|e| GenerationError::MalformedResponse(format!("invalid JSON: {e}")))?;

    schema.validate(&value)?;

    let report: AnalysisReport = serde_json::from_value(value)
        .map_err(|e| GenerationError::MalformedResponse(format!("unexpected report shape: {e}")))?;

    Ok(report.normalized())
}

/// @ai:intent Extract the outermost JSON object from text that may carry fences or prose
/// @ai:effects pure
pub fn extract_json(response: &str) -> Result<&str, GenerationError> {
    let start = response
        .find('{')
        .ok_or_else(|| GenerationError::MalformedResponse("no JSON object in response".into()))?;
    let end = response
        .rfind('}')
        .ok_or_else(|| GenerationError::MalformedResponse("no JSON object end in response".into()))?;

    if end <= start {
        return Err(GenerationError::MalformedResponse(
            "invalid JSON structure in response".into(),
        ));
    }

    Ok(&response[start..=end])
}
