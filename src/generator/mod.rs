//! @ai:module:intent Single structured-output call to the generation service
//! @ai:module:layer application
//! @ai:module:public_api GeminiClient, GenerationClientTrait, MockGenerationClient, InsightGenerator

pub mod client;
pub mod insights;

pub use client::{
    GeminiClient, GenerationClientTrait, GenerationRequest, GenerationResponse,
    MockGenerationClient,
};
pub use insights::{extract_json, parse_report, InsightGenerator};
