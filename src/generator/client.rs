//! @ai:module:intent HTTP client for the structured-output generation endpoint
//! @ai:module:layer infrastructure
//! @ai:module:public_api GeminiClient, GenerationClientTrait, GenerationRequest, GenerationResponse, MockGenerationClient
//! @ai:module:stateless false

use crate::config::ApiConfig;
use crate::error::GenerationError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// @ai:intent Everything one generation call carries
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub system: String,
    pub user: String,
    pub response_schema: Value,
}

/// @ai:intent Raw model text plus token accounting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub text: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// @ai:intent Trait for the generation service client
#[allow(async_fn_in_trait)]
pub trait GenerationClientTrait: Send + Sync {
    /// @ai:intent Issue exactly one request; no retry
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError>;

    /// @ai:intent Model identifier, for logging
    fn model(&self) -> &str;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiRequest<'a> {
    system_instruction: ApiContent<'a>,
    contents: Vec<ApiContent<'a>>,
    generation_config: ApiGenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct ApiContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<ApiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct ApiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiGenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a Value,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

/// @ai:intent Client for the `generateContent` endpoint
pub struct GeminiClient {
    client: reqwest::Client,
    config: ApiConfig,
    api_key: Option<String>,
}

impl GeminiClient {
    /// @ai:intent Create a client reading the key from the configured variable
    /// @ai:post a missing key is reported on the first call, as a credential error
    /// @ai:effects env
    pub fn new(config: ApiConfig) -> Result<Self, GenerationError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty());
        if api_key.is_none() {
            tracing::warn!("{} is not set; generation calls will fail", config.api_key_env);
        }
        Self::build(config, api_key)
    }

    /// @ai:intent Create a client with an explicit key (for testing)
    /// @ai:effects pure
    pub fn with_api_key(config: ApiConfig, api_key: String) -> Result<Self, GenerationError> {
        Self::build(config, Some(api_key))
    }

    fn build(config: ApiConfig, api_key: Option<String>) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| GenerationError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

/// @ai:intent Whether an error body names a rejected key
/// @ai:effects pure
fn mentions_invalid_key(body: &str) -> bool {
    body.contains("API_KEY_INVALID") || body.contains("API key not valid")
}

impl GenerationClientTrait for GeminiClient {
    /// @ai:intent Post the prompt and schema, return the concatenated candidate text
    /// @ai:effects network
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| GenerationError::InvalidCredential {
                detail: format!("{} is not set", self.config.api_key_env),
            })?;

        let body = ApiRequest {
            system_instruction: ApiContent {
                role: None,
                parts: vec![ApiPart {
                    text: &request.system,
                }],
            },
            contents: vec![ApiContent {
                role: Some("user"),
                parts: vec![ApiPart {
                    text: &request.user,
                }],
            }],
            generation_config: ApiGenerationConfig {
                response_mime_type: "application/json",
                response_schema: &request.response_schema,
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(format!("failed to send request: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GenerationError::Transport(format!("failed to read response: {e}")))?;

        if !status.is_success() {
            if status == reqwest::StatusCode::UNAUTHORIZED
                || status == reqwest::StatusCode::FORBIDDEN
                || mentions_invalid_key(&text)
            {
                return Err(GenerationError::InvalidCredential {
                    detail: format!("{status}: {text}"),
                });
            }
            return Err(GenerationError::Transport(format!(
                "generation API error ({status}): {text}"
            )));
        }

        let api_response: ApiResponse = serde_json::from_str(&text).map_err(|e| {
            GenerationError::MalformedResponse(format!("unreadable response envelope: {e}"))
        })?;

        let content = api_response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(GenerationError::MalformedResponse(
                "response contained no text".to_string(),
            ));
        }

        let usage = api_response.usage_metadata;
        Ok(GenerationResponse {
            text: content,
            input_tokens: usage.as_ref().map(|u| u.prompt_token_count).unwrap_or(0),
            output_tokens: usage.as_ref().map(|u| u.candidates_token_count).unwrap_or(0),
        })
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

#[derive(Debug, Clone)]
enum MockOutcome {
    Text(String),
    InvalidCredential,
    Transport(String),
}

/// @ai:intent Mock client for testing and dry runs
pub struct MockGenerationClient {
    outcome: MockOutcome,
    calls: AtomicUsize,
    last_request: Mutex<Option<GenerationRequest>>,
}

impl MockGenerationClient {
    /// @ai:intent Create a mock client that returns a fixed response text
    /// @ai:effects pure
    pub fn new(response: impl Into<String>) -> Self {
        Self::with_outcome(MockOutcome::Text(response.into()))
    }

    /// @ai:intent Mock that answers every call with a credential rejection
    pub fn invalid_credential() -> Self {
        Self::with_outcome(MockOutcome::InvalidCredential)
    }

    /// @ai:intent Mock that answers every call with a transport failure
    pub fn transport_failure(message: impl Into<String>) -> Self {
        Self::with_outcome(MockOutcome::Transport(message.into()))
    }

    fn with_outcome(outcome: MockOutcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// @ai:intent Number of generate calls received
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// @ai:intent Copy of the most recent request, if any
    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.last_request.lock().ok().and_then(|r| r.clone())
    }
}

impl GenerationClientTrait for MockGenerationClient {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }

        match &self.outcome {
            MockOutcome::Text(text) => Ok(GenerationResponse {
                text: text.clone(),
                input_tokens: 100,
                output_tokens: 200,
            }),
            MockOutcome::InvalidCredential => Err(GenerationError::InvalidCredential {
                detail: "API_KEY_INVALID".to_string(),
            }),
            MockOutcome::Transport(message) => Err(GenerationError::Transport(message.clone())),
        }
    }

    fn model(&self) -> &str {
        "mock"
    }
}
