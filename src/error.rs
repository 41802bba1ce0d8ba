//! @ai:module:intent Error taxonomy for input, upload, generation and export failures
//! @ai:module:layer domain
//! @ai:module:public_api Error, Result, InputError, UploadError, GenerationError, ExportError
//! @ai:module:stateless true

use crate::schema::SchemaError;
use thiserror::Error;

/// Message shown for every generation failure that is not a credential problem.
pub const GENERIC_GENERATION_MESSAGE: &str =
    "Failed to generate insights. The model may have returned an invalid response.";

/// Message shown when the generation service rejects or lacks a credential.
pub const CREDENTIAL_MESSAGE: &str =
    "The API key is invalid. Please check your environment configuration.";

/// @ai:intent Submission rejected before any network call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Please upload a transcript file.")]
    MissingTranscript,

    #[error("Please provide context for the focus group.")]
    MissingContext,
}

/// @ai:intent Transcript file rejected by the upload contract
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("File is too large. Please upload a file smaller than 5MB.")]
    TooLarge { size: u64, limit: u64 },

    #[error("Invalid file type. Please upload a TXT, MD, or RTF file.")]
    InvalidType { file_name: String },

    #[error("File is empty or invalid. Please upload a transcript with content.")]
    Empty { file_name: String },

    #[error("Failed to read the file.")]
    Unreadable { file_name: String, reason: String },
}

impl UploadError {
    /// @ai:intent Whether the rejection also discards the previously loaded transcript
    /// @ai:effects pure
    pub fn clears_transcript(&self) -> bool {
        matches!(self, UploadError::Empty { .. } | UploadError::Unreadable { .. })
    }
}

/// @ai:intent Failure of the single generation call
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("credential rejected by generation service: {detail}")]
    InvalidCredential { detail: String },

    #[error("generation request failed: {0}")]
    Transport(String),

    #[error("generation service returned malformed output: {0}")]
    MalformedResponse(String),

    #[error("generation output violates the report schema: {0}")]
    SchemaViolation(#[from] SchemaError),
}

impl GenerationError {
    /// @ai:intent Message surfaced in the report pane
    /// @ai:effects pure
    pub fn user_message(&self) -> &'static str {
        match self {
            GenerationError::InvalidCredential { .. } => CREDENTIAL_MESSAGE,
            _ => GENERIC_GENERATION_MESSAGE,
        }
    }

    /// @ai:intent True when the failure is a credential problem
    /// @ai:effects pure
    pub fn is_credential(&self) -> bool {
        matches!(self, GenerationError::InvalidCredential { .. })
    }
}

/// @ai:intent Failure while packaging or writing the export document
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("report pane is not mounted; nothing to export")]
    NotMounted,

    #[error("failed to serialize report data: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write export file: {0}")]
    Io(#[from] std::io::Error),
}

/// @ai:intent Unified error type for library operations
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Generation settled in the failed pane state; carries the message shown there.
    #[error("{0}")]
    Failed(String),
}

pub type Result<T> = std::result::Result<T, Error>;
