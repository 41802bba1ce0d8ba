//! @ai:module:intent Input form and report pane state for one user
//! @ai:module:layer application
//! @ai:module:public_api AnalysisSession, ReportState
//! @ai:module:stateless false
//!
//! The report pane is always in exactly one of four states. A submission
//! borrows the session mutably for its whole duration, so two generations
//! can never overlap.

use crate::error::{Error, InputError, Result, UploadError};
use crate::export::{ExportDocument, ExportPackager, ExportPackagerTrait};
use crate::generator::{GenerationClientTrait, InsightGenerator};
use crate::model::AnalysisReport;
use crate::prompt::AnalysisInput;
use crate::render::{render_pane, report_markup, Pane};
use crate::upload::{Transcript, UploadPolicy};

/// @ai:intent Report pane state
#[derive(Debug, Clone, PartialEq)]
pub enum ReportState {
    Empty,
    Loading,
    Failed(String),
    Ready(AnalysisReport),
}

impl ReportState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ReportState::Loading)
    }

    pub fn report(&self) -> Option<&AnalysisReport> {
        match self {
            ReportState::Ready(report) => Some(report),
            _ => None,
        }
    }
}

/// @ai:intent Inline message shown under the input form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineError {
    Input(InputError),
    Upload(UploadError),
}

impl std::fmt::Display for InlineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InlineError::Input(e) => write!(f, "{e}"),
            InlineError::Upload(e) => write!(f, "{e}"),
        }
    }
}

/// @ai:intent Transcript, inline error and report pane driven by one generator
pub struct AnalysisSession<C: GenerationClientTrait> {
    generator: InsightGenerator<C>,
    policy: UploadPolicy,
    packager: ExportPackager,
    transcript: Option<Transcript>,
    inline_error: Option<InlineError>,
    state: ReportState,
}

impl<C: GenerationClientTrait> AnalysisSession<C> {
    /// @ai:intent Create an empty session
    /// @ai:effects pure
    pub fn new(generator: InsightGenerator<C>, policy: UploadPolicy, packager: ExportPackager) -> Self {
        Self {
            generator,
            policy,
            packager,
            transcript: None,
            inline_error: None,
            state: ReportState::Empty,
        }
    }

    pub fn state(&self) -> &ReportState {
        &self.state
    }

    pub fn transcript(&self) -> Option<&Transcript> {
        self.transcript.as_ref()
    }

    pub fn inline_error(&self) -> Option<&InlineError> {
        self.inline_error.as_ref()
    }

    pub fn generator(&self) -> &InsightGenerator<C> {
        &self.generator
    }

    /// @ai:intent Accept or reject a transcript file
    /// @ai:post size/type rejections keep the prior transcript; empty/unreadable clear it
    /// @ai:effects pure
    pub fn upload(
        &mut self,
        file_name: &str,
        bytes: &[u8],
    ) -> std::result::Result<(), UploadError> {
        let outcome = self.policy.accept(file_name, bytes);
        self.apply_upload(outcome)
    }

    /// @ai:intent Upload a transcript from disk
    /// @ai:effects fs:read
    pub async fn upload_path(
        &mut self,
        path: &std::path::Path,
    ) -> std::result::Result<(), UploadError> {
        let outcome = self.policy.read_path(path).await;
        self.apply_upload(outcome)
    }

    fn apply_upload(
        &mut self,
        outcome: std::result::Result<Transcript, UploadError>,
    ) -> std::result::Result<(), UploadError> {
        match outcome {
            Ok(transcript) => {
                tracing::info!(
                    "Loaded transcript {} ({} bytes)",
                    transcript.file_name,
                    transcript.text.len()
                );
                self.transcript = Some(transcript);
                self.inline_error = None;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Upload rejected: {:?}", e);
                if e.clears_transcript() {
                    self.transcript = None;
                }
                self.inline_error = Some(InlineError::Upload(e.clone()));
                Err(e)
            }
        }
    }

    /// @ai:intent Validate, then run one generation and settle the pane state
    /// @ai:post validation failures leave the pane untouched and never reach the client
    /// @ai:post afterwards the state is Ready or Failed, never Loading
    /// @ai:effects network
    pub async fn submit(
        &mut self,
        context: &str,
        custom_prompt: Option<&str>,
    ) -> std::result::Result<(), InputError> {
        let transcript = self
            .transcript
            .as_ref()
            .map(|t| t.text.clone())
            .unwrap_or_default();
        let input = AnalysisInput::new(transcript, context, custom_prompt.map(str::to_string));

        if let Err(e) = input.validate() {
            tracing::warn!("Submission blocked: {}", e);
            self.inline_error = Some(InlineError::Input(e.clone()));
            return Err(e);
        }

        self.inline_error = None;
        self.state = ReportState::Loading;

        self.state = match self.generator.generate(&input).await {
            Ok(report) => ReportState::Ready(report),
            Err(e) => ReportState::Failed(e.user_message().to_string()),
        };
        Ok(())
    }

    /// @ai:intent Upload from disk, submit, and hand back the finished report
    /// @ai:post Err carries the upload, input or generation failure that stopped the run
    /// @ai:effects fs:read, network
    pub async fn analyze_path(
        &mut self,
        path: &std::path::Path,
        context: &str,
        custom_prompt: Option<&str>,
    ) -> Result<&AnalysisReport> {
        self.upload_path(path).await?;
        self.submit(context, custom_prompt).await?;

        match &self.state {
            ReportState::Ready(report) => Ok(report),
            ReportState::Failed(message) => Err(Error::Failed(message.clone())),
            ReportState::Empty | ReportState::Loading => {
                Err(Error::Failed("Analysis did not produce a report".to_string()))
            }
        }
    }

    /// @ai:intent Download is offered only with a report and no error or loading state
    pub fn can_download(&self) -> bool {
        matches!(self.state, ReportState::Ready(_))
    }

    /// @ai:intent Markup for the current pane state
    /// @ai:effects pure
    pub fn pane_markup(&self) -> String {
        let pane = match &self.state {
            ReportState::Empty => Pane::Awaiting,
            ReportState::Loading => Pane::Thinking,
            ReportState::Failed(message) => Pane::Failed(message),
            ReportState::Ready(report) => Pane::Report(report),
        };
        render_pane(pane)
    }

    /// @ai:intent Package the current report; a no-op when none is shown
    /// @ai:effects pure
    pub fn export(&self) -> Option<ExportDocument> {
        let ReportState::Ready(report) = &self.state else {
            tracing::warn!("Export requested without a report on screen; ignoring");
            return None;
        };

        let markup = report_markup(report);
        match self.packager.package(&markup, report) {
            Ok(doc) => Some(doc),
            Err(e) => {
                tracing::error!("Export failed: {}", e);
                None
            }
        }
    }
}
