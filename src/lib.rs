//! @ai:module:intent Q-Lens focus-group insight report library
//! @ai:module:layer application
//! @ai:module:public_api config, schema, prompt, generator, model, charts, render, export, upload, session, error

pub mod charts;
pub mod config;
pub mod error;
pub mod export;
pub mod generator;
pub mod model;
pub mod prompt;
pub mod render;
pub mod schema;
pub mod session;
pub mod upload;

pub use config::QlensConfig;
pub use error::{Error, Result};
pub use export::{ExportDocument, ExportPackager};
pub use generator::{GeminiClient, GenerationClientTrait, InsightGenerator, MockGenerationClient};
pub use model::AnalysisReport;
pub use prompt::{AnalysisInput, PromptBuilder};
pub use render::{report_markup, ReportView, SectionKind};
pub use schema::ReportSchema;
pub use session::{AnalysisSession, ReportState};
pub use upload::UploadPolicy;
