//! @ai:module:intent CLI for the Q-Lens report generator
//! @ai:module:layer presentation

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use qlens::{
    config::QlensConfig,
    export::{ExportPackager, ExportPackagerTrait},
    generator::{parse_report, GeminiClient, GenerationClientTrait, InsightGenerator, MockGenerationClient},
    model::{AnalysisReport, SAMPLE_REPORT_JSON},
    render::{report_markup, ReportView},
    schema::ReportSchema,
    session::AnalysisSession,
    upload::UploadPolicy,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "qlens")]
#[command(about = "Turn focus-group transcripts into executive insight reports")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a transcript and export the report
    Analyze {
        /// Transcript file (.txt, .md or .rtf, at most 5MB)
        #[arg(short, long)]
        transcript: PathBuf,

        /// Who was in the group and what was discussed
        #[arg(long, conflicts_with = "context_file", required_unless_present = "context_file")]
        context: Option<String>,

        /// Read the context from a file instead
        #[arg(long)]
        context_file: Option<PathBuf>,

        /// Optional directive for the analysis
        #[arg(short, long)]
        prompt: Option<String>,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory for the report files
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Use the bundled sample report instead of calling the API
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate a saved report and export it again
    Render {
        /// Path to a report JSON file
        #[arg(short, long)]
        report: PathBuf,

        /// Output directory for the HTML file
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the response schema sent to the model
    Schema {
        /// Print the validation projection instead
        #[arg(long)]
        validation: bool,
    },

    /// Initialize default configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = "qlens.toml")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("qlens=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            transcript,
            context,
            context_file,
            prompt,
            config,
            output,
            dry_run,
        } => {
            analyze(AnalyzeArgs {
                transcript,
                context,
                context_file,
                prompt,
                config,
                output,
                dry_run,
            })
            .await
        }
        Commands::Render {
            report,
            output,
            config,
        } => render(report, output, config),
        Commands::Schema { validation } => print_schema(validation),
        Commands::Init { output } => init_config(output),
    }
}

struct AnalyzeArgs {
    transcript: PathBuf,
    context: Option<String>,
    context_file: Option<PathBuf>,
    prompt: Option<String>,
    config: Option<PathBuf>,
    output: PathBuf,
    dry_run: bool,
}

/// @ai:intent Upload, validate, generate once and export
/// @ai:effects network, fs:read, fs:write
async fn analyze(args: AnalyzeArgs) -> Result<()> {
    let config = load_or_default_config(args.config)?;

    let context = match (args.context, args.context_file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read context file {}", path.display()))?,
        (None, None) => String::new(),
    };

    let schema = ReportSchema::new()?;
    let policy = UploadPolicy::from_config(&config.upload);
    let packager = ExportPackager::new(config.export.clone());

    if args.dry_run {
        tracing::info!("Dry run: using the bundled sample report");
        let generator = InsightGenerator::new(MockGenerationClient::new(SAMPLE_REPORT_JSON), schema);
        let session = AnalysisSession::new(generator, policy, packager);
        run_session(session, &args.transcript, &context, args.prompt.as_deref(), &args.output).await
    } else {
        let client = GeminiClient::new(config.api.clone())?;
        let session = AnalysisSession::new(InsightGenerator::new(client, schema), policy, packager);
        run_session(session, &args.transcript, &context, args.prompt.as_deref(), &args.output).await
    }
}

/// @ai:intent Drive one session from upload to written files
/// @ai:effects network, fs:read, fs:write
async fn run_session<C: GenerationClientTrait>(
    mut session: AnalysisSession<C>,
    transcript: &Path,
    context: &str,
    prompt: Option<&str>,
    output: &Path,
) -> Result<()> {
    let report = session
        .analyze_path(transcript, context, prompt)
        .await
        .context("Analysis Failed")?
        .clone();

    let document = session
        .export()
        .context("Report could not be packaged for export")?;
    let html_path = document.write_to(output)?;
    let json_path = save_report_json(&report, output)?;

    print_summary(&report);
    println!();
    println!("Report saved to {}", html_path.display());
    println!("Data saved to {}", json_path.display());
    Ok(())
}

/// @ai:intent Re-export a saved report without any network call
/// @ai:effects fs:read, fs:write
fn render(report_path: PathBuf, output: PathBuf, config: Option<PathBuf>) -> Result<()> {
    let config = load_or_default_config(config)?;
    let text = std::fs::read_to_string(&report_path)
        .with_context(|| format!("Failed to read report {}", report_path.display()))?;

    let schema = ReportSchema::new()?;
    let report = parse_report(&schema, &text)
        .with_context(|| format!("{} is not a valid report", report_path.display()))?;

    let markup = report_markup(&report);
    let document = ExportPackager::new(config.export).package(&markup, &report)?;
    let path = document.write_to(&output)?;

    print_summary(&report);
    println!();
    println!("Report saved to {}", path.display());
    Ok(())
}

/// @ai:effects io
fn print_schema(validation: bool) -> Result<()> {
    let schema = ReportSchema::new()?;
    let document = if validation {
        schema.validation()
    } else {
        schema.wire()
    };
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}

/// @ai:intent Initialize default configuration file
/// @ai:effects fs:write
fn init_config(output: PathBuf) -> Result<()> {
    let config = QlensConfig::default();
    config.save(&output)?;
    println!("Configuration saved to {}", output.display());
    Ok(())
}

/// @ai:intent Load configuration or use defaults
/// @ai:effects fs:read
fn load_or_default_config(path: Option<PathBuf>) -> Result<QlensConfig> {
    match path {
        Some(p) => QlensConfig::load(&p)
            .with_context(|| format!("Failed to load config {}", p.display())),
        None => {
            let default_path = PathBuf::from("qlens.toml");
            if default_path.exists() {
                QlensConfig::load(&default_path)
            } else {
                Ok(QlensConfig::default())
            }
        }
    }
}

/// @ai:effects fs:write
fn save_report_json(report: &AnalysisReport, output: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(output)?;
    let path = output.join("report.json");
    std::fs::write(&path, serde_json::to_string_pretty(report)?)?;
    Ok(path)
}

/// @ai:intent Print a short overview of the report
/// @ai:effects io
fn print_summary(report: &AnalysisReport) {
    let view = ReportView::build(report);

    println!();
    println!("Q-Lens AI Report");
    println!("================");
    println!();
    println!("{}", report.executive_summary.summary);
    println!();
    println!("{:<30} {:>8}", "Section", "Blocks");
    println!("{}", "-".repeat(40));
    for section in &view.sections {
        println!("{:<30} {:>8}", section.title(), section.blocks.len());
    }

    let total = report.archetype_total();
    println!();
    println!("Archetypes:");
    for archetype in &report.archetype_mapping.data {
        println!("  {:<26} {:>6.1}%", archetype.name, archetype.percentage);
    }
    if (total - 100.0).abs() > 0.5 {
        println!("  (shares add up to {total:.1}%, shown as given)");
    }
}
