//! @ai:module:intent Package rendered markup and report data into one standalone HTML file
//! @ai:module:layer infrastructure
//! @ai:module:public_api ExportPackager, ExportDocument, EXPORT_FILENAME, EXPORT_MIME, CHART_LIBRARY_URL
//! @ai:module:stateless true
//!
//! The document carries the static markup verbatim, a JSON data island, one
//! pinned charting library reference, and a small inline script that redraws
//! the pie and timeline from the island. The static SVG stays in place when
//! that script cannot run.

use crate::config::ExportConfig;
use crate::error::ExportError;
use crate::model::AnalysisReport;
use crate::render::{escape_html, REPORT_ROOT_ID};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

pub const EXPORT_FILENAME: &str = "Q-Lens-AI-Report.html";
pub const EXPORT_MIME: &str = "text/html";
pub const CHART_LIBRARY_URL: &str =
    "https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js";

/// Id of the embedded data island.
pub const DATA_ISLAND_ID: &str = "report-data";

const HYDRATE_SCRIPT: &str = include_str!("../assets/hydrate.js");
const STYLESHEET: &str = include_str!("../assets/report.css");

/// @ai:intent A finished export, ready to be offered as a download
#[derive(Debug, Clone, PartialEq)]
pub struct ExportDocument {
    pub filename: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportDocument {
    /// @ai:intent Write the document into a directory under its fixed name
    /// @ai:effects fs:write
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.bytes)?;
        tracing::info!("Export written to {}", path.display());
        Ok(path)
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.bytes).unwrap_or_default()
    }
}

/// @ai:intent Trait for export packaging
pub trait ExportPackagerTrait: Send + Sync {
    /// @ai:intent Build the standalone document from markup and the report it shows
    fn package(
        &self,
        markup: &str,
        report: &AnalysisReport,
    ) -> Result<ExportDocument, ExportError>;
}

/// @ai:intent Builds self-contained HTML exports
pub struct ExportPackager {
    config: ExportConfig,
}

impl Default for ExportPackager {
    fn default() -> Self {
        Self::new(ExportConfig::default())
    }
}

impl ExportPackager {
    /// @ai:intent Create a packager with export settings
    /// @ai:effects pure
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// @ai:intent Package with an explicit generation time
    /// @ai:pre markup contains the report root element
    /// @ai:effects pure
    pub fn package_at(
        &self,
        markup: &str,
        report: &AnalysisReport,
        generated_at: DateTime<Utc>,
    ) -> Result<ExportDocument, ExportError> {
        if !markup.contains(&format!("id=\"{REPORT_ROOT_ID}\"")) {
            return Err(ExportError::NotMounted);
        }

        let data = embed_json(report)?;
        let title = escape_html(&self.config.title);
        let stamp = generated_at.format("%Y-%m-%d %H:%M UTC");

        let html = format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
{STYLESHEET}</style>
</head>
<body>
<header class="export-header">
<h1>{title}</h1>
<p class="generated">Generated {stamp}</p>
</header>
<div id="report-content-wrapper">
{markup}
</div>
<footer class="export-footer">Generated by Q-Lens AI on {stamp}</footer>
<script type="application/json" id="{DATA_ISLAND_ID}">{data}</script>
<script src="{library}"></script>
<script>
{HYDRATE_SCRIPT}</script>
</body>
</html>
"#,
            library = escape_html(&self.config.chart_library_url),
        );

        Ok(ExportDocument {
            filename: self.config.filename.clone(),
            mime: EXPORT_MIME,
            bytes: html.into_bytes(),
        })
    }
}

impl ExportPackagerTrait for ExportPackager {
    /// @ai:effects pure
    fn package(
        &self,
        markup: &str,
        report: &AnalysisReport,
    ) -> Result<ExportDocument, ExportError> {
        self.package_at(markup, report, Utc::now())
    }
}

/// @ai:intent Serialize the report so it cannot close the surrounding script element
/// @ai:post parsing the result yields the same JSON value as the report
/// @ai:effects pure
pub fn embed_json(report: &AnalysisReport) -> Result<String, ExportError> {
    let json = serde_json::to_string(report)?;
    Ok(json
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SAMPLE_REPORT_JSON;
    use crate::render::report_markup;
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    fn sample() -> AnalysisReport {
        serde_json::from_str(SAMPLE_REPORT_JSON).unwrap()
    }

    fn island(html: &str) -> &str {
        let open = format!("<script type=\"application/json\" id=\"{DATA_ISLAND_ID}\">");
        let start = html.find(&open).unwrap() + open.len();
        let end = start + html[start..].find("</script>").unwrap();
        &html[start..end]
    }

    #[test]
    fn test_exactly_one_island_matching_report() {
        let mut report = sample();
        report.narrative_summary = "They said </script><b>&</b> out loud".to_string();
        let markup = report_markup(&report);
        let doc = ExportPackager::default().package(&markup, &report).unwrap();
        let html = doc.as_str();

        assert_eq!(html.matches("<script type=\"application/json\"").count(), 1);
        let parsed: Value = serde_json::from_str(island(html)).unwrap();
        assert_eq!(parsed, serde_json::to_value(&report).unwrap());
    }

    #[test]
    fn test_exactly_one_external_script() {
        let report = sample();
        let doc = ExportPackager::default()
            .package(&report_markup(&report), &report)
            .unwrap();
        let html = doc.as_str();
        assert_eq!(html.matches("<script src=").count(), 1);
        assert!(html.contains(&format!("<script src=\"{CHART_LIBRARY_URL}\">")));
    }

    #[test]
    fn test_markup_embedded_verbatim_with_fallback_notice() {
        let report = sample();
        let markup = report_markup(&report);
        let doc = ExportPackager::default().package(&markup, &report).unwrap();
        let html = doc.as_str();
        assert!(html.contains(&markup));
        assert!(html.contains("Could not load interactive charts."));
        assert!(html.contains("typeof Chart === 'undefined'"));
    }

    #[test]
    fn test_filename_and_mime_are_fixed() {
        let report = sample();
        let doc = ExportPackager::default()
            .package(&report_markup(&report), &report)
            .unwrap();
        assert_eq!(doc.filename, "Q-Lens-AI-Report.html");
        assert_eq!(doc.mime, "text/html");
    }

    #[test]
    fn test_unmounted_markup_is_rejected() {
        let err = ExportPackager::default()
            .package("", &sample())
            .unwrap_err();
        assert!(matches!(err, ExportError::NotMounted));
    }

    #[test]
    fn test_write_to_directory() {
        let report = sample();
        let doc = ExportPackager::default()
            .package(&report_markup(&report), &report)
            .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = doc.write_to(&dir.path().join("out")).unwrap();
        assert_eq!(path.file_name().unwrap(), "Q-Lens-AI-Report.html");
        assert_eq!(std::fs::read(&path).unwrap(), doc.bytes);
    }

    #[test]
    fn test_timestamp_in_footer() {
        let report = sample();
        let at = DateTime::parse_from_rfc3339("2026-03-01T09:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let doc = ExportPackager::default()
            .package_at(&report_markup(&report), &report, at)
            .unwrap();
        assert!(doc.as_str().contains("Generated by Q-Lens AI on 2026-03-01 09:30 UTC"));
    }
}
