//! @ai:module:intent Markup for the four report pane states
//! @ai:module:layer infrastructure
//! @ai:module:public_api Pane, render_pane

use super::html::{escape_html, report_markup};
use crate::model::AnalysisReport;

/// @ai:intent What the report pane is currently showing
#[derive(Debug, Clone, Copy)]
pub enum Pane<'a> {
    Awaiting,
    Thinking,
    Failed(&'a str),
    Report(&'a AnalysisReport),
}

/// @ai:intent Markup for one pane state
/// @ai:effects pure
pub fn render_pane(pane: Pane<'_>) -> String {
    match pane {
        Pane::Awaiting => "<div class=\"pane pane-empty\"><h2>Awaiting Analysis</h2>\
<p>Upload a transcript and describe the focus group to generate a report.</p></div>\n"
            .to_string(),
        Pane::Thinking => "<div class=\"pane pane-loading\" aria-busy=\"true\"><h2>Q-Lens AI is thinking...</h2>\
<p>Reading the transcript and building the report.</p></div>\n"
            .to_string(),
        Pane::Failed(message) => format!(
            "<div class=\"pane pane-error\" role=\"alert\"><h2>Analysis Failed</h2><p>{}</p></div>\n",
            escape_html(message)
        ),
        Pane::Report(report) => report_markup(report),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CREDENTIAL_MESSAGE;

    #[test]
    fn test_each_state_has_its_heading() {
        assert!(render_pane(Pane::Awaiting).contains("Awaiting Analysis"));
        assert!(render_pane(Pane::Thinking).contains("Q-Lens AI is thinking..."));

        let failed = render_pane(Pane::Failed(CREDENTIAL_MESSAGE));
        assert!(failed.contains("Analysis Failed"));
        assert!(failed.contains("The API key is invalid."));
    }

    #[test]
    fn test_report_state_renders_report_root() {
        let report: AnalysisReport =
            serde_json::from_str(crate::model::SAMPLE_REPORT_JSON).unwrap();
        let html = render_pane(Pane::Report(&report));
        assert!(html.contains("id=\"report-content\""));
    }
}
