//! @ai:module:intent HTML markup for a rendered report
//! @ai:module:layer infrastructure
//! @ai:module:public_api to_html, report_markup, escape_html
//! @ai:module:stateless true

use super::svg::{emotion_svg, graph_svg, pie_svg};
use super::tree::{Block, ChartBlock, CommentaryBlock, RenderedSection, ReportView};
use crate::charts::slice_color;
use crate::model::{AnalysisReport, SwotAnalysis};
use std::fmt::Write;

/// Root element id of the report markup.
pub const REPORT_ROOT_ID: &str = "report-content";

/// @ai:intent Escape text for HTML element and attribute content
/// @ai:effects pure
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// @ai:intent Convenience: build the view and render it
/// @ai:effects pure
pub fn report_markup(report: &AnalysisReport) -> String {
    to_html(&ReportView::build(report))
}

/// @ai:intent Render the full view under the report root element
/// @ai:effects pure
pub fn to_html(view: &ReportView) -> String {
    let mut html = format!("<div id=\"{REPORT_ROOT_ID}\" class=\"report\">\n");
    for section in &view.sections {
        render_section(&mut html, section);
    }
    html.push_str("</div>\n");
    html
}

fn render_section(out: &mut String, section: &RenderedSection) {
    let _ = writeln!(
        out,
        "<section class=\"report-section\" id=\"section-{}\">\n<h2>{}</h2>",
        section.kind.slug(),
        escape_html(section.title())
    );
    if let Some(commentary) = &section.commentary {
        render_commentary(out, commentary);
    }
    for block in &section.blocks {
        render_block(out, block);
    }
    out.push_str("</section>\n");
}

fn render_commentary(out: &mut String, commentary: &CommentaryBlock) {
    out.push_str("<div class=\"commentary\">\n");
    let _ = writeln!(
        out,
        "<p><strong>Objective:</strong> {}</p>",
        escape_html(&commentary.objective)
    );
    if let Some(guide) = &commentary.how_to_read {
        let _ = writeln!(
            out,
            "<p><strong>How to read this chart:</strong> {}</p>",
            escape_html(guide)
        );
    }
    let _ = writeln!(
        out,
        "<p><strong>Key insights:</strong> {}</p>",
        escape_html(&commentary.key_insights)
    );
    out.push_str("</div>\n");
}

fn quote_list(out: &mut String, quotes: &[String]) {
    for quote in quotes {
        let _ = writeln!(out, "<blockquote>\u{201C}{}\u{201D}</blockquote>", escape_html(quote));
    }
}

fn item_list(out: &mut String, items: &[String]) {
    out.push_str("<ul>");
    for item in items {
        let _ = write!(out, "<li>{}</li>", escape_html(item));
    }
    out.push_str("</ul>\n");
}

fn render_swot(out: &mut String, swot: &SwotAnalysis) {
    out.push_str("<div class=\"swot-grid\">\n");
    for (class, title, items) in [
        ("strengths", "Strengths", &swot.strengths),
        ("weaknesses", "Weaknesses", &swot.weaknesses),
        ("opportunities", "Opportunities", &swot.opportunities),
        ("threats", "Threats", &swot.threats),
    ] {
        let _ = write!(out, "<div class=\"swot-card {class}\"><h3>{title}</h3>");
        item_list(out, items);
        out.push_str("</div>\n");
    }
    out.push_str("</div>\n");
}

fn render_chart(out: &mut String, chart: &ChartBlock) {
    let _ = writeln!(
        out,
        "<div id=\"{}\" class=\"chart-container\">",
        chart.container_id()
    );

    let (empty_message, drawn) = match chart {
        ChartBlock::ArchetypePie(slices) => (
            slices.is_empty().then_some("No archetype data to display."),
            (!slices.is_empty()).then(|| pie_svg(slices)),
        ),
        ChartBlock::EmotionTimeline(samples) => (
            samples.is_empty().then_some("No emotion data to display."),
            (!samples.is_empty()).then(|| emotion_svg(samples)),
        ),
        ChartBlock::InsightGraph(layout) => (
            layout.is_empty().then_some("No graph data to display."),
            (!layout.is_empty()).then(|| Ok(graph_svg(layout))),
        ),
    };

    match (empty_message, drawn) {
        (Some(message), _) => {
            let _ = writeln!(out, "<p class=\"chart-empty\">{message}</p>");
        }
        (None, Some(Ok(svg))) => {
            out.push_str(&svg);
            out.push('\n');
        }
        (None, Some(Err(e))) => {
            tracing::warn!("Static chart for {} failed: {:#}", chart.container_id(), e);
            out.push_str("<p class=\"chart-empty\">Chart could not be drawn.</p>\n");
        }
        (None, None) => {}
    }

    out.push_str("</div>\n");
}

fn render_block(out: &mut String, block: &Block) {
    match block {
        Block::Paragraph { heading, text } => {
            if let Some(heading) = heading {
                let _ = writeln!(out, "<h3>{}</h3>", escape_html(heading));
            }
            let _ = writeln!(out, "<p>{}</p>", escape_html(text));
        }
        Block::Swot(swot) => render_swot(out, swot),
        Block::Chart(chart) => render_chart(out, chart),
        Block::Archetypes(archetypes) => {
            out.push_str("<div class=\"card-grid\">\n");
            for (i, archetype) in archetypes.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "<div class=\"card archetype\" style=\"border-color: {}\"><h3>{} <span class=\"badge\">{}%</span></h3><p>{}</p>",
                    slice_color(i),
                    escape_html(&archetype.name),
                    archetype.percentage,
                    escape_html(&archetype.description)
                );
                quote_list(out, &archetype.quotes);
                out.push_str("</div>\n");
            }
            out.push_str("</div>\n");
        }
        Block::Themes(themes) => {
            for theme in themes {
                let _ = writeln!(
                    out,
                    "<div class=\"card theme\"><h3>{} <span class=\"sentiment sentiment-{}\">{}</span></h3>",
                    escape_html(&theme.theme),
                    theme.sentiment.as_str().to_lowercase(),
                    theme.sentiment.as_str()
                );
                quote_list(out, &theme.supporting_quotes);
                out.push_str("</div>\n");
            }
        }
        Block::Connections { edges, summary } => {
            out.push_str("<div class=\"graph-panel\"><h3>Key Connections</h3>\n<ul>");
            for edge in edges {
                let _ = write!(
                    out,
                    "<li><strong>{}</strong> \u{2192} <strong>{}</strong> <em>({})</em></li>",
                    escape_html(&edge.from),
                    escape_html(&edge.to),
                    escape_html(&edge.relationship)
                );
            }
            out.push_str("</ul>\n");
            let _ = writeln!(out, "<p>{}</p>\n</div>", escape_html(summary));
        }
        Block::Personas(personas) => {
            out.push_str("<div class=\"card-grid\">\n");
            for persona in personas {
                let _ = writeln!(
                    out,
                    "<div class=\"card persona\"><h3>{}</h3><p>{}</p>",
                    escape_html(&persona.persona_name),
                    escape_html(&persona.description)
                );
                item_list(out, &persona.key_characteristics);
                quote_list(out, &persona.representative_quotes);
                out.push_str("</div>\n");
            }
            out.push_str("</div>\n");
        }
        Block::Contradictions(contradictions) => {
            for c in contradictions {
                let _ = writeln!(
                    out,
                    "<div class=\"card contradiction\"><h3>{}</h3><div class=\"quote-pair\">",
                    escape_html(&c.topic)
                );
                quote_list(out, &c.contradictory_quotes);
                let _ = writeln!(out, "</div><p>{}</p></div>", escape_html(&c.analysis));
            }
        }
        Block::StuckMoments(moments) => {
            out.push_str("<h3>Stuck Moments</h3>\n");
            for m in moments {
                out.push_str("<div class=\"card stuck-moment\">");
                quote_list(out, std::slice::from_ref(&m.quote));
                let _ = writeln!(
                    out,
                    "<p><strong>Suggested follow-up:</strong> {}</p></div>",
                    escape_html(&m.suggestion)
                );
            }
        }
        Block::CognitiveBiases(biases) => {
            out.push_str("<h3>Cognitive Biases</h3>\n");
            for b in biases {
                let _ = write!(
                    out,
                    "<div class=\"card bias\"><h4>{}</h4>",
                    escape_html(&b.bias)
                );
                quote_list(out, std::slice::from_ref(&b.quote));
                let _ = writeln!(out, "<p>{}</p></div>", escape_html(&b.explanation));
            }
        }
        Block::KeyMetaphors(metaphors) => {
            out.push_str("<h3>Key Metaphors</h3>\n");
            for m in metaphors {
                let _ = write!(
                    out,
                    "<div class=\"card metaphor\"><h4>{}</h4>",
                    escape_html(&m.metaphor)
                );
                quote_list(out, std::slice::from_ref(&m.quote));
                let _ = writeln!(out, "<p>{}</p></div>", escape_html(&m.meaning));
            }
        }
        Block::Recommendations(recommendations) => {
            for r in recommendations {
                let _ = writeln!(
                    out,
                    "<div class=\"card recommendation\"><h3>{}</h3><p>{}</p><p class=\"reasoning\"><strong>Why:</strong> {}</p></div>",
                    escape_html(&r.area),
                    escape_html(&r.recommendation),
                    escape_html(&r.reasoning)
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SAMPLE_REPORT_JSON;
    use crate::render::tree::SectionKind;

    fn sample() -> AnalysisReport {
        serde_json::from_str(SAMPLE_REPORT_JSON).unwrap()
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_section_headings_appear_in_order() {
        let html = report_markup(&sample());
        assert!(html.starts_with("<div id=\"report-content\""));

        let mut cursor = 0;
        for kind in SectionKind::ORDER {
            let heading = format!("<h2>{}</h2>", kind.title());
            let pos = html[cursor..]
                .find(&heading)
                .unwrap_or_else(|| panic!("{heading} missing or out of order"));
            cursor += pos + heading.len();
        }
    }

    #[test]
    fn test_chart_containers_hold_static_svg() {
        let html = report_markup(&sample());
        for id in [
            "archetype-chart-container",
            "emotion-chart-container",
            "insight-graph-container",
        ] {
            let start = html.find(&format!("id=\"{id}\"")).unwrap();
            let after = &html[start..];
            let close = after.find("</div>").unwrap();
            assert!(after[..close].contains("<svg"), "{id} has no svg");
        }
    }

    #[test]
    fn test_empty_graph_message() {
        let mut report = sample();
        report.insight_graph.data.themes.clear();
        let html = report_markup(&report);
        assert!(html.contains("No graph data to display."));
    }

    #[test]
    fn test_reading_guide_rendered_only_for_charts() {
        let html = report_markup(&sample());
        assert_eq!(html.matches("How to read this chart:").count(), 3);
    }

    #[test]
    fn test_user_text_is_escaped() {
        let mut report = sample();
        report.narrative_summary = "<script>alert(1)</script>".to_string();
        let html = report_markup(&report);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
