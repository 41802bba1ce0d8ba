//! @ai:module:intent Visual tree of a report: fixed section order, commentary, data blocks
//! @ai:module:layer domain
//! @ai:module:public_api ReportView, RenderedSection, SectionKind, CommentaryBlock, Block, ChartBlock
//! @ai:module:stateless true

use crate::charts::{emotion_series, layout_graph, pie_series, EmotionSample, GraphEdge, GraphLayout, PieSlice};
use crate::model::{
    ActionableRecommendation, AnalysisReport, Archetype, CognitiveBias, Commentary, Contradiction,
    InsightTheme, KeyMetaphor, ParticipantPersona, StuckMoment, SwotAnalysis,
};

/// @ai:intent Report sections, declared in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    ExecutiveSummary,
    NarrativeSummary,
    ArchetypeSplit,
    EmotionTrajectory,
    TopThemes,
    InsightGraph,
    ParticipantPersonas,
    ContradictionFinder,
    AgenticAnalysis,
    ActionableRecommendations,
}

impl SectionKind {
    pub const ORDER: [SectionKind; 10] = [
        SectionKind::ExecutiveSummary,
        SectionKind::NarrativeSummary,
        SectionKind::ArchetypeSplit,
        SectionKind::EmotionTrajectory,
        SectionKind::TopThemes,
        SectionKind::InsightGraph,
        SectionKind::ParticipantPersonas,
        SectionKind::ContradictionFinder,
        SectionKind::AgenticAnalysis,
        SectionKind::ActionableRecommendations,
    ];

    pub fn title(self) -> &'static str {
        match self {
            SectionKind::ExecutiveSummary => "Executive Summary",
            SectionKind::NarrativeSummary => "Narrative Summary",
            SectionKind::ArchetypeSplit => "Archetype Split",
            SectionKind::EmotionTrajectory => "Emotion Trajectory",
            SectionKind::TopThemes => "Top Themes",
            SectionKind::InsightGraph => "Insight Graph Analysis",
            SectionKind::ParticipantPersonas => "Participant Personas",
            SectionKind::ContradictionFinder => "Contradiction Finder",
            SectionKind::AgenticAnalysis => "Agentic Analysis",
            SectionKind::ActionableRecommendations => "Actionable Recommendations",
        }
    }

    /// @ai:intent Stable id used as the HTML anchor
    pub fn slug(self) -> &'static str {
        match self {
            SectionKind::ExecutiveSummary => "executive-summary",
            SectionKind::NarrativeSummary => "narrative-summary",
            SectionKind::ArchetypeSplit => "archetype-split",
            SectionKind::EmotionTrajectory => "emotion-trajectory",
            SectionKind::TopThemes => "top-themes",
            SectionKind::InsightGraph => "insight-graph",
            SectionKind::ParticipantPersonas => "participant-personas",
            SectionKind::ContradictionFinder => "contradiction-finder",
            SectionKind::AgenticAnalysis => "agentic-analysis",
            SectionKind::ActionableRecommendations => "actionable-recommendations",
        }
    }

    /// @ai:intent Whether the section is backed by a chart (and so shows a reading guide)
    pub fn is_chart(self) -> bool {
        matches!(
            self,
            SectionKind::ArchetypeSplit | SectionKind::EmotionTrajectory | SectionKind::InsightGraph
        )
    }
}

/// @ai:intent Commentary as displayed; the reading guide survives only on chart sections
#[derive(Debug, Clone, PartialEq)]
pub struct CommentaryBlock {
    pub objective: String,
    pub key_insights: String,
    pub how_to_read: Option<String>,
}

impl CommentaryBlock {
    fn for_section(commentary: &Commentary, kind: SectionKind) -> Self {
        Self {
            objective: commentary.objective.clone(),
            key_insights: commentary.key_insights.clone(),
            how_to_read: if kind.is_chart() {
                commentary.how_to_read.clone()
            } else {
                None
            },
        }
    }
}

/// @ai:intent Chart slot; each has a fixed container id the export hydrates into
#[derive(Debug, Clone, PartialEq)]
pub enum ChartBlock {
    ArchetypePie(Vec<PieSlice>),
    EmotionTimeline(Vec<EmotionSample>),
    InsightGraph(GraphLayout),
}

impl ChartBlock {
    pub fn container_id(&self) -> &'static str {
        match self {
            ChartBlock::ArchetypePie(_) => "archetype-chart-container",
            ChartBlock::EmotionTimeline(_) => "emotion-chart-container",
            ChartBlock::InsightGraph(_) => "insight-graph-container",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph {
        heading: Option<String>,
        text: String,
    },
    Swot(SwotAnalysis),
    Chart(ChartBlock),
    Archetypes(Vec<Archetype>),
    Themes(Vec<InsightTheme>),
    Connections {
        edges: Vec<GraphEdge>,
        summary: String,
    },
    Personas(Vec<ParticipantPersona>),
    Contradictions(Vec<Contradiction>),
    StuckMoments(Vec<StuckMoment>),
    CognitiveBiases(Vec<CognitiveBias>),
    KeyMetaphors(Vec<KeyMetaphor>),
    Recommendations(Vec<ActionableRecommendation>),
}

fn paragraph(heading: Option<&str>, text: &str) -> Block {
    Block::Paragraph {
        heading: heading.map(str::to_string),
        text: text.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSection {
    pub kind: SectionKind,
    pub commentary: Option<CommentaryBlock>,
    pub blocks: Vec<Block>,
}

impl RenderedSection {
    pub fn title(&self) -> &'static str {
        self.kind.title()
    }
}

/// @ai:intent Whole report as an ordered list of sections
#[derive(Debug, Clone, PartialEq)]
pub struct ReportView {
    pub sections: Vec<RenderedSection>,
}

impl ReportView {
    /// @ai:intent Build every section in display order; personas only when present
    /// @ai:effects pure
    pub fn build(report: &AnalysisReport) -> Self {
        let sections = SectionKind::ORDER
            .iter()
            .filter_map(|&kind| build_section(report, kind))
            .collect();
        Self { sections }
    }

    pub fn kinds(&self) -> Vec<SectionKind> {
        self.sections.iter().map(|s| s.kind).collect()
    }

    pub fn section(&self, kind: SectionKind) -> Option<&RenderedSection> {
        self.sections.iter().find(|s| s.kind == kind)
    }
}

fn build_section(report: &AnalysisReport, kind: SectionKind) -> Option<RenderedSection> {
    let commentary = |c: &Commentary| Some(CommentaryBlock::for_section(c, kind));

    let (commentary, blocks) = match kind {
        SectionKind::ExecutiveSummary => {
            let summary = &report.executive_summary;
            (
                None,
                vec![
                    paragraph(None, &summary.summary),
                    Block::Swot(summary.swot.clone()),
                    paragraph(
                        Some("Strategic Recommendations"),
                        &summary.strategic_recommendations,
                    ),
                ],
            )
        }
        SectionKind::NarrativeSummary => (None, vec![paragraph(None, &report.narrative_summary)]),
        SectionKind::ArchetypeSplit => {
            let section = &report.archetype_mapping;
            (
                commentary(&section.commentary),
                vec![
                    Block::Chart(ChartBlock::ArchetypePie(pie_series(&section.data))),
                    Block::Archetypes(section.data.clone()),
                ],
            )
        }
        SectionKind::EmotionTrajectory => {
            let section = &report.emotion_trajectory;
            (
                commentary(&section.commentary),
                vec![Block::Chart(ChartBlock::EmotionTimeline(emotion_series(
                    &section.data,
                )))],
            )
        }
        SectionKind::TopThemes => {
            let section = &report.top_themes;
            (
                commentary(&section.commentary),
                vec![Block::Themes(section.data.clone())],
            )
        }
        SectionKind::InsightGraph => {
            let section = &report.insight_graph;
            let layout = layout_graph(&section.data);
            let edges = layout.edges.clone();
            (
                commentary(&section.commentary),
                vec![
                    Block::Chart(ChartBlock::InsightGraph(layout)),
                    Block::Connections {
                        edges,
                        summary: section.data.summary.clone(),
                    },
                ],
            )
        }
        SectionKind::ParticipantPersonas => {
            let section = &report.participant_personas;
            if section.data.is_empty() {
                tracing::debug!("No personas in report; skipping section");
                return None;
            }
            (
                commentary(&section.commentary),
                vec![Block::Personas(section.data.clone())],
            )
        }
        SectionKind::ContradictionFinder => {
            let section = &report.contradiction_finder;
            (
                commentary(&section.commentary),
                vec![Block::Contradictions(section.data.clone())],
            )
        }
        SectionKind::AgenticAnalysis => {
            let agentic = &report.agentic_analysis;
            let mut blocks = vec![paragraph(None, &agentic.summary)];
            if !agentic.stuck_moments.is_empty() {
                blocks.push(Block::StuckMoments(agentic.stuck_moments.clone()));
            }
            if !agentic.cognitive_biases.is_empty() {
                blocks.push(Block::CognitiveBiases(agentic.cognitive_biases.clone()));
            }
            if !agentic.key_metaphors.is_empty() {
                blocks.push(Block::KeyMetaphors(agentic.key_metaphors.clone()));
            }
            (commentary(&agentic.commentary), blocks)
        }
        SectionKind::ActionableRecommendations => {
            let section = &report.actionable_recommendations;
            (
                commentary(&section.commentary),
                vec![Block::Recommendations(section.data.clone())],
            )
        }
    };

    Some(RenderedSection {
        kind,
        commentary,
        blocks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SAMPLE_REPORT_JSON;
    use pretty_assertions::assert_eq;

    fn sample() -> AnalysisReport {
        serde_json::from_str(SAMPLE_REPORT_JSON).unwrap()
    }

    #[test]
    fn test_sections_follow_fixed_order() {
        let view = ReportView::build(&sample());
        assert_eq!(view.kinds(), SectionKind::ORDER.to_vec());
    }

    #[test]
    fn test_personas_skipped_when_empty() {
        let mut report = sample();
        report.participant_personas.data.clear();
        let view = ReportView::build(&report);

        let expected: Vec<SectionKind> = SectionKind::ORDER
            .iter()
            .copied()
            .filter(|k| *k != SectionKind::ParticipantPersonas)
            .collect();
        assert_eq!(view.kinds(), expected);
        assert!(view.section(SectionKind::ParticipantPersonas).is_none());
    }

    #[test]
    fn test_summaries_have_no_commentary() {
        let view = ReportView::build(&sample());
        for kind in [SectionKind::ExecutiveSummary, SectionKind::NarrativeSummary] {
            assert!(view.section(kind).unwrap().commentary.is_none());
        }
        for kind in &SectionKind::ORDER[2..] {
            assert!(view.section(*kind).unwrap().commentary.is_some(), "{kind:?}");
        }
    }

    #[test]
    fn test_how_to_read_only_on_chart_sections() {
        let mut report = sample();
        report.top_themes.commentary.how_to_read = Some("stray guide".to_string());
        let view = ReportView::build(&report);

        for section in &view.sections {
            let Some(commentary) = &section.commentary else {
                continue;
            };
            assert_eq!(
                commentary.how_to_read.is_some(),
                section.kind.is_chart(),
                "{:?}",
                section.kind
            );
        }
    }

    #[test]
    fn test_graph_section_lists_only_resolved_edges() {
        let mut report = sample();
        report.insight_graph.data.connections.push(crate::model::InsightConnection {
            from: "Nowhere".to_string(),
            to: report.insight_graph.data.themes[0].clone(),
            relationship: "dangling".to_string(),
        });
        let resolvable = report.insight_graph.data.connections.len() - 1;

        let view = ReportView::build(&report);
        let section = view.section(SectionKind::InsightGraph).unwrap();
        let Block::Connections { edges, .. } = &section.blocks[1] else {
            panic!("expected connections block");
        };
        assert_eq!(edges.len(), resolvable);
    }

    #[test]
    fn test_chart_container_ids() {
        let view = ReportView::build(&sample());
        let ids: Vec<&str> = view
            .sections
            .iter()
            .flat_map(|s| s.blocks.iter())
            .filter_map(|b| match b {
                Block::Chart(chart) => Some(chart.container_id()),
                _ => None,
            })
            .collect();
        assert_eq!(
            ids,
            vec![
                "archetype-chart-container",
                "emotion-chart-container",
                "insight-graph-container"
            ]
        );
    }
}
