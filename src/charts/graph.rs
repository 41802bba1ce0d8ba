//! @ai:module:intent Radial layout for the insight graph
//! @ai:module:layer domain
//! @ai:module:public_api layout_graph, GraphLayout, GraphNode, GraphEdge, LabelSide, wrap_label
//! @ai:module:stateless true
//!
//! Nodes sit on one circle, starting at 12 o'clock and going clockwise.
//! Edges stop short of the target circle so the arrowhead stays visible.

use crate::model::InsightGraph;
use std::collections::HashMap;
use std::f64::consts::PI;

pub const CANVAS_WIDTH: f64 = 500.0;
pub const CANVAS_HEIGHT: f64 = 300.0;
pub const NODE_RADIUS: f64 = 8.0;
pub const ARROW_MARGIN: f64 = 2.0;
pub const FONT_SIZE: f64 = 11.0;
pub const LINE_SPACING: f64 = FONT_SIZE + 2.0;
pub const LABEL_GAP: f64 = 5.0;
/// Characters per label line before wrapping.
pub const LINE_BUDGET: usize = 20;

/// @ai:intent Which side of its node a label is drawn on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSide {
    Top,
    Right,
    Bottom,
    Left,
}

impl LabelSide {
    /// @ai:intent Bucket a layout angle by screen side, 10 degree dead zones at top and bottom
    /// @ai:effects pure
    pub fn for_angle(angle: f64) -> Self {
        // Clockwise from 12 o'clock, in [0, 360).
        let clock = (angle + PI / 2.0).to_degrees().rem_euclid(360.0);
        if clock <= 10.0 || clock >= 350.0 {
            LabelSide::Top
        } else if clock < 170.0 {
            LabelSide::Right
        } else if clock <= 190.0 {
            LabelSide::Bottom
        } else {
            LabelSide::Left
        }
    }

    /// @ai:intent SVG text-anchor value
    /// @ai:effects pure
    pub fn text_anchor(self) -> &'static str {
        match self {
            LabelSide::Right => "start",
            LabelSide::Left => "end",
            LabelSide::Top | LabelSide::Bottom => "middle",
        }
    }

    /// @ai:intent Label offset from the node center
    /// @ai:effects pure
    pub fn offset(self) -> (f64, f64) {
        let gap = NODE_RADIUS + LABEL_GAP;
        match self {
            LabelSide::Right => (gap, FONT_SIZE / 3.0),
            LabelSide::Left => (-gap, FONT_SIZE / 3.0),
            LabelSide::Top => (0.0, -gap),
            LabelSide::Bottom => (0.0, gap + LABEL_GAP),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    pub label: String,
    pub angle: f64,
    pub x: f64,
    pub y: f64,
    pub side: LabelSide,
    pub lines: Vec<String>,
}

impl GraphNode {
    /// @ai:intent Position of the first label line, vertically centered on the block
    /// @ai:effects pure
    pub fn label_origin(&self) -> (f64, f64) {
        let (dx, dy) = self.side.offset();
        let extra_lines = self.lines.len().saturating_sub(1) as f64;
        let vertical_adjust = -(extra_lines * LINE_SPACING) / 2.0;
        (self.x + dx, self.y + dy + vertical_adjust)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    pub relationship: String,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphLayout {
    pub width: f64,
    pub height: f64,
    pub radius: f64,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphLayout {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// @ai:intent Greedily pack words into lines under a character budget
/// @ai:post a single word longer than the budget occupies its own line
/// @ai:effects pure
pub fn wrap_label(label: &str, budget: usize) -> Vec<String> {
    let mut words = label.split_whitespace();
    let Some(first) = words.next() else {
        return vec![String::new()];
    };

    let mut lines = Vec::new();
    let mut current = first.to_string();
    for word in words {
        if current.chars().count() + 1 + word.chars().count() > budget {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current.push(' ');
            current.push_str(word);
        }
    }
    lines.push(current);
    lines
}

/// @ai:intent Place themes on a circle and keep only resolvable connections
/// @ai:post every edge endpoint names a node; nodes.len() == themes.len()
/// @ai:effects pure
pub fn layout_graph(graph: &InsightGraph) -> GraphLayout {
    let center_x = CANVAS_WIDTH / 2.0;
    let center_y = CANVAS_HEIGHT / 2.0;
    let radius = center_x.min(center_y) * 0.7;

    let count = graph.themes.len();
    if count == 0 {
        return GraphLayout {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            radius,
            nodes: Vec::new(),
            edges: Vec::new(),
        };
    }

    let step = 2.0 * PI / count as f64;
    let nodes: Vec<GraphNode> = graph
        .themes
        .iter()
        .enumerate()
        .map(|(i, theme)| {
            let angle = i as f64 * step - PI / 2.0;
            GraphNode {
                label: theme.clone(),
                angle,
                x: center_x + radius * angle.cos(),
                y: center_y + radius * angle.sin(),
                side: LabelSide::for_angle(angle),
                lines: wrap_label(theme, LINE_BUDGET),
            }
        })
        .collect();

    let by_label: HashMap<&str, &GraphNode> =
        nodes.iter().map(|n| (n.label.as_str(), n)).collect();

    let edges: Vec<GraphEdge> = graph
        .connections
        .iter()
        .filter_map(|conn| {
            let (Some(source), Some(target)) =
                (by_label.get(conn.from.as_str()), by_label.get(conn.to.as_str()))
            else {
                tracing::debug!(
                    "Dropping graph edge {} -> {}: endpoint is not a declared theme",
                    conn.from,
                    conn.to
                );
                return None;
            };

            let dx = target.x - source.x;
            let dy = target.y - source.y;
            let dist = (dx * dx + dy * dy).sqrt();
            let (x2, y2) = if dist > f64::EPSILON {
                let shorten = NODE_RADIUS + ARROW_MARGIN;
                (target.x - dx / dist * shorten, target.y - dy / dist * shorten)
            } else {
                (target.x, target.y)
            };

            Some(GraphEdge {
                from: conn.from.clone(),
                to: conn.to.clone(),
                relationship: conn.relationship.clone(),
                x1: source.x,
                y1: source.y,
                x2,
                y2,
            })
        })
        .collect();

    GraphLayout {
        width: CANVAS_WIDTH,
        height: CANVAS_HEIGHT,
        radius,
        nodes,
        edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InsightConnection;

    fn graph(themes: &[&str], connections: &[(&str, &str)]) -> InsightGraph {
        InsightGraph {
            themes: themes.iter().map(|t| t.to_string()).collect(),
            connections: connections
                .iter()
                .map(|(from, to)| InsightConnection {
                    from: from.to_string(),
                    to: to.to_string(),
                    relationship: "leads to".to_string(),
                })
                .collect(),
            summary: String::new(),
        }
    }

    #[test]
    fn test_node_angles_follow_index() {
        for n in 1..=7 {
            let labels: Vec<String> = (0..n).map(|i| format!("T{i}")).collect();
            let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
            let layout = layout_graph(&graph(&refs, &[]));
            assert_eq!(layout.nodes.len(), n);
            for (i, node) in layout.nodes.iter().enumerate() {
                let expected = i as f64 * 2.0 * PI / n as f64 - PI / 2.0;
                assert!((node.angle - expected).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_nodes_share_one_circle() {
        let layout = layout_graph(&graph(&["A", "B", "C", "D", "E"], &[]));
        let (cx, cy) = (CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0);
        assert!((layout.radius - 105.0).abs() < 1e-9);
        for node in &layout.nodes {
            let dist = ((node.x - cx).powi(2) + (node.y - cy).powi(2)).sqrt();
            assert!((dist - layout.radius).abs() < 1e-9);
        }
        assert!((layout.nodes[0].x - cx).abs() < 1e-9);
        assert!((layout.nodes[0].y - (cy - layout.radius)).abs() < 1e-9);
    }

    #[test]
    fn test_unresolvable_connections_are_dropped() {
        let layout = layout_graph(&graph(&["A", "B"], &[("A", "B"), ("A", "C")]));
        assert_eq!(layout.edges.len(), 1);
        assert_eq!(layout.edges[0].from, "A");
        assert_eq!(layout.edges[0].to, "B");
    }

    #[test]
    fn test_edges_stop_short_of_target() {
        let layout = layout_graph(&graph(&["A", "B"], &[("A", "B")]));
        let edge = &layout.edges[0];
        let target = &layout.nodes[1];
        let gap = ((target.x - edge.x2).powi(2) + (target.y - edge.y2).powi(2)).sqrt();
        assert!((gap - (NODE_RADIUS + ARROW_MARGIN)).abs() < 1e-9);
        assert_eq!((edge.x1, edge.y1), (layout.nodes[0].x, layout.nodes[0].y));
    }

    #[test]
    fn test_label_sides_for_four_nodes() {
        let layout = layout_graph(&graph(&["N", "E", "S", "W"], &[]));
        let sides: Vec<LabelSide> = layout.nodes.iter().map(|n| n.side).collect();
        assert_eq!(
            sides,
            vec![LabelSide::Top, LabelSide::Right, LabelSide::Bottom, LabelSide::Left]
        );
        assert_eq!(LabelSide::Right.text_anchor(), "start");
        assert_eq!(LabelSide::Left.text_anchor(), "end");
        assert_eq!(LabelSide::Top.text_anchor(), "middle");
        assert!(LabelSide::Top.offset().1 < 0.0);
        assert!(LabelSide::Bottom.offset().1 > 0.0);
    }

    #[test]
    fn test_wrap_label_packs_words_greedily() {
        assert_eq!(wrap_label("Trust", 20), vec!["Trust"]);
        assert_eq!(
            wrap_label("Weeknight convenience matters most", 20),
            vec!["Weeknight", "convenience matters", "most"]
        );
        assert_eq!(
            wrap_label("Supercalifragilisticexpialidocious idea", 20),
            vec!["Supercalifragilisticexpialidocious", "idea"]
        );
        assert_eq!(wrap_label("", 20), vec![""]);
    }

    #[test]
    fn test_multiline_labels_are_vertically_centered() {
        let layout = layout_graph(&graph(&["Weeknight convenience matters most", "B"], &[]));
        let node = &layout.nodes[0];
        assert_eq!(node.lines.len(), 3);
        let (_, y) = node.label_origin();
        let expected = node.y + node.side.offset().1 - LINE_SPACING;
        assert!((y - expected).abs() < 1e-9);
    }

    #[test]
    fn test_empty_theme_list_yields_empty_layout() {
        let layout = layout_graph(&graph(&[], &[("A", "B")]));
        assert!(layout.is_empty());
        assert!(layout.edges.is_empty());
    }
}
