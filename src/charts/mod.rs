//! @ai:module:intent Pure derivations from report sections to chart-ready series
//! @ai:module:layer domain
//! @ai:module:public_api pie_series, PieSlice, emotion_series, EmotionSample, emotion_score, layout_graph, GraphLayout
//! @ai:module:stateless true

pub mod emotion;
pub mod graph;
pub mod pie;

pub use emotion::{axis_label, emotion_score, emotion_series, Emotion, EmotionSample};
pub use graph::{
    layout_graph, wrap_label, GraphEdge, GraphLayout, GraphNode, LabelSide, FONT_SIZE,
    LINE_SPACING, NODE_RADIUS,
};
pub use pie::{pie_series, slice_color, slice_rgb, PieSlice, PALETTE};
