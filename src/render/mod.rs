//! @ai:module:intent Compose a report into a visual tree and its HTML markup
//! @ai:module:layer infrastructure
//! @ai:module:public_api ReportView, SectionKind, to_html, report_markup, render_pane, escape_html

pub mod html;
pub mod pane;
pub mod svg;
pub mod tree;

pub use html::{escape_html, report_markup, to_html, REPORT_ROOT_ID};
pub use pane::{render_pane, Pane};
pub use svg::{emotion_svg, graph_svg, pie_svg};
pub use tree::{Block, ChartBlock, CommentaryBlock, RenderedSection, ReportView, SectionKind};
