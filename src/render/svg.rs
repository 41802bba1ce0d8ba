//! @ai:module:intent Static SVG renditions of the three report charts
//! @ai:module:layer infrastructure
//! @ai:module:public_api pie_svg, emotion_svg, graph_svg
//! @ai:module:stateless true

use super::html::escape_html;
use crate::charts::{
    axis_label, slice_rgb, EmotionSample, GraphLayout, PieSlice, FONT_SIZE, LINE_SPACING,
    NODE_RADIUS,
};
use anyhow::Result;
use plotters::prelude::*;
use std::f64::consts::PI;

const PIE_SIZE: (u32, u32) = (460, 260);
const TIMELINE_SIZE: (u32, u32) = (560, 280);

const INK: RGBColor = RGBColor(0x33, 0x41, 0x55);
const LINE: RGBColor = RGBColor(0x81, 0x8C, 0xF8);
const POINT: RGBColor = RGBColor(0x38, 0xBD, 0xF8);

/// @ai:intent Pie chart: one sector per slice, legend on the right
/// @ai:pre slices is non-empty
/// @ai:effects pure
pub fn pie_svg(slices: &[PieSlice]) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, PIE_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let center = (130.0_f64, 130.0_f64);
        let radius = 110.0_f64;
        let total: f64 = slices.iter().map(|s| s.value.max(0.0)).sum();

        if total > 0.0 {
            let mut start = -PI / 2.0;
            for (i, slice) in slices.iter().enumerate() {
                let sweep = slice.value.max(0.0) / total * 2.0 * PI;
                if sweep <= 0.0 {
                    continue;
                }
                let (r, g, b) = slice_rgb(i);
                root.draw(&Polygon::new(
                    sector_points(center, radius, start, sweep),
                    RGBColor(r, g, b).filled(),
                ))?;
                start += sweep;
            }
        } else {
            root.draw(&Circle::new(
                (center.0 as i32, center.1 as i32),
                radius as i32,
                INK.mix(0.3).stroke_width(1),
            ))?;
        }

        for (i, slice) in slices.iter().enumerate() {
            let (r, g, b) = slice_rgb(i);
            let y = 30 + i as i32 * 22;
            root.draw(&Rectangle::new(
                [(270, y), (282, y + 12)],
                RGBColor(r, g, b).filled(),
            ))?;
            root.draw(&Text::new(
                slice.tooltip(),
                (290, y),
                ("sans-serif", 13).into_font().color(&INK),
            ))?;
        }

        root.present()?;
    }
    Ok(svg)
}

/// @ai:intent Polygon approximating one clockwise sector
/// @ai:effects pure
fn sector_points(center: (f64, f64), radius: f64, start: f64, sweep: f64) -> Vec<(i32, i32)> {
    let steps = ((sweep.to_degrees() / 2.0).ceil() as usize).max(1);
    let mut points = Vec::with_capacity(steps + 2);
    points.push((center.0.round() as i32, center.1.round() as i32));
    for k in 0..=steps {
        let angle = start + sweep * k as f64 / steps as f64;
        points.push((
            (center.0 + radius * angle.cos()).round() as i32,
            (center.1 + radius * angle.sin()).round() as i32,
        ));
    }
    points
}

/// @ai:intent Line chart of ordinal emotion values in segment order
/// @ai:pre samples is ordered by segment
/// @ai:post x ticks are bounded by the sample count, not by segment numbers
/// @ai:effects pure
pub fn emotion_svg(samples: &[EmotionSample]) -> Result<String> {
    let count = i32::try_from(samples.len()).unwrap_or(i32::MAX);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, TIMELINE_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(15)
            .x_label_area_size(30)
            .y_label_area_size(70)
            .build_cartesian_2d(-1i32..count, 0i32..6i32)?;

        chart
            .configure_mesh()
            .y_labels(7)
            .x_labels(samples.len() + 2)
            .y_label_formatter(&|y| axis_label(i64::from(*y)).to_string())
            .x_label_formatter(&|x| {
                usize::try_from(*x)
                    .ok()
                    .and_then(|i| samples.get(i))
                    .map(|s| format!("Phase {}", s.segment))
                    .unwrap_or_default()
            })
            .label_style(("sans-serif", 12).into_font().color(&INK))
            .light_line_style(WHITE)
            .draw()?;

        let points: Vec<(i32, i32)> = (0..count)
            .zip(samples)
            .map(|(x, s)| (x, i32::from(s.value)))
            .collect();

        chart.draw_series(LineSeries::new(points.clone(), LINE.stroke_width(2)))?;
        chart.draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 4, POINT.filled())),
        )?;

        root.present()?;
    }
    Ok(svg)
}

/// @ai:intent Hand-written SVG for the radial theme graph
/// @ai:pre layout has at least one node
/// @ai:effects pure
pub fn graph_svg(layout: &GraphLayout) -> String {
    let mut out = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" class=\"insight-graph\" viewBox=\"0 0 {w} {h}\" width=\"{w}\" height=\"{h}\" role=\"img\">\n",
        w = layout.width,
        h = layout.height
    );
    out.push_str(
        "<defs><marker id=\"arrowhead\" viewBox=\"0 0 10 10\" refX=\"10\" refY=\"5\" markerWidth=\"6\" markerHeight=\"6\" orient=\"auto\"><path d=\"M 0 0 L 10 5 L 0 10 z\" fill=\"#64748b\"/></marker></defs>\n",
    );

    for edge in &layout.edges {
        out.push_str(&format!(
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"#64748b\" stroke-width=\"1.5\" marker-end=\"url(#arrowhead)\"><title>{} \u{2192} {}: {}</title></line>\n",
            edge.x1,
            edge.y1,
            edge.x2,
            edge.y2,
            escape_html(&edge.from),
            escape_html(&edge.to),
            escape_html(&edge.relationship)
        ));
    }

    for (i, node) in layout.nodes.iter().enumerate() {
        let (r, g, b) = slice_rgb(i);
        out.push_str(&format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{}\" fill=\"#{:02X}{:02X}{:02X}\"><title>{}</title></circle>\n",
            node.x,
            node.y,
            NODE_RADIUS,
            r,
            g,
            b,
            escape_html(&node.label)
        ));

        let (lx, ly) = node.label_origin();
        out.push_str(&format!(
            "<text x=\"{lx:.2}\" y=\"{ly:.2}\" text-anchor=\"{}\" font-size=\"{}\" fill=\"#334155\">",
            node.side.text_anchor(),
            FONT_SIZE
        ));
        for (line_no, line) in node.lines.iter().enumerate() {
            let dy = if line_no == 0 { 0.0 } else { LINE_SPACING };
            out.push_str(&format!(
                "<tspan x=\"{lx:.2}\" dy=\"{dy}\">{}</tspan>",
                escape_html(line)
            ));
        }
        out.push_str("</text>\n");
    }

    out.push_str("</svg>");
    out
}
