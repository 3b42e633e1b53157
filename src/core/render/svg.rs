//! SVG serialization
//!
//! Marks are converted to pre-formatted rows and fed to the `network.svg`
//! askama template. Every other output format starts from this document.

use super::{Figure, LegendEntry, LineStyle};
use crate::core::error::{NutrinetError, Result};
use crate::core::layout::Point;
use askama::Template;

/// Font stack for every text element
const FONT_FAMILY: &str = "DejaVu Sans, Helvetica, Arial, sans-serif";
const TITLE_FONT: f64 = 16.0;
const EDGE_LABEL_FONT: f64 = 12.0;
const LEGEND_FONT: f64 = 10.0;
const LEGEND_ROW: f64 = 16.0;
const LEGEND_PADDING: f64 = 8.0;
/// Width of the swatch/line-sample column
const LEGEND_SAMPLE: f64 = 26.0;
/// Rough advance of one legend character, used to size the box
const LEGEND_CHAR_WIDTH: f64 = 5.6;

fn num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.abs() < f64::EPSILON {
        // avoid "-0"
        "0".to_string()
    } else {
        format!("{rounded}")
    }
}

fn pair(p: Point) -> String {
    format!("{},{}", num(p.x), num(p.y))
}

struct SvgText {
    x: String,
    y: String,
    text: String,
    color: &'static str,
}

struct SvgEdge {
    kind: &'static str,
    source: String,
    target: String,
    path: String,
    head: String,
    color: String,
    width: String,
    opacity: String,
    dash: Option<&'static str>,
}

struct SvgNode {
    name: String,
    cx: String,
    cy: String,
    r: String,
    fill: String,
}

struct SvgSwatch {
    cx: String,
    cy: String,
    r: String,
    fill: String,
}

struct SvgLine {
    x1: String,
    x2: String,
    y: String,
    color: String,
    width: String,
    opacity: String,
    dash: Option<&'static str>,
}

struct SvgLegendRow {
    label: String,
    text_x: String,
    text_y: String,
    swatch: Option<SvgSwatch>,
    line: Option<SvgLine>,
}

struct SvgLegend {
    x: String,
    y: String,
    width: String,
    height: String,
    rows: Vec<SvgLegendRow>,
}

#[derive(Template)]
#[template(path = "network.svg", escape = "html")]
struct NetworkSvg {
    width: String,
    height: String,
    font_family: &'static str,
    title_font: String,
    node_font: String,
    edge_label_font: String,
    legend_font: String,
    title: Option<SvgText>,
    edges: Vec<SvgEdge>,
    nodes: Vec<SvgNode>,
    edge_labels: Vec<SvgText>,
    legend: Option<SvgLegend>,
}

impl SvgEdge {
    fn from_mark(edge: &super::EdgeMark) -> Self {
        let arrow = &edge.arrow;
        Self {
            kind: match edge.style {
                LineStyle::Solid => "synergistic",
                LineStyle::Dashed => "antagonistic",
            },
            source: edge.source.clone(),
            target: edge.target.clone(),
            path: format!(
                "M {} Q {} {}",
                pair(arrow.start),
                pair(arrow.control),
                pair(arrow.end)
            ),
            head: arrow.head.iter().map(|p| pair(*p)).collect::<Vec<_>>().join(" "),
            color: edge.color.clone(),
            width: num(edge.width),
            opacity: num(edge.opacity),
            dash: edge.style.dash_array(),
        }
    }
}

impl SvgLegend {
    #[allow(clippy::cast_precision_loss)]
    fn from_legend(legend: &super::Legend) -> Self {
        let origin = legend.origin;
        let longest = legend
            .entries
            .iter()
            .map(|entry| match entry {
                LegendEntry::Swatch { label, .. }
                | LegendEntry::Line { label, .. }
                | LegendEntry::Strength { label, .. } => label.chars().count(),
            })
            .max()
            .unwrap_or(0);

        let sample_x = origin.x + LEGEND_PADDING;
        let text_x = sample_x + LEGEND_SAMPLE;
        let rows = legend
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let y = (i as f64)
                    .mul_add(LEGEND_ROW, origin.y + LEGEND_PADDING + LEGEND_ROW / 2.0);
                let sample = |color: &str, width: f64, opacity: f64, dash| SvgLine {
                    x1: num(sample_x),
                    x2: num(sample_x + LEGEND_SAMPLE - 6.0),
                    y: num(y),
                    color: color.to_string(),
                    width: num(width),
                    opacity: num(opacity),
                    dash,
                };
                match entry {
                    LegendEntry::Swatch { label, color } => SvgLegendRow {
                        label: label.clone(),
                        text_x: num(text_x),
                        text_y: num(y),
                        swatch: Some(SvgSwatch {
                            cx: num(sample_x + LEGEND_SAMPLE / 2.0 - 4.0),
                            cy: num(y),
                            r: num(5.0),
                            fill: color.clone(),
                        }),
                        line: None,
                    },
                    LegendEntry::Line {
                        label,
                        style,
                        color,
                    } => SvgLegendRow {
                        label: label.clone(),
                        text_x: num(text_x),
                        text_y: num(y),
                        swatch: None,
                        line: Some(sample(color.as_str(), 2.0, 1.0, style.dash_array())),
                    },
                    LegendEntry::Strength {
                        label,
                        width,
                        opacity,
                        color,
                    } => SvgLegendRow {
                        label: label.clone(),
                        text_x: num(text_x),
                        text_y: num(y),
                        swatch: None,
                        line: Some(sample(color.as_str(), *width, *opacity, None)),
                    },
                }
            })
            .collect();

        let width =
            (longest as f64).mul_add(LEGEND_CHAR_WIDTH, 2.0 * LEGEND_PADDING + LEGEND_SAMPLE);
        let height = (legend.entries.len() as f64).mul_add(LEGEND_ROW, 2.0 * LEGEND_PADDING);
        Self {
            x: num(origin.x),
            y: num(origin.y),
            width: num(width),
            height: num(height),
            rows,
        }
    }
}

impl Figure {
    /// Serialize the figure as a standalone SVG document
    ///
    /// Dimensions are in points (72 per inch).
    ///
    /// # Errors
    /// Returns `Svg` if the template fails to render
    pub fn to_svg(&self) -> Result<String> {
        let template = NetworkSvg {
            width: num(self.width),
            height: num(self.height),
            font_family: FONT_FAMILY,
            title_font: num(TITLE_FONT),
            node_font: num(self.font_size),
            edge_label_font: num(EDGE_LABEL_FONT),
            legend_font: num(LEGEND_FONT),
            title: self.title.as_ref().map(|t| SvgText {
                x: num(t.position.x),
                y: num(t.position.y),
                text: t.text.clone(),
                color: "#222222",
            }),
            edges: self.edges.iter().map(SvgEdge::from_mark).collect(),
            nodes: self
                .nodes
                .iter()
                .map(|node| SvgNode {
                    name: node.name.clone(),
                    cx: num(node.center.x),
                    cy: num(node.center.y),
                    r: num(node.radius),
                    fill: node.fill.clone(),
                })
                .collect(),
            edge_labels: self
                .edges
                .iter()
                .filter_map(|edge| {
                    edge.label.as_ref().map(|label| SvgText {
                        x: num(label.position.x),
                        y: num(label.position.y),
                        text: label.text.clone(),
                        color: super::polarity_color(edge.polarity),
                    })
                })
                .collect(),
            legend: self.legend.as_ref().map(SvgLegend::from_legend),
        };
        template
            .render()
            .map_err(|e| NutrinetError::Svg(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dataset::Dataset;
    use crate::core::layout::{ForceLayout, LayoutParams};
    use crate::core::render::{FigureBuilder, RenderOptions};

    fn svg(options: &RenderOptions) -> String {
        let network = Dataset::builtin().into_network().unwrap();
        let layout = ForceLayout::new(LayoutParams::default().with_seed(3)).compute(&network);
        FigureBuilder::new(options)
            .build(&network, &layout)
            .to_svg()
            .unwrap()
    }

    #[test]
    fn test_num_formatting() {
        assert_eq!(num(1.0), "1");
        assert_eq!(num(2.345_67), "2.35");
        assert_eq!(num(-0.001), "0");
    }

    #[test]
    fn test_document_contains_every_mark() {
        let doc = svg(&RenderOptions::default());
        assert!(doc.starts_with("<svg"));
        assert!(doc.trim_end().ends_with("</svg>"));
        assert_eq!(doc.matches("class=\"node\"").count(), 20);
        assert_eq!(doc.matches("class=\"arrowhead\"").count(), 24);
        assert_eq!(doc.matches("class=\"edge-label\"").count(), 24);
        assert!(doc.contains("class=\"legend\""));
        assert!(doc.contains("width=\"864\""));
    }

    #[test]
    fn test_dash_pattern_only_on_antagonistic_edges() {
        let doc = svg(&RenderOptions::default());
        let dashed = doc.matches("stroke-dasharray=\"6 4\"").count();
        let antagonistic = doc.matches("class=\"edge antagonistic\"").count();
        assert!(antagonistic > 0);
        // one per antagonistic edge plus the legend sample
        assert_eq!(dashed, antagonistic + 1);
    }

    #[test]
    fn test_legend_draws_strength_samples() {
        let doc = svg(&RenderOptions::default());
        assert_eq!(doc.matches("class=\"legend-line\"").count(), 5);
        for label in ["High Impact", "Medium Impact", "Low Impact"] {
            assert!(doc.contains(&format!(">{label}</text>")), "missing {label}");
        }
        assert!(doc.contains("stroke-width=\"2.5\" stroke-opacity=\"0.9\""));
        assert!(doc.contains("stroke-width=\"1.2\" stroke-opacity=\"0.5\""));
    }

    #[test]
    fn test_node_labels_have_halo() {
        let doc = svg(&RenderOptions::default());
        let start = doc.find("class=\"node-labels\"").unwrap();
        let group = &doc[start..doc[start..].find('>').unwrap() + start];
        assert!(group.contains("stroke=\"#ffffff\""));
        assert!(group.contains("paint-order=\"stroke\""));
    }

    #[test]
    fn test_names_are_escaped() {
        let doc = svg(&RenderOptions::default());
        assert!(doc.contains("Electrolytes &amp; Fluid Balance"));
        assert!(!doc.contains("Electrolytes & Fluid"));
    }

    #[test]
    fn test_title_and_legend_toggle() {
        let options = RenderOptions {
            title: Some("Minerals".to_string()),
            show_legend: false,
            ..RenderOptions::default()
        };
        let doc = svg(&options);
        assert!(doc.contains(">Minerals</text>"));
        assert!(!doc.contains("class=\"legend\""));
    }
}
