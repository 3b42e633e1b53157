//! Figure rendering
//!
//! [`FigureBuilder`] turns a network and its layout into a [`Figure`]: a flat
//! scene of node marks, curved arrows, edge labels and a legend in canvas
//! coordinates (points, y pointing down). The figure is serialized to SVG and
//! from there to the raster/print formats in [`formats`].

pub mod formats;
pub mod geometry;
pub mod svg;
pub mod viewer;

use crate::config::RenderConfig;
use crate::core::layout::{Layout, Point};
use crate::core::models::{Network, Polarity, Strength};
use geometry::CurvedArrow;

pub use formats::{save_figure, FigureExporter, OutputFormat};
pub use viewer::Viewer;

/// SVG user units per inch
pub const POINTS_PER_INCH: f64 = 72.0;

/// Stroke color of synergistic edges
const SYNERGISTIC_COLOR: &str = "#27AE60";
/// Stroke color of antagonistic edges
const ANTAGONISTIC_COLOR: &str = "#E74C3C";
/// Stroke color of the strength samples in the legend
const STRENGTH_SAMPLE_COLOR: &str = "#808080";
/// Canvas margin around the plot area
const MARGIN: f64 = 48.0;
/// Extra top margin reserved for the title
const TITLE_SPACE: f64 = 40.0;
/// Arrowhead length
const ARROW_LENGTH: f64 = 10.0;
/// Distance between an edge label and its curve
const LABEL_OFFSET: f64 = 7.0;

/// Line style of an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// Continuous stroke
    Solid,
    /// Dashed stroke
    Dashed,
}

impl LineStyle {
    /// Synergistic edges are solid, antagonistic edges are dashed
    #[must_use]
    pub const fn for_polarity(polarity: Polarity) -> Self {
        match polarity {
            Polarity::Synergistic => Self::Solid,
            Polarity::Antagonistic => Self::Dashed,
        }
    }

    /// SVG `stroke-dasharray` value, `None` for solid lines
    #[must_use]
    pub const fn dash_array(self) -> Option<&'static str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("6 4"),
        }
    }
}

/// Stroke color of an edge with the given polarity
#[must_use]
pub const fn polarity_color(polarity: Polarity) -> &'static str {
    match polarity {
        Polarity::Synergistic => SYNERGISTIC_COLOR,
        Polarity::Antagonistic => ANTAGONISTIC_COLOR,
    }
}

/// Options controlling how a figure is drawn
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Figure width in inches
    pub width_in: f64,
    /// Figure height in inches
    pub height_in: f64,
    /// Raster resolution
    pub dpi: u32,
    /// Draw the legend
    pub show_legend: bool,
    /// Draw edge labels
    pub show_labels: bool,
    /// Draw edges
    pub show_edges: bool,
    /// Title drawn above the plot
    pub title: Option<String>,
    /// Edge curvature relative to edge length
    pub curvature: f64,
    /// Node circle radius in points
    pub node_radius: f64,
    /// Node label font size in points
    pub font_size: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from_config(&RenderConfig::default())
    }
}

impl RenderOptions {
    /// Build options from the `[render]` config section
    ///
    /// A non-finite curvature falls back to the default one.
    #[must_use]
    pub fn from_config(config: &RenderConfig) -> Self {
        let title = config.title.trim();
        let curvature = if config.curvature.is_finite() {
            config.curvature
        } else {
            RenderConfig::default().curvature
        };
        Self {
            width_in: f64::from(config.width),
            height_in: f64::from(config.height),
            dpi: config.dpi.max(1),
            show_legend: config.legend,
            show_labels: config.labels,
            show_edges: config.edges,
            title: (!title.is_empty()).then(|| title.to_string()),
            curvature: f64::from(curvature),
            node_radius: 16.0,
            font_size: 9.0,
        }
    }
}

/// A nutrient drawn as a filled circle with its name
#[derive(Debug, Clone, PartialEq)]
pub struct NodeMark {
    /// Nutrient name (also the label text)
    pub name: String,
    /// Circle center
    pub center: Point,
    /// Circle radius
    pub radius: f64,
    /// Fill color
    pub fill: String,
}

/// Text placed at a point, centered
#[derive(Debug, Clone, PartialEq)]
pub struct TextMark {
    /// Text content
    pub text: String,
    /// Anchor point
    pub position: Point,
}

/// An interaction drawn as a curved arrow
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeMark {
    /// Source nutrient name
    pub source: String,
    /// Target nutrient name
    pub target: String,
    /// Interaction polarity
    pub polarity: Polarity,
    /// Solid or dashed, derived from polarity
    pub style: LineStyle,
    /// Stroke color
    pub color: String,
    /// Stroke width
    pub width: f64,
    /// Stroke opacity
    pub opacity: f64,
    /// Curve and arrowhead geometry
    pub arrow: CurvedArrow,
    /// Mid-edge label, absent when labels are hidden
    pub label: Option<TextMark>,
}

/// One row of the legend
#[derive(Debug, Clone, PartialEq)]
pub enum LegendEntry {
    /// A color swatch for a functional group
    Swatch {
        /// Group name
        label: String,
        /// Group color
        color: String,
    },
    /// A line sample for an interaction type
    Line {
        /// Description
        label: String,
        /// Line style sample
        style: LineStyle,
        /// Line color
        color: String,
    },
    /// A neutral line sample for an interaction strength
    Strength {
        /// Description
        label: String,
        /// Stroke width, as drawn on edges of this strength
        width: f64,
        /// Stroke opacity, as drawn on edges of this strength
        opacity: f64,
        /// Line color
        color: String,
    },
}

/// Legend box in the upper-left corner
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    /// Top-left corner of the box
    pub origin: Point,
    /// Rows, top to bottom
    pub entries: Vec<LegendEntry>,
}

/// A fully laid out figure, ready to serialize
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    /// Canvas width in points
    pub width: f64,
    /// Canvas height in points
    pub height: f64,
    /// Raster resolution for PNG export
    pub dpi: u32,
    /// Node label font size
    pub font_size: f64,
    /// Title, centered at the top
    pub title: Option<TextMark>,
    /// One mark per nutrient
    pub nodes: Vec<NodeMark>,
    /// One mark per drawn interaction
    pub edges: Vec<EdgeMark>,
    /// Legend, absent when disabled or there is nothing to explain
    pub legend: Option<Legend>,
}

impl Figure {
    /// Number of edge labels in the figure
    #[must_use]
    pub fn label_count(&self) -> usize {
        self.edges.iter().filter(|e| e.label.is_some()).count()
    }

    /// Pixel size of a raster export at the figure's dpi
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = f64::from(self.dpi);
        (
            (self.width * dpi / POINTS_PER_INCH).round().max(1.0) as u32,
            (self.height * dpi / POINTS_PER_INCH).round().max(1.0) as u32,
        )
    }
}

/// Maps layout space (`[-1, 1]²`, y up) onto the canvas (points, y down)
struct CanvasTransform {
    center: Point,
    scale: f64,
}

impl CanvasTransform {
    fn new(width: f64, height: f64, top: f64, inset: f64) -> Self {
        let plot_w = (width - 2.0 * MARGIN - 2.0 * inset).max(1.0);
        let plot_h = (height - top - MARGIN - 2.0 * inset).max(1.0);
        Self {
            center: Point::new(width / 2.0, top + inset + plot_h / 2.0),
            scale: plot_w.min(plot_h) / 2.0,
        }
    }

    fn apply(&self, p: Point) -> Point {
        Point::new(
            self.scale.mul_add(p.x, self.center.x),
            self.scale.mul_add(-p.y, self.center.y),
        )
    }
}

/// Builds a [`Figure`] from a network and its layout
pub struct FigureBuilder<'a> {
    options: &'a RenderOptions,
}

impl<'a> FigureBuilder<'a> {
    /// Create a builder
    #[must_use]
    pub const fn new(options: &'a RenderOptions) -> Self {
        Self { options }
    }

    /// Lay out every mark of the figure
    ///
    /// Produces exactly one node mark per nutrient and, when edges are shown,
    /// one edge mark per interaction. An empty network yields a figure with
    /// no marks.
    #[must_use]
    pub fn build(&self, network: &Network, layout: &Layout) -> Figure {
        let opts = self.options;
        let width = opts.width_in * POINTS_PER_INCH;
        let height = opts.height_in * POINTS_PER_INCH;

        let title = opts.title.as_ref().map(|text| TextMark {
            text: text.clone(),
            position: Point::new(width / 2.0, MARGIN * 0.75),
        });
        let top = if title.is_some() {
            MARGIN + TITLE_SPACE
        } else {
            MARGIN
        };
        // Keep node circles and their labels inside the plot area.
        let transform = CanvasTransform::new(width, height, top, opts.node_radius * 2.0);

        let centers: Vec<Point> = (0..network.nutrient_count())
            .map(|i| transform.apply(layout.position(i).unwrap_or(Point::ORIGIN)))
            .collect();

        let nodes = network
            .nutrients()
            .iter()
            .zip(&centers)
            .map(|(nutrient, center)| NodeMark {
                name: nutrient.name.clone(),
                center: *center,
                radius: opts.node_radius,
                fill: network.color_of(nutrient).to_string(),
            })
            .collect();

        let edges = if opts.show_edges {
            self.edge_marks(network, &centers)
        } else {
            Vec::new()
        };

        let legend = (opts.show_legend && !network.is_empty()).then(|| Legend {
            origin: Point::new(MARGIN / 2.0, top - MARGIN / 2.0),
            entries: legend_entries(network),
        });

        Figure {
            width,
            height,
            dpi: opts.dpi,
            font_size: opts.font_size,
            title,
            nodes,
            edges,
            legend,
        }
    }

    fn edge_marks(&self, network: &Network, centers: &[Point]) -> Vec<EdgeMark> {
        let opts = self.options;
        network
            .interactions()
            .iter()
            .filter_map(|interaction| {
                let (source, target) = network.endpoints(interaction)?;
                let arrow = CurvedArrow::between(
                    centers[source],
                    centers[target],
                    opts.curvature,
                    opts.node_radius,
                    ARROW_LENGTH,
                );
                let label = opts.show_labels.then(|| TextMark {
                    text: interaction.display_label().to_string(),
                    position: arrow.label_anchor(LABEL_OFFSET),
                });
                Some(EdgeMark {
                    source: interaction.source.clone(),
                    target: interaction.target.clone(),
                    polarity: interaction.polarity,
                    style: LineStyle::for_polarity(interaction.polarity),
                    color: polarity_color(interaction.polarity).to_string(),
                    width: interaction.strength.stroke_width(),
                    opacity: interaction.strength.opacity(),
                    arrow,
                    label,
                })
            })
            .collect()
    }
}

fn legend_entries(network: &Network) -> Vec<LegendEntry> {
    let mut entries: Vec<LegendEntry> = network
        .groups()
        .iter()
        .filter(|group| network.group_size(&group.name) > 0)
        .map(|group| LegendEntry::Swatch {
            label: group.name.clone(),
            color: group.color.clone(),
        })
        .collect();

    for (polarity, label) in [
        (Polarity::Synergistic, "Enhances Absorption (+)"),
        (Polarity::Antagonistic, "Inhibits Absorption (\u{2212})"),
    ] {
        entries.push(LegendEntry::Line {
            label: label.to_string(),
            style: LineStyle::for_polarity(polarity),
            color: polarity_color(polarity).to_string(),
        });
    }
    entries.extend(Strength::ALL.into_iter().map(|strength| LegendEntry::Strength {
        label: strength.label().to_string(),
        width: strength.stroke_width(),
        opacity: strength.opacity(),
        color: STRENGTH_SAMPLE_COLOR.to_string(),
    }));
    entries
}
