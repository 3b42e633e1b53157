//! PNG exporter
//!
//! Rasterizes the SVG document with `resvg`. The document is in points, so it
//! is scaled by `dpi / 72` to reach the requested resolution.

use super::FigureExporter;
use crate::core::error::{NutrinetError, Result};
use crate::core::render::{Figure, POINTS_PER_INCH};
use crate::verbose;
use resvg::tiny_skia::{Color, Pixmap, Transform};
use resvg::usvg;

/// Rasterizes figures to PNG
pub struct PngExporter;

impl PngExporter {
    /// Create a new PNG exporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for PngExporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an SVG document with system fonts available for its text
fn parse_svg(svg: &str) -> std::result::Result<usvg::Tree, usvg::Error> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    usvg::Tree::from_str(svg, &options)
}

impl FigureExporter for PngExporter {
    #[allow(clippy::cast_possible_truncation)]
    fn encode(&self, figure: &Figure) -> Result<Vec<u8>> {
        let svg = figure.to_svg()?;
        let tree = parse_svg(&svg)
            .map_err(|e| NutrinetError::Raster(format!("failed to parse generated SVG: {e}")))?;

        let (width, height) = figure.pixel_size();
        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
            NutrinetError::Raster(format!("failed to allocate {width}x{height} surface"))
        })?;
        pixmap.fill(Color::WHITE);

        let scale = (f64::from(figure.dpi) / POINTS_PER_INCH) as f32;
        resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());
        verbose!("Rasterized figure to {width}x{height} px at {} dpi", figure.dpi);

        pixmap
            .encode_png()
            .map_err(|e| NutrinetError::Raster(format!("failed to encode PNG: {e}")))
    }
}
