//! SVG exporter

use super::FigureExporter;
use crate::core::error::Result;
use crate::core::render::Figure;

/// Writes the figure's SVG document as-is
pub struct SvgExporter;

impl SvgExporter {
    /// Create a new SVG exporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for SvgExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl FigureExporter for SvgExporter {
    fn encode(&self, figure: &Figure) -> Result<Vec<u8>> {
        Ok(figure.to_svg()?.into_bytes())
    }
}
