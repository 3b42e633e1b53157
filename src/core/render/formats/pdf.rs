//! PDF exporter
//!
//! Converts the SVG document to a single-page vector PDF with `svg2pdf`.
//! The page size matches the figure size in points.

use super::FigureExporter;
use crate::core::error::{NutrinetError, Result};
use crate::core::render::Figure;
use svg2pdf::usvg;
use svg2pdf::{ConversionOptions, PageOptions};

/// Converts figures to PDF
pub struct PdfExporter;

impl PdfExporter {
    /// Create a new PDF exporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for PdfExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl FigureExporter for PdfExporter {
    fn encode(&self, figure: &Figure) -> Result<Vec<u8>> {
        let svg = figure.to_svg()?;

        let mut options = usvg::Options::default();
        options.fontdb_mut().load_system_fonts();
        let tree = usvg::Tree::from_str(&svg, &options)
            .map_err(|e| NutrinetError::Pdf(format!("failed to parse generated SVG: {e}")))?;

        svg2pdf::to_pdf(&tree, ConversionOptions::default(), PageOptions::default())
            .map_err(|e| NutrinetError::Pdf(format!("PDF conversion failed: {e:?}")))
    }
}
