//! Figure output formats
//!
//! Provides exporters for SVG, PNG and PDF. The format is picked from the
//! output file extension.

pub mod pdf;
pub mod png;
pub mod svg;

pub use pdf::PdfExporter;
pub use png::PngExporter;
pub use svg::SvgExporter;

use crate::core::error::{NutrinetError, Result};
use crate::core::render::Figure;
use crate::{debug, info};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Raster image rendered at the figure's dpi
    Png,
    /// Vector image, the native document
    Svg,
    /// Single-page vector document
    Pdf,
}

impl OutputFormat {
    /// Get the file extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
            Self::Pdf => "pdf",
        }
    }

    /// Infer the format from a path's extension (case-insensitive)
    ///
    /// # Errors
    /// Returns `UnsupportedFormat` if the extension is missing or unknown
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| NutrinetError::UnsupportedFormat(path.display().to_string()))?;
        extension
            .parse()
            .map_err(|_| NutrinetError::UnsupportedFormat(extension.to_string()))
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            "pdf" => Ok(Self::Pdf),
            _ => Err(format!(
                "Unknown output format: '{s}' (expected png, svg or pdf)"
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Trait for figure exporters
pub trait FigureExporter {
    /// Encode the figure into the bytes of an output file
    ///
    /// # Errors
    /// Returns an error if the backend fails to encode the figure
    fn encode(&self, figure: &Figure) -> Result<Vec<u8>>;

    /// Encode the figure and write it to `output_path`
    ///
    /// # Errors
    /// Returns an error if encoding fails or the file cannot be written
    fn export(&self, figure: &Figure, output_path: &Path) -> Result<()> {
        let bytes = self.encode(figure)?;
        fs::write(output_path, bytes).map_err(|e| NutrinetError::io(output_path, e))
    }
}

/// Exporter for a format
#[must_use]
pub fn exporter_for(format: OutputFormat) -> Box<dyn FigureExporter> {
    match format {
        OutputFormat::Png => Box::new(PngExporter::new()),
        OutputFormat::Svg => Box::new(SvgExporter::new()),
        OutputFormat::Pdf => Box::new(PdfExporter::new()),
    }
}

/// Save a figure, inferring the format from the path
///
/// Missing parent directories are created.
///
/// # Errors
/// Returns `UnsupportedFormat` for unknown extensions, `Io` for filesystem
/// failures, or the backend's error if encoding fails
pub fn save_figure(figure: &Figure, output_path: &Path) -> Result<OutputFormat> {
    let format = OutputFormat::from_path(output_path)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating output directory {}", parent.display());
            fs::create_dir_all(parent).map_err(|e| NutrinetError::io(parent, e))?;
        }
    }

    exporter_for(format).export(figure, output_path)?;
    info!("Saved {format} figure to {}", output_path.display());
    Ok(format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            OutputFormat::from_path(&PathBuf::from("out/network.png")).unwrap(),
            OutputFormat::Png
        );
        assert_eq!(
            OutputFormat::from_path(&PathBuf::from("network.SVG")).unwrap(),
            OutputFormat::Svg
        );
        assert_eq!(
            OutputFormat::from_path(&PathBuf::from("network.Pdf")).unwrap(),
            OutputFormat::Pdf
        );
    }

    #[test]
    fn test_unsupported_formats() {
        for path in ["network.jpg", "network", "archive.tar.gz"] {
            assert!(matches!(
                OutputFormat::from_path(&PathBuf::from(path)),
                Err(NutrinetError::UnsupportedFormat(_))
            ));
        }
    }

    #[test]
    fn test_format_display_matches_extension() {
        for format in [OutputFormat::Png, OutputFormat::Svg, OutputFormat::Pdf] {
            assert_eq!(format.to_string(), format.extension());
            assert_eq!(format.extension().parse::<OutputFormat>().unwrap(), format);
        }
    }
}
