//! Error types for the dataset, layout and output pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for `nutrinet` operations.
pub type Result<T> = std::result::Result<T, NutrinetError>;

/// Errors surfaced to the user. Every variant is fatal to the invocation.
#[derive(Debug, Error)]
pub enum NutrinetError {
    /// The output path has no extension or one that cannot be written
    #[error("Unsupported output format '{0}'. Use a .png, .svg or .pdf file name")]
    UnsupportedFormat(String),

    /// The dataset breaks a structural invariant (dangling reference, duplicate, ...)
    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    /// The dataset file is not valid TOML for the dataset schema
    #[error("Failed to parse dataset: {0}")]
    DatasetParse(#[from] toml::de::Error),

    /// Reading or writing a file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The SVG document could not be produced
    #[error("SVG rendering failed: {0}")]
    Svg(String),

    /// Rasterizing to PNG failed
    #[error("PNG rendering failed: {0}")]
    Raster(String),

    /// Converting to PDF failed
    #[error("PDF rendering failed: {0}")]
    Pdf(String),

    /// No viewer could show the figure
    #[error("Viewer error: {0}")]
    Viewer(String),
}

impl NutrinetError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
