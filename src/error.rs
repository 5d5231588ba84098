use palette_match::{AnalysisError, PaletteError, ParseColorError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors while obtaining a reference palette
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("No color object found in colors.js")]
    NoColorsObject,

    #[error("No color families found")]
    NoFamilies,

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid palette document: {0}")]
    InvalidDocument(String),

    #[error("Invalid color for '{token}': {source}")]
    Color {
        token: String,
        #[source]
        source: ParseColorError,
    },

    #[error(transparent)]
    Palette(#[from] PaletteError),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors while turning an image into color samples
#[derive(Debug, Error)]
pub enum SampleError {
    #[error("Image decode error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Image has no opaque pixels")]
    NoOpaquePixels,
}

/// Error from the image analysis pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Sampling error: {0}")]
    Sample(#[from] SampleError),

    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),
}
