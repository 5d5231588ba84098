//! Unified error type for the palette-match public API.
//!
//! [`AnalysisError`] wraps all error types from the crate into a single enum
//! for convenient `?` propagation in application code.

use thiserror::Error;

use crate::cluster::KMeansError;
use crate::palette::{PaletteError, ParseColorError};

/// Unified error type for the palette-match public API.
///
/// # Example
///
/// ```
/// use palette_match::{AnalysisError, Palette};
///
/// fn create_palette() -> Result<Palette, AnalysisError> {
///     let palette = Palette::from_hex(&[("black", "#000000"), ("white", "#FFFFFF")])?;
///     Ok(palette)
/// }
/// # create_palette().unwrap();
/// ```
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Clustering input rejected (k = 0, no samples, bad options)
    #[error("invalid input: {0}")]
    InvalidInput(#[from] KMeansError),
    /// Palette validation error (empty, duplicate token, or parse error)
    #[error("palette error: {0}")]
    Palette(#[from] PaletteError),
    /// Color parsing error (invalid hex string or channel)
    #[error("color parse error: {0}")]
    ParseColor(#[from] ParseColorError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err: AnalysisError = KMeansError::ZeroClusters.into();
        assert_eq!(err.to_string(), "invalid input: cluster count must be at least 1");

        let err: AnalysisError = PaletteError::EmptyPalette.into();
        assert_eq!(err.to_string(), "palette error: palette cannot be empty");

        let err: AnalysisError = ParseColorError::InvalidLength.into();
        assert_eq!(
            err.to_string(),
            "color parse error: invalid hex color length (expected 3 or 6 characters)"
        );
    }

    #[test]
    fn test_source_chain() {
        use std::error::Error;
        let err: AnalysisError = PaletteError::EmptyPalette.into();
        assert!(err.source().is_some());
    }
}
