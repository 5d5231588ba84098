//! Error types for palette operations
//!
//! This module provides error types for color parsing and palette validation.

use thiserror::Error;

/// Error type for parsing color values.
///
/// Returned when a hex string has the wrong length or non-hex characters,
/// or when an integer channel falls outside 0..=255.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,
    /// Non-hexadecimal character encountered (signs included)
    #[error("invalid hex character: '{0}'")]
    InvalidHex(char),
    /// Integer channel outside 0..=255
    #[error("color channel {value} out of range 0..=255")]
    OutOfRange { value: i64 },
}

/// Error type for palette validation.
///
/// An empty palette is fatal: matching has no answer without at least one
/// entry, so construction refuses it up front.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaletteError {
    /// No entries provided
    #[error("palette cannot be empty")]
    EmptyPalette,
    /// The same token appears twice
    #[error("duplicate palette token '{token}' at index {index}")]
    DuplicateToken {
        /// The repeated token
        token: String,
        /// Index of the second occurrence
        index: usize,
    },
    /// Invalid hex color for a palette entry
    #[error("invalid color for '{token}': {source}")]
    ParseColor {
        token: String,
        #[source]
        source: ParseColorError,
    },
}
