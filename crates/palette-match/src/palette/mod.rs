//! Palette types and utilities
//!
//! This module provides the reference palette with precomputed LAB values,
//! nearest-entry matching, and the error types for parsing and validation.

mod error;
mod palette;

pub use error::{PaletteError, ParseColorError};
pub use palette::{match_color, DistanceMetric, Palette, PaletteEntry, PaletteMatch};
