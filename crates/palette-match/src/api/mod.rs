//! Public API for the palette-match crate.
//!
//! This module provides the high-level API: [`ColorAnalyzer`] builder and
//! [`AnalysisError`] unified error type.

mod analyzer;
mod error;

pub use analyzer::{Analysis, ColorAnalyzer, DEFAULT_K};
pub use error::AnalysisError;
