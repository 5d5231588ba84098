#![allow(clippy::excessive_precision, clippy::needless_range_loop, clippy::module_inception)]

//! palette-match: dominant color extraction and perceptual palette matching
//!
//! Reduces a population of pixels to `k` representative colors and maps each
//! one to the perceptually closest entry of a named reference palette
//! (ΔE2000 in CIELAB), together with WCAG text contrast figures.
//!
//! # Quick Start
//!
//! The [`ColorAnalyzer`] builder is the primary entry point:
//!
//! ```
//! use palette_match::{ColorAnalyzer, Palette, Rgb};
//!
//! let palette = Palette::from_hex(&[
//!     ("red-500", "#ef4444"),
//!     ("blue-500", "#3b82f6"),
//!     ("white", "#ffffff"),
//! ]).unwrap();
//!
//! let mut pixels = vec![Rgb::new(255, 0, 0); 500];
//! pixels.extend(vec![Rgb::new(0, 0, 255); 500]);
//!
//! let analysis = ColorAnalyzer::new(palette).k(2).analyze(&pixels).unwrap();
//! for result in analysis.results() {
//!     println!("{} {:.0}% -> {} (ΔE {:.1})",
//!         result.hex, result.weight * 100.0, result.token, result.delta_e);
//! }
//! ```
//!
//! # Pipeline
//!
//! ```text
//! pixel samples (Rgb)
//!     |
//!     v
//! k-means in RGB          (deterministic init, bounded iterations)
//!     |
//!     v
//! k centroids + weights   (weights sum to 1, heaviest first)
//!     |
//!     +---> Lab            (sRGB -> linear -> XYZ -> L*a*b*, D65)
//!     |       |
//!     |  Palette::find_nearest()   (ΔE2000 against cached entry Labs)
//!     |       |
//!     |  token + distance
//!     |
//!     +---> WCAG contrast  (vs white / black, AA flags)
//!     |
//!     v
//! MatchResult per centroid
//! ```
//!
//! # Color Science
//!
//! Clustering runs in RGB because it only has to find representative
//! colors; the perceptual question ("which named color is this?") is
//! answered in CIELAB with CIEDE2000, which corrects plain LAB distance
//! for its known non-uniformity in saturated and blue regions.
//!
//! Contrast follows WCAG 2.x: relative luminance on linearized sRGB with
//! Rec. 709 weights, ratio `(L1 + 0.05) / (L2 + 0.05)`.

pub mod api;
pub mod cluster;
pub mod color;
pub mod contrast;
pub mod delta_e;
pub mod output;
pub mod palette;


pub use api::{Analysis, AnalysisError, ColorAnalyzer, DEFAULT_K};
pub use cluster::{kmeans, Cluster, Clustering, InitStrategy, KMeansError, KMeansOptions};
pub use color::{Lab, Rgb};
pub use contrast::{
    contrast_ratio, ideal_text_color, relative_luminance, ContrastReport, WcagRating,
    DEFAULT_AA_THRESHOLD,
};
pub use delta_e::ciede2000;
pub use output::MatchResult;
pub use palette::{
    match_color, DistanceMetric, Palette, PaletteEntry, PaletteError, PaletteMatch,
    ParseColorError,
};
