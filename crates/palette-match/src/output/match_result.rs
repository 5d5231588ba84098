//! The per-color record produced by the analysis pipeline.

use serde::Serialize;

use crate::cluster::Cluster;
use crate::color::Rgb;
use crate::contrast::{ContrastReport, WcagRating};
use crate::palette::PaletteMatch;

/// One dominant color, its closest palette entry, and its text contrast.
///
/// Serializes with snake_case keys; colors appear both as `[r, g, b]` arrays
/// and as `#rrggbb` strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    /// Cluster centroid
    pub rgb: Rgb,
    pub hex: String,
    /// Share of the population in this cluster (0.0..=1.0)
    pub weight: f64,
    /// Pixel count behind `weight`
    pub count: usize,

    /// Matched palette token
    pub token: String,
    pub palette_rgb: Rgb,
    pub palette_hex: String,
    /// Distance from centroid to the palette entry (ΔE2000 unless the
    /// palette was configured otherwise)
    pub delta_e: f64,

    pub contrast_white: f64,
    pub contrast_black: f64,
    pub ideal_text: Rgb,
    pub aa_white: bool,
    pub aa_black: bool,
    pub wcag: WcagRating,
}

impl MatchResult {
    pub fn new(cluster: &Cluster, matched: &PaletteMatch<'_>, contrast: &ContrastReport) -> Self {
        Self {
            rgb: cluster.centroid,
            hex: cluster.centroid.to_hex(),
            weight: cluster.weight,
            count: cluster.count,
            token: matched.entry.token.clone(),
            palette_rgb: matched.entry.rgb,
            palette_hex: matched.entry.rgb.to_hex(),
            delta_e: matched.distance,
            contrast_white: contrast.vs_white,
            contrast_black: contrast.vs_black,
            ideal_text: contrast.ideal_text,
            aa_white: contrast.passes_aa_white,
            aa_black: contrast.passes_aa_black,
            wcag: contrast.rating,
        }
    }
}
