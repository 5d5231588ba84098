//! Enumerated settings shared by config.yaml and the command line.

use clap::ValueEnum;
use palette_match::DistanceMetric;
use serde::Deserialize;

/// k-means starting centroids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum InitKind {
    EvenlySpaced,
    #[default]
    PlusPlus,
}

/// Palette matching distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MetricKind {
    #[default]
    Ciede2000,
    Cie76,
}

impl From<MetricKind> for DistanceMetric {
    fn from(kind: MetricKind) -> Self {
        match kind {
            MetricKind::Ciede2000 => DistanceMetric::Ciede2000,
            MetricKind::Cie76 => DistanceMetric::Cie76,
        }
    }
}

/// Result ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Heaviest cluster first
    #[default]
    Weight,
    /// HSV hue, ascending
    Hue,
    /// WCAG relative luminance, ascending
    Luminance,
}

/// Output rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// `{"palette": [...]}` with every match field
    Json,
    /// CSS custom properties
    Css,
    /// `color-N` to palette token map (JSON)
    Tokens,
    /// tailwind.config.js snippet using the CSS variables
    Tailwind,
}
