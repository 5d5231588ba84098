//! Palette struct with precomputed LAB values and nearest-entry matching.
//!
//! This module provides the core `Palette` type: an ordered, immutable list
//! of named reference colors (tokens such as `red-500`) whose LAB values are
//! computed once at construction so per-query matching is a plain scan.

use std::collections::HashSet;
use std::str::FromStr;

use serde::Serialize;

use super::error::PaletteError;
use crate::color::{Lab, Rgb};
use crate::delta_e::ciede2000;

/// Distance metric for palette matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceMetric {
    /// CIEDE2000 (ΔE00). Corrects LAB's non-uniformity in the blue region
    /// and for saturated colors.
    #[default]
    Ciede2000,

    /// CIE76 (ΔE76): Euclidean distance in LAB. Cheaper, less accurate for
    /// saturated colors.
    Cie76,
}

impl DistanceMetric {
    /// Distance between two LAB colors under this metric.
    #[inline]
    pub fn distance(self, a: Lab, b: Lab) -> f64 {
        match self {
            DistanceMetric::Ciede2000 => ciede2000(a, b),
            DistanceMetric::Cie76 => a.delta_e76(b),
        }
    }
}

/// A named reference color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaletteEntry {
    /// Token name, e.g. `red-500`
    pub token: String,
    /// Reference color
    pub rgb: Rgb,
    /// Cached LAB conversion of `rgb`
    #[serde(skip)]
    pub lab: Lab,
}

impl PaletteEntry {
    pub fn new(token: impl Into<String>, rgb: Rgb) -> Self {
        Self {
            token: token.into(),
            rgb,
            lab: Lab::from(rgb),
        }
    }
}

/// Result of matching a color against a [`Palette`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteMatch<'a> {
    /// Position of the entry in the palette
    pub index: usize,
    /// The closest entry
    pub entry: &'a PaletteEntry,
    /// Perceptual distance to the entry under the palette's metric
    pub distance: f64,
}

/// A non-empty reference palette with cached LAB values.
///
/// # Precomputation
///
/// Each entry is converted to LAB exactly once in [`Palette::new`]; the
/// palette is immutable afterwards, so the cache can never go stale. Share it
/// across threads with `Arc<Palette>`.
///
/// # Example
///
/// ```
/// use palette_match::{Palette, Rgb};
///
/// let palette = Palette::new([
///     ("black", Rgb::BLACK),
///     ("white", Rgb::WHITE),
///     ("red-500", Rgb::new(239, 68, 68)),
/// ]).unwrap();
///
/// assert_eq!(palette.len(), 3);
/// let m = palette.find_nearest(Rgb::new(250, 60, 60));
/// assert_eq!(m.entry.token, "red-500");
/// ```
#[derive(Debug, Clone)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
    distance_metric: DistanceMetric,
}

impl Palette {
    /// Create a palette from `(token, color)` pairs, preserving their order.
    ///
    /// # Errors
    ///
    /// - no entries ([`PaletteError::EmptyPalette`])
    /// - a token appears more than once ([`PaletteError::DuplicateToken`])
    ///
    /// Duplicate *colors* under different tokens are allowed; the first one
    /// listed wins ties during matching.
    pub fn new<I, S>(entries: I) -> Result<Self, PaletteError>
    where
        I: IntoIterator<Item = (S, Rgb)>,
        S: Into<String>,
    {
        let entries: Vec<PaletteEntry> = entries
            .into_iter()
            .map(|(token, rgb)| PaletteEntry::new(token, rgb))
            .collect();

        if entries.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }

        let mut seen = HashSet::new();
        for (index, entry) in entries.iter().enumerate() {
            if !seen.insert(entry.token.as_str()) {
                return Err(PaletteError::DuplicateToken {
                    token: entry.token.clone(),
                    index,
                });
            }
        }

        tracing::debug!(entries = entries.len(), "Built palette");

        Ok(Self {
            entries,
            distance_metric: DistanceMetric::default(),
        })
    }

    /// Create a palette from `(token, hex)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::ParseColor`] naming the token whose hex string
    /// is invalid, or the validation errors of [`Palette::new`].
    ///
    /// # Example
    ///
    /// ```
    /// use palette_match::Palette;
    ///
    /// let palette = Palette::from_hex(&[("slate-200", "#e2e8f0"), ("red-600", "#dc2626")]).unwrap();
    /// assert_eq!(palette.len(), 2);
    /// ```
    pub fn from_hex(entries: &[(&str, &str)]) -> Result<Self, PaletteError> {
        let parsed = entries
            .iter()
            .map(|&(token, hex)| {
                Rgb::from_str(hex)
                    .map(|rgb| (token, rgb))
                    .map_err(|source| PaletteError::ParseColor {
                        token: token.to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Palette::new(parsed)
    }

    /// Override the distance metric (ΔE2000 by default).
    pub fn with_distance_metric(mut self, metric: DistanceMetric) -> Self {
        self.distance_metric = metric;
        self
    }

    #[inline]
    pub fn distance_metric(&self) -> DistanceMetric {
        self.distance_metric
    }

    /// Returns the number of entries in the palette.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: empty palettes are rejected at construction time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&PaletteEntry> {
        self.entries.get(index)
    }

    /// Look up an entry by token.
    pub fn by_token(&self, token: &str) -> Option<&PaletteEntry> {
        self.entries.iter().find(|e| e.token == token)
    }

    /// Find the closest entry to an sRGB color.
    #[inline]
    pub fn find_nearest(&self, color: Rgb) -> PaletteMatch<'_> {
        self.find_nearest_lab(Lab::from(color))
    }

    /// Find the closest entry to a LAB color.
    ///
    /// Linear scan over all entries; on equal distance the entry listed first
    /// wins.
    pub fn find_nearest_lab(&self, color: Lab) -> PaletteMatch<'_> {
        let mut best_idx = 0;
        let mut best_dist = f64::INFINITY;

        for (i, entry) in self.entries.iter().enumerate() {
            let dist = self.distance_metric.distance(color, entry.lab);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
            }
        }

        PaletteMatch {
            index: best_idx,
            entry: &self.entries[best_idx],
            distance: best_dist,
        }
    }
}

/// Match a color against a palette.
///
/// Equivalent to [`Palette::find_nearest`].
#[inline]
pub fn match_color(color: Rgb, palette: &Palette) -> PaletteMatch<'_> {
    palette.find_nearest(color)
}
