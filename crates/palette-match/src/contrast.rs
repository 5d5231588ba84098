//! WCAG 2.x relative luminance and contrast.
//!
//! Ratios range from 1:1 (identical luminance) to 21:1 (black on white).
//! Both extremes are exact: the channel LUT pins 0 and 255, and the ratio is
//! evaluated as `(20·L1 + 1) / (20·L2 + 1)`, which is `(L1 + 0.05) / (L2 +
//! 0.05)` without the inexact 0.05 literal.

use serde::Serialize;

use crate::color::lut::srgb8_to_linear;
use crate::color::Rgb;

/// Minimum ratio for WCAG AA body text.
pub const DEFAULT_AA_THRESHOLD: f64 = 4.5;

/// WCAG relative luminance (0.0..=1.0).
///
/// # Example
///
/// ```
/// use palette_match::{relative_luminance, Rgb};
///
/// assert_eq!(relative_luminance(Rgb::BLACK), 0.0);
/// assert_eq!(relative_luminance(Rgb::WHITE), 1.0);
/// ```
pub fn relative_luminance(color: Rgb) -> f64 {
    let r = srgb8_to_linear(color.r);
    let g = srgb8_to_linear(color.g);
    let b = srgb8_to_linear(color.b);
    // Integer weights sum to exactly 10000
    (2126.0 * r + 7152.0 * g + 722.0 * b) / 10000.0
}

/// Contrast ratio between two colors, order-independent (1.0..=21.0).
///
/// # Example
///
/// ```
/// use palette_match::{contrast_ratio, Rgb};
///
/// assert_eq!(contrast_ratio(Rgb::BLACK, Rgb::WHITE), 21.0);
/// assert_eq!(contrast_ratio(Rgb::WHITE, Rgb::BLACK), 21.0);
/// ```
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (hi, lo) = if la >= lb { (la, lb) } else { (lb, la) };
    (20.0 * hi + 1.0) / (20.0 * lo + 1.0)
}

/// White or black, whichever contrasts more with `background`. White wins
/// ties.
pub fn ideal_text_color(background: Rgb) -> Rgb {
    if contrast_ratio(background, Rgb::WHITE) >= contrast_ratio(background, Rgb::BLACK) {
        Rgb::WHITE
    } else {
        Rgb::BLACK
    }
}

/// WCAG conformance level reached by a contrast ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum WcagRating {
    #[serde(rename = "Fail")]
    Fail,
    /// Large text only (>= 3:1)
    #[serde(rename = "AA Large")]
    AaLarge,
    /// Normal text (>= 4.5:1)
    #[serde(rename = "AA")]
    Aa,
    /// Enhanced (>= 7:1)
    #[serde(rename = "AAA")]
    Aaa,
}

impl WcagRating {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= 7.0 {
            WcagRating::Aaa
        } else if ratio >= 4.5 {
            WcagRating::Aa
        } else if ratio >= 3.0 {
            WcagRating::AaLarge
        } else {
            WcagRating::Fail
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WcagRating::Aaa => "AAA",
            WcagRating::Aa => "AA",
            WcagRating::AaLarge => "AA Large",
            WcagRating::Fail => "Fail",
        }
    }
}

/// Contrast of one color against white and black text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContrastReport {
    pub vs_white: f64,
    pub vs_black: f64,
    pub ideal_text: Rgb,
    pub passes_aa_white: bool,
    pub passes_aa_black: bool,
    /// Rating of the better of the two ratios
    pub rating: WcagRating,
}

impl ContrastReport {
    /// Evaluate `color` with a caller-chosen AA threshold (normally
    /// [`DEFAULT_AA_THRESHOLD`]).
    ///
    /// # Example
    ///
    /// ```
    /// use palette_match::{ContrastReport, Rgb, DEFAULT_AA_THRESHOLD};
    ///
    /// let report = ContrastReport::evaluate(Rgb::new(239, 68, 68), DEFAULT_AA_THRESHOLD);
    /// assert_eq!(report.ideal_text, Rgb::BLACK);
    /// assert!(!report.passes_aa_white);
    /// ```
    pub fn evaluate(color: Rgb, aa_threshold: f64) -> Self {
        let vs_white = contrast_ratio(color, Rgb::WHITE);
        let vs_black = contrast_ratio(color, Rgb::BLACK);
        Self {
            vs_white,
            vs_black,
            ideal_text: if vs_white >= vs_black {
                Rgb::WHITE
            } else {
                Rgb::BLACK
            },
            passes_aa_white: vs_white >= aa_threshold,
            passes_aa_black: vs_black >= aa_threshold,
            rating: WcagRating::from_ratio(vs_white.max(vs_black)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extremes_exact() {
        assert_eq!(contrast_ratio(Rgb::BLACK, Rgb::WHITE), 21.0);
        assert_eq!(contrast_ratio(Rgb::WHITE, Rgb::WHITE), 1.0);
        assert_eq!(contrast_ratio(Rgb::BLACK, Rgb::BLACK), 1.0);
    }

    #[test]
    fn test_ratio_bounds_and_symmetry() {
        let colors = [
            Rgb::new(239, 68, 68),
            Rgb::new(59, 130, 246),
            Rgb::new(250, 204, 21),
            Rgb::new(17, 24, 39),
            Rgb::new(128, 128, 128),
        ];
        for &a in &colors {
            for &b in &colors {
                let r = contrast_ratio(a, b);
                assert!((1.0..=21.0).contains(&r), "{a} vs {b}: {r}");
                assert_eq!(r, contrast_ratio(b, a));
            }
        }
    }

    #[test]
    fn test_known_ratios() {
        // #767676 is the classic lightest gray passing AA on white
        let r = contrast_ratio(Rgb::new(0x76, 0x76, 0x76), Rgb::WHITE);
        assert!((r - 4.54).abs() < 0.01, "got {r}");
        // Pure red on white
        let r = contrast_ratio(Rgb::new(255, 0, 0), Rgb::WHITE);
        assert!((r - 3.998).abs() < 0.001, "got {r}");
    }

    #[test]
    fn test_luminance_primaries() {
        assert!((relative_luminance(Rgb::new(255, 0, 0)) - 0.2126).abs() < 1e-12);
        assert!((relative_luminance(Rgb::new(0, 255, 0)) - 0.7152).abs() < 1e-12);
        assert!((relative_luminance(Rgb::new(0, 0, 255)) - 0.0722).abs() < 1e-12);
    }

    #[test]
    fn test_ideal_text_color() {
        assert_eq!(ideal_text_color(Rgb::BLACK), Rgb::WHITE);
        assert_eq!(ideal_text_color(Rgb::WHITE), Rgb::BLACK);
        assert_eq!(ideal_text_color(Rgb::new(250, 204, 21)), Rgb::BLACK);
        assert_eq!(ideal_text_color(Rgb::new(30, 58, 138)), Rgb::WHITE);
    }

    #[test]
    fn test_rating_thresholds() {
        assert_eq!(WcagRating::from_ratio(21.0), WcagRating::Aaa);
        assert_eq!(WcagRating::from_ratio(7.0), WcagRating::Aaa);
        assert_eq!(WcagRating::from_ratio(6.99), WcagRating::Aa);
        assert_eq!(WcagRating::from_ratio(4.5), WcagRating::Aa);
        assert_eq!(WcagRating::from_ratio(3.0), WcagRating::AaLarge);
        assert_eq!(WcagRating::from_ratio(2.99), WcagRating::Fail);
        assert_eq!(WcagRating::AaLarge.label(), "AA Large");
        assert!(WcagRating::Aaa > WcagRating::Fail);
    }

    #[test]
    fn test_report_custom_threshold() {
        let gray = Rgb::new(0x76, 0x76, 0x76);
        let default = ContrastReport::evaluate(gray, DEFAULT_AA_THRESHOLD);
        assert!(default.passes_aa_white);

        let strict = ContrastReport::evaluate(gray, 7.0);
        assert!(!strict.passes_aa_white);
        assert!(!strict.passes_aa_black);
        assert_eq!(strict.rating, WcagRating::Aa);
    }

    #[test]
    fn test_report_matches_free_functions() {
        let c = Rgb::new(16, 185, 129);
        let report = ContrastReport::evaluate(c, DEFAULT_AA_THRESHOLD);
        assert_eq!(report.vs_white, contrast_ratio(c, Rgb::WHITE));
        assert_eq!(report.vs_black, contrast_ratio(c, Rgb::BLACK));
        assert_eq!(report.ideal_text, ideal_text_color(c));
    }
}
