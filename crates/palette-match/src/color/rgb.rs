//! 8-bit sRGB color type
//!
//! Every pixel sample, cluster centroid and palette entry is an [`Rgb`].
//! Parsing and formatting use CSS-style hex notation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::palette::ParseColorError;

/// A gamma-encoded sRGB color with 8 bits per channel.
///
/// Channels are `u8`, so the 0..=255 range invariant holds by construction.
/// Values coming from wider integer types go through
/// [`Rgb::try_from_ints`], which rejects out-of-range channels.
///
/// Serializes as a `[r, g, b]` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from unchecked integer channels.
    ///
    /// # Errors
    ///
    /// Returns [`ParseColorError::OutOfRange`] naming the first channel
    /// outside 0..=255.
    ///
    /// # Example
    ///
    /// ```
    /// use palette_match::Rgb;
    ///
    /// assert_eq!(Rgb::try_from_ints(239, 68, 68).unwrap(), Rgb::new(239, 68, 68));
    /// assert!(Rgb::try_from_ints(256, 0, 0).is_err());
    /// assert!(Rgb::try_from_ints(0, -1, 0).is_err());
    /// ```
    pub fn try_from_ints(r: i64, g: i64, b: i64) -> Result<Self, ParseColorError> {
        let channel = |value: i64| {
            u8::try_from(value).map_err(|_| ParseColorError::OutOfRange { value })
        };
        Ok(Self::new(channel(r)?, channel(g)?, channel(b)?))
    }

    /// Channels as a byte array.
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Lowercase `#rrggbb` notation.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// HSV hue in degrees (0.0..360.0). Achromatic colors report 0.0.
    pub fn hue(self) -> f64 {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        if delta == 0.0 {
            return 0.0;
        }

        let sector = if max == r {
            ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };
        sector * 60.0
    }
}

impl From<[u8; 3]> for Rgb {
    #[inline]
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Rgb> for [u8; 3] {
    #[inline]
    fn from(c: Rgb) -> Self {
        c.to_bytes()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Parse `#RRGGBB`, `RRGGBB`, `#RGB` or `RGB` (case-insensitive).
///
/// # Example
///
/// ```
/// use palette_match::Rgb;
///
/// let red: Rgb = "#ef4444".parse().unwrap();
/// assert_eq!(red, Rgb::new(239, 68, 68));
///
/// let white: Rgb = "FFF".parse().unwrap();
/// assert_eq!(white, Rgb::WHITE);
/// ```
impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        if !hex.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        let digits = hex
            .chars()
            .map(|c| {
                c.to_digit(16)
                    .map(|d| d as u8)
                    .ok_or(ParseColorError::InvalidHex(c))
            })
            .collect::<Result<Vec<u8>, _>>()?;

        match digits[..] {
            // Expand shorthand: "F" -> "FF" (0xF * 17 = 0xFF)
            [r, g, b] => Ok(Self::new(r * 17, g * 17, b * 17)),
            [r1, r0, g1, g0, b1, b0] => Ok(Self::new(r1 << 4 | r0, g1 << 4 | g0, b1 << 4 | b0)),
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}
