//! CIE L*a*b* color type
//!
//! Conversion path: sRGB -> linear RGB (LUT) -> XYZ (sRGB primaries) ->
//! L*a*b* relative to the D65 reference white.

use super::lut::{linear_to_srgb, srgb8_to_linear};
use super::rgb::Rgb;

/// D65 reference white (2° observer), Y normalized to 1.0.
const WHITE_D65: [f64; 3] = [0.95047, 1.0, 1.08883];

/// Linear sRGB to XYZ.
const RGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
];

/// XYZ to linear sRGB (inverse of [`RGB_TO_XYZ`]).
const XYZ_TO_RGB: [[f64; 3]; 3] = [
    [3.2404542, -1.5371385, -0.4985314],
    [-0.9692660, 1.8760108, 0.0415560],
    [0.0556434, -0.2040259, 1.0572252],
];

/// CIE f(t) knee: (6/29)
const DELTA: f64 = 6.0 / 29.0;

/// A color in CIE L*a*b* space.
///
/// `l` is lightness in 0.0..=100.0; `a` (green-red) and `b` (blue-yellow)
/// are unbounded in principle but stay within roughly -128..=128 for sRGB
/// inputs. Euclidean distance here is ΔE76; use
/// [`ciede2000`](crate::delta_e::ciede2000) for perceptual matching.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    #[inline]
    pub fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Chroma, the distance from the neutral axis.
    #[inline]
    pub fn chroma(&self) -> f64 {
        (self.a * self.a + self.b * self.b).sqrt()
    }

    /// Convert back to 8-bit sRGB, clamping out-of-gamut values.
    ///
    /// For any `c: Rgb`, `Lab::from(c).to_rgb()` is within one unit of `c`
    /// on every channel.
    pub fn to_rgb(&self) -> Rgb {
        let fy = (self.l + 16.0) / 116.0;
        let fx = fy + self.a / 500.0;
        let fz = fy - self.b / 200.0;
        let xyz = [
            lab_f_inv(fx) * WHITE_D65[0],
            lab_f_inv(fy) * WHITE_D65[1],
            lab_f_inv(fz) * WHITE_D65[2],
        ];

        let [r, g, b] = mat_mul(&XYZ_TO_RGB, xyz).map(|linear| {
            // NaN input clamps to 0 via the saturating float-to-int cast
            (linear_to_srgb(linear) * 255.0).round() as u8
        });
        Rgb::new(r, g, b)
    }

    /// CIE76 color difference (plain Euclidean distance).
    #[inline]
    pub fn delta_e76(&self, other: Lab) -> f64 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        (dl * dl + da * da + db * db).sqrt()
    }
}

impl From<Rgb> for Lab {
    fn from(c: Rgb) -> Self {
        let linear = [
            srgb8_to_linear(c.r),
            srgb8_to_linear(c.g),
            srgb8_to_linear(c.b),
        ];
        let [x, y, z] = mat_mul(&RGB_TO_XYZ, linear);

        let fx = lab_f(x / WHITE_D65[0]);
        let fy = lab_f(y / WHITE_D65[1]);
        let fz = lab_f(z / WHITE_D65[2]);

        Self {
            // Matrix rounding puts white a hair above 100
            l: (116.0 * fy - 16.0).clamp(0.0, 100.0),
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}

#[inline]
fn mat_mul(m: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

#[inline]
fn lab_f(t: f64) -> f64 {
    if t > DELTA * DELTA * DELTA {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

#[inline]
fn lab_f_inv(t: f64) -> f64 {
    if t > DELTA {
        t * t * t
    } else {
        3.0 * DELTA * DELTA * (t - 4.0 / 29.0)
    }
}
