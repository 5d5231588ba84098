//! Gamma lookup table access functions
//!
//! The 8-bit decode table is generated at compile time by build.rs. Encoding
//! (linear to sRGB) only runs once per converted color, so it uses the exact
//! formula instead of a second table.

// Include the generated LUT from build.rs
include!(concat!(env!("OUT_DIR"), "/gamma_lut.rs"));

/// Convert an 8-bit sRGB channel to linear intensity (0.0..=1.0).
#[inline]
pub fn srgb8_to_linear(value: u8) -> f64 {
    SRGB8_TO_LINEAR[value as usize]
}

/// Convert a linear intensity to a gamma-encoded sRGB value (0.0..=1.0).
///
/// Inputs outside 0.0..=1.0 are clamped.
#[inline]
pub fn linear_to_srgb(linear: f64) -> f64 {
    let linear = linear.clamp(0.0, 1.0);
    if linear <= 0.0031308 {
        linear * 12.92
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}
