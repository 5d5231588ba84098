//! Color types and conversion utilities
//!
//! Two representations with a compile-time distinction between them:
//!
//! - [`Rgb`]: 8-bit gamma-encoded sRGB. Used for input, clustering and output.
//! - [`Lab`]: CIE L*a*b* relative to the D65 white point. Used for perceptual
//!   distance.
//!
//! # Example
//!
//! ```
//! use palette_match::{Lab, Rgb};
//!
//! let red = Rgb::new(255, 0, 0);
//! let lab = Lab::from(red);
//! assert!((lab.l - 53.24).abs() < 0.01);
//! assert_eq!(lab.to_rgb(), red);
//! ```

mod lab;
pub(crate) mod lut;
mod rgb;

pub use lab::Lab;
pub use rgb::Rgb;
