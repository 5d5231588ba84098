//! Test fixtures and constants.

use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};

/// A trimmed Tailwind v3 colors.js
pub const COLORS_JS: &str = r#"const { warn } = require('../util/log')

function deprecated({ version, from, to }) {
  warn('deprecated', `As of Tailwind CSS ${version}, \`${from}\` has been renamed to \`${to}\`.`)
}

module.exports = {
  inherit: 'inherit',
  current: 'currentColor',
  transparent: 'transparent',
  black: '#000',
  white: '#fff',
  slate: {
    50: '#f8fafc',
    100: '#f1f5f9',
    900: '#0f172a',
  },
  red: {
    100: '#fee2e2',
    500: '#ef4444',
    900: '#7f1d1d',
  },
  blue: {
    100: '#dbeafe',
    500: '#3b82f6',
    900: '#1e3a8a',
  },
  lightBlue: {
    500: '#0ea5e9',
  },
  get warmGray() {
    deprecated({ version: 'v3.0', from: 'warmGray', to: 'stone' })
    return this.stone
  },
}
"#;

/// Tokens [`COLORS_JS`] should yield, in order
pub const COLORS_JS_TOKENS: [&str; 9] = [
    "slate-50", "slate-100", "slate-900", "red-100", "red-500", "red-900", "blue-100",
    "blue-500", "blue-900",
];

/// Solid colors for generated images
pub mod colors {
    pub const RED_500: [u8; 3] = [0xef, 0x44, 0x44];
    pub const BLUE_900: [u8; 3] = [0x1e, 0x3a, 0x8a];
    pub const SLATE_50: [u8; 3] = [0xf8, 0xfa, 0xfc];
}

/// Write a PNG made of vertical stripes; `stripes` pairs a color with its
/// width in pixels.
pub fn write_striped_png(dir: &Path, name: &str, stripes: &[([u8; 3], u32)], height: u32) -> PathBuf {
    let width: u32 = stripes.iter().map(|(_, w)| w).sum();
    let img = RgbaImage::from_fn(width, height, |x, _| {
        let mut edge = 0;
        for &(color, w) in stripes {
            edge += w;
            if x < edge {
                return Rgba([color[0], color[1], color[2], 255]);
            }
        }
        Rgba([0, 0, 0, 255])
    });
    let path = dir.join(name);
    img.save(&path).expect("Failed to write test image");
    path
}
