//! Hueprint - dominant colors, palette tokens and text contrast for images
//!
//! The color math lives in the `palette-match` crate. This crate adds the
//! surroundings: configuration, palette sources, image sampling and export
//! formats. It is exposed as a library for integration testing.

pub mod assets;
pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
