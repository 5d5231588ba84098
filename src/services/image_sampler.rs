//! Image decoding and pixel sampling.
//!
//! The image is downscaled so its longest side is at most `max_side`, fully
//! transparent pixels are dropped, and the remaining pixels form the
//! population. When the population exceeds `sample_limit`, a seeded random
//! subset is drawn for clustering.

use crate::error::SampleError;
use crate::models::ExtractionConfig;
use image::{imageops::FilterType, DynamicImage, GenericImageView};
use palette_match::Rgb;
use rand::{rngs::StdRng, SeedableRng};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerOptions {
    /// Longest side after downscaling (0 disables downscaling)
    pub max_side: u32,
    /// Maximum clustering subset size (0 disables subsampling)
    pub sample_limit: usize,
    pub seed: u64,
}

impl Default for SamplerOptions {
    fn default() -> Self {
        Self::from(&ExtractionConfig::default())
    }
}

impl From<&ExtractionConfig> for SamplerOptions {
    fn from(config: &ExtractionConfig) -> Self {
        Self {
            max_side: config.max_side,
            sample_limit: config.sample_limit,
            seed: config.seed,
        }
    }
}

/// Pixels of one image
#[derive(Debug, Clone)]
pub struct Sampled {
    population: Vec<Rgb>,
    subset: Option<Vec<Rgb>>,
    width: u32,
    height: u32,
}

impl Sampled {
    /// Every opaque pixel of the downscaled image
    pub fn population(&self) -> &[Rgb] {
        &self.population
    }

    /// Pixels to cluster: the random subset, or the population itself.
    pub fn samples(&self) -> &[Rgb] {
        self.subset.as_deref().unwrap_or(&self.population)
    }

    pub fn is_subsampled(&self) -> bool {
        self.subset.is_some()
    }

    /// Dimensions after downscaling
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

pub fn sample_path(path: &Path, options: &SamplerOptions) -> Result<Sampled, SampleError> {
    let img = image::open(path)?;
    tracing::debug!(path = %path.display(), width = img.width(), height = img.height(), "Decoded image");
    sample_image(&img, options)
}

pub fn sample_bytes(bytes: &[u8], options: &SamplerOptions) -> Result<Sampled, SampleError> {
    let img = image::load_from_memory(bytes)?;
    sample_image(&img, options)
}

pub fn sample_image(img: &DynamicImage, options: &SamplerOptions) -> Result<Sampled, SampleError> {
    let (width, height) = img.dimensions();
    let scaled;
    let img = if options.max_side > 0 && width.max(height) > options.max_side {
        scaled = img.resize(options.max_side, options.max_side, FilterType::Triangle);
        tracing::debug!(
            from = ?(width, height),
            to = ?scaled.dimensions(),
            "Downscaled image"
        );
        &scaled
    } else {
        img
    };

    let rgba = img.to_rgba8();
    let population: Vec<Rgb> = rgba
        .pixels()
        .filter(|p| p[3] > 0)
        .map(|p| Rgb::new(p[0], p[1], p[2]))
        .collect();

    if population.is_empty() {
        return Err(SampleError::NoOpaquePixels);
    }

    let subset = if options.sample_limit > 0 && population.len() > options.sample_limit {
        let mut rng = StdRng::seed_from_u64(options.seed);
        let mut indices =
            rand::seq::index::sample(&mut rng, population.len(), options.sample_limit).into_vec();
        indices.sort_unstable();
        tracing::debug!(
            population = population.len(),
            samples = indices.len(),
            "Subsampled pixels"
        );
        Some(indices.into_iter().map(|i| population[i]).collect())
    } else {
        None
    };

    Ok(Sampled {
        population,
        subset,
        width: rgba.width(),
        height: rgba.height(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn checker(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        }))
    }

    #[test]
    fn test_small_image_is_kept_whole() {
        let sampled = sample_image(&checker(4, 3), &SamplerOptions::default()).unwrap();
        assert_eq!(sampled.dimensions(), (4, 3));
        assert_eq!(sampled.population().len(), 12);
        assert!(!sampled.is_subsampled());
        assert!(std::ptr::eq(sampled.samples(), sampled.population()));
    }

    #[test]
    fn test_downscale_preserves_aspect_ratio() {
        let options = SamplerOptions {
            max_side: 10,
            ..SamplerOptions::default()
        };
        let sampled = sample_image(&checker(40, 20), &options).unwrap();
        assert_eq!(sampled.dimensions(), (10, 5));
        assert_eq!(sampled.population().len(), 50);
    }

    #[test]
    fn test_transparent_pixels_are_dropped() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_fn(4, 4, |x, _| {
            if x < 2 {
                Rgba([10, 20, 30, 0])
            } else {
                Rgba([200, 100, 50, 128])
            }
        }));
        let sampled = sample_image(&img, &SamplerOptions::default()).unwrap();
        assert_eq!(sampled.population().len(), 8);
        assert!(sampled
            .population()
            .iter()
            .all(|&c| c == Rgb::new(200, 100, 50)));
    }

    #[test]
    fn test_fully_transparent_image_fails() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(3, 3));
        let err = sample_image(&img, &SamplerOptions::default()).unwrap_err();
        assert!(matches!(err, SampleError::NoOpaquePixels));
    }

    #[test]
    fn test_subsample_is_seeded() {
        let options = SamplerOptions {
            max_side: 0,
            sample_limit: 100,
            seed: 7,
        };
        let img = DynamicImage::ImageRgba8(RgbaImage::from_fn(50, 50, |x, y| {
            Rgba([(x * 5) as u8, (y * 5) as u8, 0, 255])
        }));
        let a = sample_image(&img, &options).unwrap();
        let b = sample_image(&img, &options).unwrap();

        assert!(a.is_subsampled());
        assert_eq!(a.population().len(), 2500);
        assert_eq!(a.samples().len(), 100);
        assert_eq!(a.samples(), b.samples());
    }

    #[test]
    fn test_undecodable_bytes() {
        let err = sample_bytes(b"not an image", &SamplerOptions::default()).unwrap_err();
        assert!(matches!(err, SampleError::Decode(_)));
    }
}
