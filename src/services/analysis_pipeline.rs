use std::path::Path;
use std::sync::Arc;

use image::DynamicImage;
use palette_match::{ColorAnalyzer, MatchResult, Palette, Rgb};

use crate::error::PipelineError;
use crate::models::{AppConfig, SortOrder};
use crate::rendering::sort_results;
use crate::services::image_sampler::{self, Sampled, SamplerOptions};

/// Result of analyzing one image
#[derive(Debug, Clone)]
pub struct ImageReport {
    /// Sorted per-cluster results
    pub results: Vec<MatchResult>,
    pub iterations: usize,
    /// k-means stopped at the iteration cap
    pub approximate: bool,
    /// Image size after downscaling
    pub dimensions: (u32, u32),
    /// Opaque pixels counted for the weights
    pub population: usize,
    /// Pixels clustered
    pub samples: usize,
}

/// Pipeline that orchestrates sample → cluster → match → sort
pub struct AnalysisPipeline {
    analyzer: ColorAnalyzer,
    sampler: SamplerOptions,
    sort: SortOrder,
}

impl AnalysisPipeline {
    pub fn new(config: &AppConfig, palette: impl Into<Arc<Palette>>) -> Self {
        let analyzer = ColorAnalyzer::new(palette)
            .kmeans_options(config.extraction.kmeans_options())
            .aa_threshold(config.contrast.aa_threshold);

        Self {
            analyzer,
            sampler: SamplerOptions::from(&config.extraction),
            sort: config.output.sort,
        }
    }

    /// Override the number of clusters
    pub fn k(mut self, k: usize) -> Self {
        self.analyzer = self.analyzer.k(k);
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn analyzer(&self) -> &ColorAnalyzer {
        &self.analyzer
    }

    pub fn run_path(&self, path: &Path) -> Result<ImageReport, PipelineError> {
        let sampled = image_sampler::sample_path(path, &self.sampler)?;
        self.run_sampled(&sampled)
    }

    pub fn run_bytes(&self, bytes: &[u8]) -> Result<ImageReport, PipelineError> {
        let sampled = image_sampler::sample_bytes(bytes, &self.sampler)?;
        self.run_sampled(&sampled)
    }

    pub fn run_image(&self, img: &DynamicImage) -> Result<ImageReport, PipelineError> {
        let sampled = image_sampler::sample_image(img, &self.sampler)?;
        self.run_sampled(&sampled)
    }

    fn run_sampled(&self, sampled: &Sampled) -> Result<ImageReport, PipelineError> {
        let analysis = self
            .analyzer
            .analyze_with_population(sampled.samples(), sampled.population())?;

        if analysis.approximate() {
            tracing::warn!(
                iterations = analysis.iterations(),
                "k-means hit the iteration cap; colors are approximate"
            );
        }

        let iterations = analysis.iterations();
        let approximate = analysis.approximate();
        let mut results = analysis.into_results();
        sort_results(&mut results, self.sort);

        Ok(ImageReport {
            results,
            iterations,
            approximate,
            dimensions: sampled.dimensions(),
            population: sampled.population().len(),
            samples: sampled.samples().len(),
        })
    }

    /// Match individual colors, each as a population of one
    pub fn match_colors(&self, colors: &[Rgb]) -> Vec<MatchResult> {
        colors.iter().map(|&c| self.analyzer.evaluate(c)).collect()
    }
}
