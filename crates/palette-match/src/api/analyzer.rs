//! ColorAnalyzer builder -- the primary ergonomic entry point for the crate.
//!
//! [`ColorAnalyzer`] wraps the pipeline (cluster, match, contrast) with
//! fluent configuration and produces one [`MatchResult`] per dominant color.

use std::sync::Arc;

use crate::cluster::{kmeans, Cluster, InitStrategy, KMeansOptions};
use crate::color::Rgb;
use crate::contrast::{ContrastReport, DEFAULT_AA_THRESHOLD};
use crate::output::MatchResult;
use crate::palette::Palette;

use super::error::AnalysisError;

/// Default number of dominant colors.
pub const DEFAULT_K: usize = 6;

/// High-level analysis builder.
///
/// # Design
///
/// - Constructor requires a [`Palette`] (already validated, so an empty
///   palette can never reach the pipeline)
/// - Configuration methods consume and return `self`
/// - [`analyze()`](Self::analyze) takes `&self`, so one analyzer can serve
///   many images; the palette is held in an `Arc` and can be shared with
///   other analyzers
///
/// # Example
///
/// ```
/// use palette_match::{ColorAnalyzer, Palette, Rgb};
///
/// let palette = Palette::new([
///     ("red-500", Rgb::new(239, 68, 68)),
///     ("blue-500", Rgb::new(59, 130, 246)),
/// ]).unwrap();
///
/// let analyzer = ColorAnalyzer::new(palette).k(2);
///
/// let mut pixels = vec![Rgb::new(255, 0, 0); 500];
/// pixels.extend(vec![Rgb::new(0, 0, 255); 500]);
/// let analysis = analyzer.analyze(&pixels).unwrap();
///
/// assert_eq!(analysis.results().len(), 2);
/// assert!(!analysis.approximate());
/// ```
#[derive(Debug, Clone)]
pub struct ColorAnalyzer {
    palette: Arc<Palette>,
    kmeans: KMeansOptions,
    aa_threshold: f64,
}

/// Result of [`ColorAnalyzer::analyze`].
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    results: Vec<MatchResult>,
    iterations: usize,
    converged: bool,
}

impl Analysis {
    /// One result per cluster, heaviest first.
    #[inline]
    pub fn results(&self) -> &[MatchResult] {
        &self.results
    }

    #[inline]
    pub fn into_results(self) -> Vec<MatchResult> {
        self.results
    }

    #[inline]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// `true` when clustering stopped at the iteration cap before
    /// converging.
    #[inline]
    pub fn approximate(&self) -> bool {
        !self.converged
    }
}

impl ColorAnalyzer {
    /// Create an analyzer for `palette` with k = 6, default k-means options
    /// and an AA threshold of 4.5.
    pub fn new(palette: impl Into<Arc<Palette>>) -> Self {
        Self {
            palette: palette.into(),
            kmeans: KMeansOptions::new(DEFAULT_K),
            aa_threshold: DEFAULT_AA_THRESHOLD,
        }
    }

    /// Set the number of dominant colors.
    #[inline]
    pub fn k(mut self, k: usize) -> Self {
        self.kmeans.k = k;
        self
    }

    #[inline]
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.kmeans = self.kmeans.max_iterations(iterations);
        self
    }

    #[inline]
    pub fn convergence_threshold(mut self, threshold: f64) -> Self {
        self.kmeans = self.kmeans.convergence_threshold(threshold);
        self
    }

    #[inline]
    pub fn init(mut self, init: InitStrategy) -> Self {
        self.kmeans = self.kmeans.init(init);
        self
    }

    #[inline]
    pub fn attempts(mut self, attempts: usize) -> Self {
        self.kmeans = self.kmeans.attempts(attempts);
        self
    }

    /// Replace all k-means options at once.
    #[inline]
    pub fn kmeans_options(mut self, options: KMeansOptions) -> Self {
        self.kmeans = options;
        self
    }

    /// Minimum contrast ratio for the AA pass flags.
    #[inline]
    pub fn aa_threshold(mut self, threshold: f64) -> Self {
        self.aa_threshold = threshold;
        self
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    #[inline]
    pub fn options(&self) -> &KMeansOptions {
        &self.kmeans
    }

    /// Run the full pipeline on `samples`.
    ///
    /// 1. Cluster into k dominant colors (weights over `samples`)
    /// 2. Match each centroid against the palette
    /// 3. Evaluate contrast against white and black
    ///
    /// # Errors
    ///
    /// [`AnalysisError::InvalidInput`] for `k == 0`, empty `samples` or
    /// invalid k-means options. Nothing is computed in that case.
    pub fn analyze(&self, samples: &[Rgb]) -> Result<Analysis, AnalysisError> {
        self.analyze_with_population(samples, samples)
    }

    /// Like [`analyze()`](Self::analyze), but cluster `samples` and count
    /// weights over `population`.
    ///
    /// Used when `samples` is a random subset of a larger image: centroids
    /// come from the subset, proportions from every pixel.
    pub fn analyze_with_population(
        &self,
        samples: &[Rgb],
        population: &[Rgb],
    ) -> Result<Analysis, AnalysisError> {
        let mut clustering = kmeans(samples, &self.kmeans)?;
        if !std::ptr::eq(samples, population) {
            clustering.reweigh(population)?;
        }

        if !clustering.converged() {
            tracing::debug!(
                iterations = clustering.iterations(),
                "Clustering did not converge; results are approximate"
            );
        }

        let results = clustering
            .clusters()
            .iter()
            .map(|cluster| self.describe(cluster))
            .collect();

        Ok(Analysis {
            results,
            iterations: clustering.iterations(),
            converged: clustering.converged(),
        })
    }

    /// Match and evaluate a single color, treated as a population of one.
    pub fn evaluate(&self, color: Rgb) -> MatchResult {
        self.describe(&Cluster {
            centroid: color,
            weight: 1.0,
            count: 1,
        })
    }

    fn describe(&self, cluster: &Cluster) -> MatchResult {
        let matched = self.palette.find_nearest(cluster.centroid);
        let contrast = ContrastReport::evaluate(cluster.centroid, self.aa_threshold);
        tracing::trace!(
            color = %cluster.centroid,
            token = %matched.entry.token,
            delta_e = matched.distance,
            "Matched centroid"
        );
        MatchResult::new(cluster, &matched, &contrast)
    }
}
