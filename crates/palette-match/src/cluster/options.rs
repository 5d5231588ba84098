//! K-means options and configuration.
//!
//! This module provides the [`KMeansOptions`] struct and the
//! [`InitStrategy`] used to pick starting centroids.

use super::error::KMeansError;

/// How starting centroids are chosen.
///
/// Every strategy is deterministic: the same samples and options always
/// yield the same starting centroids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitStrategy {
    /// Samples at evenly spaced positions (`i * n / k`).
    #[default]
    EvenlySpaced,

    /// k-means++ seeding driven by a fixed-seed RNG. Each additional attempt
    /// uses `seed + attempt`.
    PlusPlus {
        /// RNG seed
        seed: u64,
    },
}

/// Configuration for k-means clustering.
///
/// # Defaults
///
/// - Max iterations: 40
/// - Convergence threshold: 0.2 (largest centroid movement, RGB units)
/// - Init: [`InitStrategy::EvenlySpaced`]
/// - Attempts: 1
///
/// # Example
///
/// ```
/// use palette_match::{InitStrategy, KMeansOptions};
///
/// let options = KMeansOptions::new(6)
///     .init(InitStrategy::PlusPlus { seed: 42 })
///     .attempts(3);
/// assert_eq!(options.k, 6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansOptions {
    /// Number of clusters to produce.
    pub k: usize,

    /// Hard cap on refinement iterations. Reaching it without converging
    /// yields an approximate result, not an error.
    ///
    /// Default: `40`
    pub max_iterations: usize,

    /// Iteration stops once no centroid moves further than this (Euclidean
    /// distance in 0..=255 RGB units).
    ///
    /// Default: `0.2`
    pub convergence_threshold: f64,

    /// Starting centroid selection.
    pub init: InitStrategy,

    /// Independent runs; the one with the lowest inertia is kept. Only
    /// meaningful with [`InitStrategy::PlusPlus`].
    ///
    /// Default: `1`
    pub attempts: usize,
}

impl KMeansOptions {
    /// Create options for `k` clusters with default values.
    #[inline]
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iterations: 40,
            convergence_threshold: 0.2,
            init: InitStrategy::default(),
            attempts: 1,
        }
    }

    #[inline]
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    #[inline]
    pub fn convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold;
        self
    }

    #[inline]
    pub fn init(mut self, init: InitStrategy) -> Self {
        self.init = init;
        self
    }

    #[inline]
    pub fn attempts(mut self, attempts: usize) -> Self {
        self.attempts = attempts;
        self
    }

    pub(crate) fn validate(&self, sample_count: usize) -> Result<(), KMeansError> {
        if self.k == 0 {
            return Err(KMeansError::ZeroClusters);
        }
        if sample_count == 0 {
            return Err(KMeansError::NoSamples);
        }
        if self.max_iterations == 0 {
            return Err(KMeansError::ZeroIterations);
        }
        if self.attempts == 0 {
            return Err(KMeansError::ZeroAttempts);
        }
        if !self.convergence_threshold.is_finite() || self.convergence_threshold < 0.0 {
            return Err(KMeansError::InvalidThreshold(self.convergence_threshold));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let opts = KMeansOptions::new(6);
        assert_eq!(opts.k, 6);
        assert_eq!(opts.max_iterations, 40);
        assert_eq!(opts.convergence_threshold, 0.2);
        assert_eq!(opts.init, InitStrategy::EvenlySpaced);
        assert_eq!(opts.attempts, 1);
    }

    #[test]
    fn test_builder_chain() {
        let opts = KMeansOptions::new(3)
            .max_iterations(10)
            .convergence_threshold(0.0)
            .init(InitStrategy::PlusPlus { seed: 7 })
            .attempts(2);
        assert_eq!(opts.max_iterations, 10);
        assert_eq!(opts.convergence_threshold, 0.0);
        assert_eq!(opts.init, InitStrategy::PlusPlus { seed: 7 });
        assert_eq!(opts.attempts, 2);
    }

    #[test]
    fn test_validate() {
        assert_eq!(KMeansOptions::new(2).validate(10), Ok(()));
        assert_eq!(
            KMeansOptions::new(0).validate(10),
            Err(KMeansError::ZeroClusters)
        );
        assert_eq!(KMeansOptions::new(2).validate(0), Err(KMeansError::NoSamples));
        assert_eq!(
            KMeansOptions::new(2).max_iterations(0).validate(10),
            Err(KMeansError::ZeroIterations)
        );
        assert_eq!(
            KMeansOptions::new(2).attempts(0).validate(10),
            Err(KMeansError::ZeroAttempts)
        );
        assert!(matches!(
            KMeansOptions::new(2)
                .convergence_threshold(f64::NAN)
                .validate(10),
            Err(KMeansError::InvalidThreshold(_))
        ));
    }

    #[test]
    fn test_k_checked_before_samples() {
        // k = 0 with no samples still reports the cluster count
        assert_eq!(KMeansOptions::new(0).validate(0), Err(KMeansError::ZeroClusters));
    }
}
