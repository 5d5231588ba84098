//! Lloyd's k-means over RGB samples.
//!
//! Centroids live in f64 RGB space while iterating and are rounded to
//! [`Rgb`] at the end. Final cluster weights are counted against the rounded
//! centroids, so the reported color and its weight always agree.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use super::error::KMeansError;
use super::options::{InitStrategy, KMeansOptions};
use crate::color::Rgb;

type Point = [f64; 3];

/// One dominant color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cluster {
    /// Mean color of the cluster's members
    pub centroid: Rgb,
    /// Fraction of the weighed population assigned to this cluster
    pub weight: f64,
    /// Number of members in the weighed population
    pub count: usize,
}

/// Output of [`kmeans`]: exactly `k` clusters sorted by weight, descending.
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
    clusters: Vec<Cluster>,
    iterations: usize,
    converged: bool,
    inertia: f64,
}

impl Clustering {
    #[inline]
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    #[inline]
    pub fn into_clusters(self) -> Vec<Cluster> {
        self.clusters
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// Always `false`: k is validated to be at least 1.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn centroids(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.clusters.iter().map(|c| c.centroid)
    }

    /// Iterations run by the kept attempt.
    #[inline]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// `false` when the iteration cap was hit before centroids settled. The
    /// clusters are still valid, just approximate.
    #[inline]
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Sum of squared distances from each sample to its centroid.
    #[inline]
    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    /// Recount weights over another population, e.g. the full image when
    /// clustering ran on a subsample. Clusters are re-sorted by the new
    /// weights.
    ///
    /// # Errors
    ///
    /// [`KMeansError::NoSamples`] if `population` is empty.
    pub fn reweigh(&mut self, population: &[Rgb]) -> Result<(), KMeansError> {
        if population.is_empty() {
            return Err(KMeansError::NoSamples);
        }
        let centroids: Vec<Rgb> = self.centroids().collect();
        self.clusters = weigh(&centroids, population);
        Ok(())
    }
}

/// Cluster `samples` into exactly `options.k` groups.
///
/// Deterministic: identical samples and options produce identical output.
/// Empty clusters are reseeded during iteration, so all `k` clusters carry a
/// centroid; when the input has fewer distinct colors than `k` some
/// centroids repeat (with zero weight for the later duplicates).
///
/// # Errors
///
/// Returns a [`KMeansError`] for `k == 0`, empty `samples`, zero iterations
/// or attempts, or a negative / non-finite threshold.
///
/// # Example
///
/// ```
/// use palette_match::{kmeans, KMeansOptions, Rgb};
///
/// let mut samples = vec![Rgb::new(255, 0, 0); 500];
/// samples.extend(vec![Rgb::new(0, 0, 255); 500]);
///
/// let result = kmeans(&samples, &KMeansOptions::new(2)).unwrap();
/// assert_eq!(result.len(), 2);
/// assert!(result.clusters().iter().all(|c| (c.weight - 0.5).abs() < 1e-9));
/// ```
pub fn kmeans(samples: &[Rgb], options: &KMeansOptions) -> Result<Clustering, KMeansError> {
    options.validate(samples.len())?;

    let points: Vec<Point> = samples.iter().map(|&c| to_point(c)).collect();
    let attempts = match options.init {
        InitStrategy::EvenlySpaced => 1,
        InitStrategy::PlusPlus { .. } => options.attempts,
    };

    let mut best: Option<Run> = None;
    for attempt in 0..attempts {
        let init = initial_centroids(&points, options.k, options.init, attempt as u64);
        let run = lloyd(&points, init, options);
        tracing::debug!(
            attempt,
            iterations = run.iterations,
            converged = run.converged,
            inertia = run.inertia,
            "k-means attempt finished"
        );
        if best.as_ref().map_or(true, |b| run.inertia < b.inertia) {
            best = Some(run);
        }
    }

    // attempts >= 1 was validated, so at least one run exists
    let Some(run) = best else {
        return Err(KMeansError::ZeroAttempts);
    };

    if !run.converged {
        tracing::debug!(
            max_iterations = options.max_iterations,
            "k-means hit the iteration cap; result is approximate"
        );
    }

    let centroids: Vec<Rgb> = run.centroids.iter().map(|&p| to_rgb(p)).collect();
    Ok(Clustering {
        clusters: settle(centroids, samples),
        iterations: run.iterations,
        converged: run.converged,
        inertia: run.inertia,
    })
}

struct Run {
    centroids: Vec<Point>,
    iterations: usize,
    converged: bool,
    inertia: f64,
}

fn lloyd(points: &[Point], mut centroids: Vec<Point>, options: &KMeansOptions) -> Run {
    let k = centroids.len();
    let mut labels = vec![0usize; points.len()];
    let mut iterations = 0;
    let mut converged = false;

    while iterations < options.max_iterations {
        iterations += 1;

        for (label, p) in labels.iter_mut().zip(points) {
            *label = nearest(&centroids, p).0;
        }

        let mut sums = vec![[0.0f64; 3]; k];
        let mut counts = vec![0usize; k];
        for (&label, p) in labels.iter().zip(points) {
            for ch in 0..3 {
                sums[label][ch] += p[ch];
            }
            counts[label] += 1;
        }

        let mut next = centroids.clone();
        let mut empty = Vec::new();
        for j in 0..k {
            if counts[j] == 0 {
                empty.push(j);
            } else {
                let n = counts[j] as f64;
                next[j] = [sums[j][0] / n, sums[j][1] / n, sums[j][2] / n];
            }
        }
        if !empty.is_empty() {
            reseed_empty(points, &mut next, &counts, &empty);
        }

        let movement = centroids
            .iter()
            .zip(&next)
            .map(|(a, b)| distance_squared(a, b).sqrt())
            .fold(0.0f64, f64::max);
        centroids = next;

        if movement <= options.convergence_threshold {
            converged = true;
            break;
        }
    }

    let inertia = points.iter().map(|p| nearest(&centroids, p).1).sum();

    Run {
        centroids,
        iterations,
        converged,
        inertia,
    }
}

/// Move each empty cluster onto the sample farthest from every live centroid.
///
/// Each pick shrinks the distances around it, so two empty clusters never
/// land on the same sample unless all samples are already covered, in which
/// case the old (duplicate) centroid is kept.
fn reseed_empty(points: &[Point], centroids: &mut [Point], counts: &[usize], empty: &[usize]) {
    let live: Vec<Point> = counts
        .iter()
        .zip(centroids.iter())
        .filter(|(&count, _)| count > 0)
        .map(|(_, &c)| c)
        .collect();
    let mut gap: Vec<f64> = points.iter().map(|p| nearest(&live, p).1).collect();

    for &j in empty {
        let (far_idx, far_dist) = gap
            .iter()
            .enumerate()
            .fold((0, 0.0f64), |best, (i, &d)| if d > best.1 { (i, d) } else { best });

        if far_dist == 0.0 {
            tracing::debug!(cluster = j, "no uncovered samples; keeping duplicate centroid");
            continue;
        }

        let pick = points[far_idx];
        tracing::debug!(cluster = j, sample = far_idx, "reseeded empty cluster");
        centroids[j] = pick;
        for (g, p) in gap.iter_mut().zip(points) {
            *g = g.min(distance_squared(p, &pick));
        }
    }
}

fn initial_centroids(points: &[Point], k: usize, init: InitStrategy, attempt: u64) -> Vec<Point> {
    let n = points.len();
    match init {
        InitStrategy::EvenlySpaced => (0..k).map(|i| points[i * n / k]).collect(),
        InitStrategy::PlusPlus { seed } => {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(attempt));
            let mut centroids = Vec::with_capacity(k);
            centroids.push(points[rng.gen_range(0..n)]);

            let mut gap: Vec<f64> = points
                .iter()
                .map(|p| distance_squared(p, &centroids[0]))
                .collect();

            while centroids.len() < k {
                let total: f64 = gap.iter().sum();
                let idx = if total > 0.0 {
                    let mut target = rng.gen::<f64>() * total;
                    let mut chosen = n - 1;
                    for (i, &d) in gap.iter().enumerate() {
                        if target < d {
                            chosen = i;
                            break;
                        }
                        target -= d;
                    }
                    chosen
                } else {
                    // Every sample already coincides with a centroid
                    rng.gen_range(0..n)
                };

                let pick = points[idx];
                for (g, p) in gap.iter_mut().zip(points) {
                    *g = g.min(distance_squared(p, &pick));
                }
                centroids.push(pick);
            }
            centroids
        }
    }
}

/// Weigh the rounded centroids, first moving any centroid that rounding left
/// without members onto the sample farthest from every centroid.
///
/// Each move covers one more distinct sample color and uncovers none, so the
/// loop ends. It stops early only when every sample already sits on a
/// centroid, which with k or more distinct colors means no cluster is empty.
fn settle(mut centroids: Vec<Rgb>, samples: &[Rgb]) -> Vec<Cluster> {
    loop {
        let points: Vec<Point> = centroids.iter().map(|&c| to_point(c)).collect();
        let mut counts = vec![0usize; points.len()];
        let mut far = (0usize, 0.0f64);
        for (i, &c) in samples.iter().enumerate() {
            let (j, d) = nearest(&points, &to_point(c));
            counts[j] += 1;
            if d > far.1 {
                far = (i, d);
            }
        }

        let Some(empty) = counts.iter().position(|&n| n == 0) else {
            break;
        };
        if far.1 == 0.0 {
            break;
        }
        tracing::debug!(cluster = empty, sample = far.0, "moved memberless centroid");
        centroids[empty] = samples[far.0];
    }
    weigh(&centroids, samples)
}

/// Count each sample against its nearest centroid and build sorted clusters.
fn weigh(centroids: &[Rgb], population: &[Rgb]) -> Vec<Cluster> {
    let points: Vec<Point> = centroids.iter().map(|&c| to_point(c)).collect();
    let mut counts = vec![0usize; centroids.len()];
    for &c in population {
        counts[nearest(&points, &to_point(c)).0] += 1;
    }

    let total = population.len() as f64;
    let mut clusters: Vec<Cluster> = centroids
        .iter()
        .zip(counts)
        .map(|(&centroid, count)| Cluster {
            centroid,
            weight: count as f64 / total,
            count,
        })
        .collect();

    // Stable: equal weights keep centroid order
    clusters.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    clusters
}

/// Index of and squared distance to the nearest centroid; first index wins ties.
#[inline]
fn nearest(centroids: &[Point], p: &Point) -> (usize, f64) {
    let mut best_idx = 0;
    let mut best_dist = f64::INFINITY;
    for (i, c) in centroids.iter().enumerate() {
        let d = distance_squared(p, c);
        if d < best_dist {
            best_dist = d;
            best_idx = i;
        }
    }
    (best_idx, best_dist)
}

#[inline]
fn distance_squared(a: &Point, b: &Point) -> f64 {
    let dr = a[0] - b[0];
    let dg = a[1] - b[1];
    let db = a[2] - b[2];
    dr * dr + dg * dg + db * db
}

#[inline]
fn to_point(c: Rgb) -> Point {
    [f64::from(c.r), f64::from(c.g), f64::from(c.b)]
}

#[inline]
fn to_rgb(p: Point) -> Rgb {
    let [r, g, b] = p.map(|v| v.round().clamp(0.0, 255.0) as u8);
    Rgb::new(r, g, b)
}
