//! Dominant color extraction by k-means clustering.
//!
//! Clustering runs in RGB: it only needs to find representative colors, and
//! the perceptual metric is applied afterwards when centroids are matched
//! against the palette.

mod error;
mod kmeans;
mod options;

pub use error::KMeansError;
pub use kmeans::{kmeans, Cluster, Clustering};
pub use options::{InitStrategy, KMeansOptions};
