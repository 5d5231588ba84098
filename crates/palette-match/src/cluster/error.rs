use thiserror::Error;

/// Invalid clustering input, reported before any iteration runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KMeansError {
    #[error("cluster count must be at least 1")]
    ZeroClusters,

    #[error("no pixel samples to cluster")]
    NoSamples,

    #[error("max_iterations must be at least 1")]
    ZeroIterations,

    #[error("attempts must be at least 1")]
    ZeroAttempts,

    #[error("convergence threshold must be finite and non-negative, got {0}")]
    InvalidThreshold(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            KMeansError::ZeroClusters.to_string(),
            "cluster count must be at least 1"
        );
        assert_eq!(KMeansError::NoSamples.to_string(), "no pixel samples to cluster");
        assert_eq!(
            KMeansError::InvalidThreshold(-1.0).to_string(),
            "convergence threshold must be finite and non-negative, got -1"
        );
    }
}
