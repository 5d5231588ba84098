use crate::assets::AssetLoader;
use crate::models::{InitKind, MetricKind, OutputFormat, SortOrder};
use palette_match::{InitStrategy, KMeansOptions};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub extraction: ExtractionConfig,

    #[serde(default)]
    pub palette: PaletteConfig,

    #[serde(default)]
    pub contrast: ContrastConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Image sampling and k-means settings
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Number of dominant colors
    pub k: usize,
    pub max_iterations: usize,
    /// Largest centroid movement (RGB units) still counted as converged
    pub convergence_threshold: f64,
    pub init: InitKind,
    /// Seed for k-means++ and for pixel subsampling
    pub seed: u64,
    pub attempts: usize,
    /// Longest image side after downscaling
    pub max_side: u32,
    /// Maximum number of pixels fed to k-means
    pub sample_limit: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            k: 6,
            max_iterations: 40,
            convergence_threshold: 0.2,
            init: InitKind::PlusPlus,
            seed: 42,
            attempts: 3,
            max_side: 1024,
            sample_limit: 400_000,
        }
    }
}

impl ExtractionConfig {
    /// k-means options for this configuration
    pub fn kmeans_options(&self) -> KMeansOptions {
        let init = match self.init {
            InitKind::EvenlySpaced => InitStrategy::EvenlySpaced,
            InitKind::PlusPlus => InitStrategy::PlusPlus { seed: self.seed },
        };
        KMeansOptions::new(self.k)
            .max_iterations(self.max_iterations)
            .convergence_threshold(self.convergence_threshold)
            .init(init)
            .attempts(self.attempts)
    }
}

/// Where the reference palette comes from
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PaletteConfig {
    /// Remote colors.js candidates, tried in order
    pub urls: Vec<String>,
    pub timeout_secs: u64,
    /// Local palette file; disables downloads when set
    pub file: Option<PathBuf>,
    pub metric: MetricKind,
}

/// Tailwind v3 colors.js mirrors
pub const DEFAULT_PALETTE_URLS: [&str; 3] = [
    "https://cdn.jsdelivr.net/npm/tailwindcss@3.4.10/src/public/colors.js",
    "https://unpkg.com/tailwindcss@3.4.10/src/public/colors.js",
    "https://raw.githubusercontent.com/tailwindlabs/tailwindcss/master/src/public/colors.js",
];

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            urls: DEFAULT_PALETTE_URLS.iter().map(|s| s.to_string()).collect(),
            timeout_secs: 6,
            file: None,
            metric: MetricKind::default(),
        }
    }
}

impl PaletteConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ContrastConfig {
    /// Minimum contrast ratio for the AA pass flags
    pub aa_threshold: f64,
}

impl Default for ContrastConfig {
    fn default() -> Self {
        Self {
            aa_threshold: palette_match::DEFAULT_AA_THRESHOLD,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub sort: SortOrder,
    pub format: OutputFormat,
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    let config: Self = config;
                    tracing::info!(
                        k = config.extraction.k,
                        urls = config.palette.urls.len(),
                        palette_file = ?config.palette.file,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.extraction.k, 6);
        assert_eq!(config.extraction.max_iterations, 40);
        assert_eq!(config.extraction.convergence_threshold, 0.2);
        assert_eq!(config.extraction.init, InitKind::PlusPlus);
        assert_eq!(config.extraction.seed, 42);
        assert_eq!(config.extraction.max_side, 1024);
        assert_eq!(config.extraction.sample_limit, 400_000);
        assert_eq!(config.palette.urls.len(), 3);
        assert_eq!(config.palette.timeout(), Duration::from_secs(6));
        assert!(config.palette.file.is_none());
        assert_eq!(config.contrast.aa_threshold, 4.5);
        assert_eq!(config.output.sort, SortOrder::Weight);
        assert_eq!(config.output.format, OutputFormat::Table);
    }

    #[test]
    fn test_embedded_config_matches_defaults() {
        let loader = AssetLoader::new(None);
        let config = AppConfig::load_from_assets(&loader);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let yaml = r#"
extraction:
  k: 8
  init: evenly-spaced
palette:
  file: ./brand.yaml
  metric: cie76
output:
  sort: hue
"#;

        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.extraction.k, 8);
        assert_eq!(config.extraction.init, InitKind::EvenlySpaced);
        // Untouched keys keep their defaults
        assert_eq!(config.extraction.max_iterations, 40);
        assert_eq!(config.palette.file, Some(PathBuf::from("./brand.yaml")));
        assert_eq!(config.palette.metric, MetricKind::Cie76);
        assert_eq!(config.palette.urls.len(), 3);
        assert_eq!(config.output.sort, SortOrder::Hue);
        assert_eq!(config.contrast.aa_threshold, 4.5);
    }

    #[test]
    fn test_empty_document_is_default() {
        let config: AppConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_kmeans_options() {
        let extraction = ExtractionConfig::default();
        let opts = extraction.kmeans_options();
        assert_eq!(opts.k, 6);
        assert_eq!(opts.init, InitStrategy::PlusPlus { seed: 42 });
        assert_eq!(opts.attempts, 3);

        let evenly = ExtractionConfig {
            init: InitKind::EvenlySpaced,
            ..Default::default()
        };
        assert_eq!(evenly.kmeans_options().init, InitStrategy::EvenlySpaced);
    }

    #[test]
    fn test_missing_external_file_falls_back_to_embedded() {
        let loader = AssetLoader::new(Some(PathBuf::from("/nonexistent/hueprint.yaml")));
        let config = AppConfig::load_from_assets(&loader);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_unparseable_file_uses_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "extraction: [not, a, map").unwrap();

        let config = AppConfig::load_from_assets(&AssetLoader::new(Some(path)));
        assert_eq!(config, AppConfig::default());
    }
}
