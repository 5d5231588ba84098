//! Asset loading with embedded fallbacks
//!
//! Two assets ship inside the binary:
//!
//! - `config.yaml`: default configuration. If `CONFIG_FILE` (or `--config`)
//!   names an existing file, that file is used instead.
//! - `palettes/tailwind.yaml`: the bundled Tailwind subset used when no
//!   palette file is configured and every download fails.

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Embedded default config
#[derive(RustEmbed)]
#[folder = "."]
#[include = "config.yaml"]
struct EmbeddedConfig;

/// Embedded fallback palettes
#[derive(RustEmbed)]
#[folder = "palettes/"]
#[include = "*.yaml"]
struct EmbeddedPalettes;

/// File name of the bundled fallback palette
pub const BUNDLED_PALETTE: &str = "tailwind.yaml";

/// Asset category for selective operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetCategory {
    Config,
    Palettes,
}

/// Report of init (extraction) operations
#[derive(Debug, Default)]
pub struct InitReport {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

/// Asset loader with optional filesystem override
pub struct AssetLoader {
    /// External config file path (from CONFIG_FILE env var or --config)
    config_file: Option<PathBuf>,
}

impl AssetLoader {
    /// Create a new asset loader
    ///
    /// `config_file` should be `Some` only if the user named one. If `None`,
    /// the embedded config is used.
    pub fn new(config_file: Option<PathBuf>) -> Self {
        Self { config_file }
    }

    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Read the config file
    ///
    /// If an external path is configured and exists, uses that.
    /// Otherwise falls back to embedded config.
    pub fn read_config(&self) -> io::Result<Cow<'static, [u8]>> {
        // Try external first
        if let Some(ref path) = self.config_file {
            if path.exists() {
                tracing::trace!(path = %path.display(), "Loading config from filesystem");
                return Ok(Cow::Owned(fs::read(path)?));
            }
            tracing::warn!(path = %path.display(), "Config file not found, using embedded config");
        }

        // Fall back to embedded
        EmbeddedConfig::get("config.yaml")
            .map(|f| {
                tracing::trace!("Loading config from embedded assets");
                f.data
            })
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Embedded config.yaml not found")
            })
    }

    /// Read config as a UTF-8 string
    pub fn read_config_string(&self) -> io::Result<String> {
        let bytes = self.read_config()?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Read the bundled fallback palette document
    pub fn read_bundled_palette() -> io::Result<String> {
        let file = EmbeddedPalettes::get(BUNDLED_PALETTE).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("Embedded palette not found: {BUNDLED_PALETTE}"),
            )
        })?;
        String::from_utf8(file.data.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Extract embedded assets to filesystem (init command)
    ///
    /// Config goes to the configured path (or `./config.yaml`), palettes to
    /// `palettes_dir`.
    pub fn init(
        &self,
        categories: &[AssetCategory],
        palettes_dir: &Path,
        force: bool,
    ) -> io::Result<InitReport> {
        let mut report = InitReport::default();

        for category in categories {
            match category {
                AssetCategory::Config => {
                    let path = self
                        .config_file
                        .clone()
                        .unwrap_or_else(|| PathBuf::from("./config.yaml"));

                    if !force && path.exists() {
                        report.skipped.push(path.display().to_string());
                        continue;
                    }
                    if let Some(parent) = path.parent() {
                        fs::create_dir_all(parent)?;
                    }
                    if let Some(data) = EmbeddedConfig::get("config.yaml") {
                        fs::write(&path, &*data.data)?;
                        report.written.push(path.display().to_string());
                    }
                }
                AssetCategory::Palettes => {
                    fs::create_dir_all(palettes_dir)?;

                    for file in EmbeddedPalettes::iter() {
                        let path = palettes_dir.join(file.as_ref());
                        if !force && path.exists() {
                            report.skipped.push(path.display().to_string());
                            continue;
                        }
                        if let Some(data) = EmbeddedPalettes::get(&file) {
                            fs::write(&path, &*data.data)?;
                            report.written.push(path.display().to_string());
                        }
                    }
                }
            }
        }

        Ok(report)
    }

    /// List embedded assets by category (for display)
    pub fn list_embedded(category: AssetCategory) -> Vec<String> {
        match category {
            AssetCategory::Config => vec!["config.yaml".to_string()],
            AssetCategory::Palettes => EmbeddedPalettes::iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_embedded_config_present() {
        let loader = AssetLoader::new(None);
        let content = loader.read_config_string().unwrap();
        assert!(content.contains("extraction:"));
    }

    #[test]
    fn test_external_config_takes_priority() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.yaml");
        fs::write(&path, "extraction:\n  k: 3\n").unwrap();

        let loader = AssetLoader::new(Some(path));
        assert_eq!(loader.read_config_string().unwrap(), "extraction:\n  k: 3\n");
    }

    #[test]
    fn test_bundled_palette_present() {
        let content = AssetLoader::read_bundled_palette().unwrap();
        assert!(content.contains("slate:"));
        assert!(content.contains("\"#e11d48\""));
    }

    #[test]
    fn test_list_embedded() {
        assert_eq!(
            AssetLoader::list_embedded(AssetCategory::Config),
            vec!["config.yaml".to_string()]
        );
        assert!(AssetLoader::list_embedded(AssetCategory::Palettes)
            .contains(&BUNDLED_PALETTE.to_string()));
    }

    #[test]
    fn test_init_writes_then_skips() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yaml");
        let palettes_dir = dir.path().join("palettes");
        let loader = AssetLoader::new(Some(config_path.clone()));
        let categories = [AssetCategory::Config, AssetCategory::Palettes];

        let first = loader.init(&categories, &palettes_dir, false).unwrap();
        assert_eq!(first.written.len(), 2);
        assert!(first.skipped.is_empty());
        assert!(config_path.exists());
        assert!(palettes_dir.join(BUNDLED_PALETTE).exists());

        let second = loader.init(&categories, &palettes_dir, false).unwrap();
        assert!(second.written.is_empty());
        assert_eq!(second.skipped.len(), 2);

        let forced = loader.init(&categories, &palettes_dir, true).unwrap();
        assert_eq!(forced.written.len(), 2);
    }
}
