//! Reference palette loading.
//!
//! A palette comes from exactly one place, checked in this order:
//!
//! 1. A local YAML/JSON file, when configured. Errors here are returned.
//! 2. Each remote Tailwind `colors.js` URL in turn. Failures are logged and
//!    the next candidate is tried.
//! 3. The bundled Tailwind subset.

use crate::assets::AssetLoader;
use crate::error::SourceError;
use crate::models::PaletteConfig;
use palette_match::{DistanceMetric, Palette, Rgb};
use regex::Regex;
use serde_yaml::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Duration;

/// Tailwind families that only alias other families
const DEPRECATED_FAMILIES: [&str; 5] = ["lightBlue", "warmGray", "trueGray", "coolGray", "blueGray"];

/// Where a loaded palette came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteSource {
    Remote(String),
    File(PathBuf),
    Bundled,
}

impl fmt::Display for PaletteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteSource::Remote(url) => write!(f, "{url}"),
            PaletteSource::File(path) => write!(f, "{}", path.display()),
            PaletteSource::Bundled => write!(f, "bundled"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedPalette {
    pub palette: Palette,
    pub source: PaletteSource,
}

/// Resolves the reference palette from file, network or bundled copy
#[derive(Debug, Clone)]
pub struct PaletteLoader {
    urls: Vec<String>,
    timeout: Duration,
    file: Option<PathBuf>,
    offline: bool,
    metric: DistanceMetric,
}

impl PaletteLoader {
    pub fn from_config(config: &PaletteConfig) -> Self {
        Self {
            urls: config.urls.clone(),
            timeout: config.timeout(),
            file: config.file.clone(),
            offline: false,
            metric: config.metric.into(),
        }
    }

    /// Skip all network requests
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Use a local palette file instead of downloading
    pub fn file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load the palette.
    ///
    /// Only a configured file or a broken bundled copy can fail; network
    /// problems fall through to the next source.
    pub fn load(&self) -> Result<LoadedPalette, SourceError> {
        if let Some(ref path) = self.file {
            let entries = load_file(path)?;
            return self.finish(entries, PaletteSource::File(path.clone()));
        }

        if !self.offline && !self.urls.is_empty() {
            let client = reqwest::blocking::Client::builder()
                .timeout(self.timeout)
                .build();
            if let Some((entries, url)) = self.fetch_first(client) {
                return self.finish(entries, PaletteSource::Remote(url));
            }
            tracing::warn!("All palette downloads failed, using bundled palette");
        }

        let content = AssetLoader::read_bundled_palette().map_err(|source| SourceError::Io {
            path: PathBuf::from(crate::assets::BUNDLED_PALETTE),
            source,
        })?;
        let entries = parse_palette_document(&content)?;
        self.finish(entries, PaletteSource::Bundled)
    }

    /// First configured URL that downloads and parses, if any
    fn fetch_first(
        &self,
        client: reqwest::Result<reqwest::blocking::Client>,
    ) -> Option<(Vec<(String, Rgb)>, String)> {
        let client = match client {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to build HTTP client");
                return None;
            }
        };

        for url in &self.urls {
            match fetch_remote(&client, url) {
                Ok(entries) => return Some((entries, url.clone())),
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "Palette download failed");
                }
            }
        }
        None
    }

    fn finish(
        &self,
        entries: Vec<(String, Rgb)>,
        source: PaletteSource,
    ) -> Result<LoadedPalette, SourceError> {
        let palette = Palette::new(entries)?.with_distance_metric(self.metric);
        tracing::info!(entries = palette.len(), source = %source, "Loaded palette");
        Ok(LoadedPalette { palette, source })
    }
}

fn load_file(path: &Path) -> Result<Vec<(String, Rgb)>, SourceError> {
    let content = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_palette_document(&content)
}

/// Download and parse one `colors.js`
pub fn fetch_remote(
    client: &reqwest::blocking::Client,
    url: &str,
) -> Result<Vec<(String, Rgb)>, SourceError> {
    tracing::debug!(url = %url, "Fetching palette");

    let response = client.get(url).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    parse_colors_js(&response.text()?)
}

fn pattern(cell: &'static OnceLock<Regex>, source: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(source).expect("static pattern compiles"))
}

/// Extract `family-shade` tokens from a Tailwind `colors.js` module.
///
/// Only `family: { shade: '#hex', ... }` blocks count; flat entries such as
/// `black: '#000'` and getter aliases are skipped, as are the deprecated
/// alias families.
pub fn parse_colors_js(text: &str) -> Result<Vec<(String, Rgb)>, SourceError> {
    static OBJECT: OnceLock<Regex> = OnceLock::new();
    static FAMILY: OnceLock<Regex> = OnceLock::new();
    static SHADE: OnceLock<Regex> = OnceLock::new();

    let object = pattern(
        &OBJECT,
        r"(?:module\.exports\s*=|export\s+default)\s*(\{[\s\S]*\})",
    )
    .captures(text)
    .and_then(|c| c.get(1))
    .ok_or(SourceError::NoColorsObject)?
    .as_str();

    let family_re = pattern(&FAMILY, r"(\w+)\s*:\s*\{([^{}]*)\}");
    let shade_re = pattern(&SHADE, r#"(\d+)\s*:\s*['"](#[0-9a-fA-F]{3,6})['"]"#);

    let mut entries = Vec::new();
    let mut families = 0usize;

    for family in family_re.captures_iter(object) {
        let name = &family[1];
        if DEPRECATED_FAMILIES.contains(&name) {
            tracing::trace!(family = name, "Skipping deprecated family");
            continue;
        }

        let before = entries.len();
        for shade in shade_re.captures_iter(&family[2]) {
            let token = format!("{name}-{}", &shade[1]);
            let rgb = parse_hex(&token, &shade[2])?;
            entries.push((token, rgb));
        }
        if entries.len() > before {
            families += 1;
        }
    }

    if families == 0 {
        return Err(SourceError::NoFamilies);
    }

    tracing::debug!(families, entries = entries.len(), "Parsed colors.js");
    Ok(entries)
}

/// Parse a YAML or JSON palette document, keeping document order.
///
/// Accepted shapes, freely mixed at the top level:
///
/// ```yaml
/// red:            # nested: tokens become red-200, red-600
///   200: "#fecaca"
///   600: "#dc2626"
/// brand: "#ff5500"  # flat: token is the key
/// ```
pub fn parse_palette_document(text: &str) -> Result<Vec<(String, Rgb)>, SourceError> {
    let document: Value = serde_yaml::from_str(text)?;
    let Value::Mapping(top) = document else {
        return Err(SourceError::InvalidDocument(
            "expected a mapping of tokens or families".to_string(),
        ));
    };

    let mut entries = Vec::new();
    for (key, value) in &top {
        let name = key_to_string(key)?;
        match value {
            Value::String(hex) => {
                let rgb = parse_hex(&name, hex)?;
                entries.push((name, rgb));
            }
            Value::Mapping(shades) => {
                for (shade, hex) in shades {
                    let token = format!("{name}-{}", key_to_string(shade)?);
                    let Value::String(hex) = hex else {
                        return Err(SourceError::InvalidDocument(format!(
                            "'{token}' is not a hex string"
                        )));
                    };
                    let rgb = parse_hex(&token, hex)?;
                    entries.push((token, rgb));
                }
            }
            _ => {
                return Err(SourceError::InvalidDocument(format!(
                    "'{name}' must be a hex string or a mapping of shades"
                )));
            }
        }
    }

    Ok(entries)
}

fn key_to_string(key: &Value) -> Result<String, SourceError> {
    match key {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(SourceError::InvalidDocument(format!(
            "unsupported key: {other:?}"
        ))),
    }
}

fn parse_hex(token: &str, hex: &str) -> Result<Rgb, SourceError> {
    Rgb::from_str(hex).map_err(|source| SourceError::Color {
        token: token.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const COLORS_JS: &str = r#"
const { warn } = require('../util/log')

module.exports = {
  inherit: 'inherit',
  current: 'currentColor',
  black: '#000',
  white: '#fff',
  slate: {
    50: '#f8fafc',
    500: '#64748b',
  },
  red: {
    500: '#ef4444',
    600: '#dc2626',
  },
  lightBlue: {
    500: '#0ea5e9',
  },
  get warmGray() {
    warn({ version: 'v3.0', from: 'warmGray', to: 'stone' })
    return this.stone
  },
}
"#;

    fn tokens(entries: &[(String, Rgb)]) -> Vec<&str> {
        entries.iter().map(|(t, _)| t.as_str()).collect()
    }

    #[test]
    fn test_parse_colors_js() {
        let entries = parse_colors_js(COLORS_JS).unwrap();
        assert_eq!(
            tokens(&entries),
            vec!["slate-50", "slate-500", "red-500", "red-600"]
        );
        assert_eq!(entries[3].1, Rgb::new(0xdc, 0x26, 0x26));
    }

    #[test]
    fn test_parse_colors_js_export_default() {
        let js = "export default { sky: { 500: \"#0ea5e9\" } }";
        let entries = parse_colors_js(js).unwrap();
        assert_eq!(tokens(&entries), vec!["sky-500"]);
    }

    #[test]
    fn test_parse_colors_js_without_object() {
        let err = parse_colors_js("<html>Not Found</html>").unwrap_err();
        assert!(matches!(err, SourceError::NoColorsObject));
    }

    #[test]
    fn test_parse_colors_js_without_families() {
        let err = parse_colors_js("module.exports = { black: '#000' }").unwrap_err();
        assert!(matches!(err, SourceError::NoFamilies));
    }

    #[test]
    fn test_parse_nested_document_keeps_order() {
        let yaml = "zinc:\n  600: \"#52525b\"\n  200: \"#e4e4e7\"\namber:\n  400: \"#f59e0b\"\n";
        let entries = parse_palette_document(yaml).unwrap();
        assert_eq!(tokens(&entries), vec!["zinc-600", "zinc-200", "amber-400"]);
    }

    #[test]
    fn test_parse_flat_json_document() {
        let json = r##"{"brand": "#ff5500", "ink": "#111"}"##;
        let entries = parse_palette_document(json).unwrap();
        assert_eq!(tokens(&entries), vec!["brand", "ink"]);
        assert_eq!(entries[1].1, Rgb::new(0x11, 0x11, 0x11));
    }

    #[test]
    fn test_parse_document_bad_hex_names_token() {
        let err = parse_palette_document("red:\n  500: \"#zzzzzz\"\n").unwrap_err();
        match err {
            SourceError::Color { token, .. } => assert_eq!(token, "red-500"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_document_rejects_list() {
        let err = parse_palette_document("- \"#fff\"\n").unwrap_err();
        assert!(matches!(err, SourceError::InvalidDocument(_)));
    }

    #[test]
    fn test_offline_uses_bundled_palette() {
        let loaded = PaletteLoader::from_config(&PaletteConfig::default())
            .offline(true)
            .load()
            .unwrap();
        assert_eq!(loaded.source, PaletteSource::Bundled);
        assert_eq!(loaded.palette.len(), 66);
        assert_eq!(loaded.palette.entries()[0].token, "slate-200");
    }

    #[test]
    fn test_client_build_failure_skips_network() {
        let config = PaletteConfig {
            urls: vec!["http://127.0.0.1:9/colors.js".to_string()],
            ..PaletteConfig::default()
        };
        let loader = PaletteLoader::from_config(&config);

        // Any reqwest error stands in for a client that could not be built
        let broken = reqwest::blocking::get("not a url").map(|_| reqwest::blocking::Client::new());
        assert!(broken.is_err());
        assert!(loader.fetch_first(broken).is_none());
    }

    #[test]
    fn test_empty_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("empty.yaml");
        std::fs::write(&path, "{}\n").unwrap();

        let err = PaletteLoader::from_config(&PaletteConfig::default())
            .file(&path)
            .load()
            .unwrap_err();
        assert!(matches!(
            err,
            SourceError::Palette(palette_match::PaletteError::EmptyPalette)
        ));
    }
}
