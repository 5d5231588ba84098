pub mod config;
pub mod options;

pub use config::{AppConfig, ContrastConfig, ExtractionConfig, OutputConfig, PaletteConfig};
pub use options::{InitKind, MetricKind, OutputFormat, SortOrder};
