pub mod analysis_pipeline;
pub mod image_sampler;
pub mod palette_loader;
pub mod palette_store;

pub use analysis_pipeline::{AnalysisPipeline, ImageReport};
pub use image_sampler::{sample_bytes, sample_image, sample_path, Sampled, SamplerOptions};
pub use palette_loader::{LoadedPalette, PaletteLoader, PaletteSource};
pub use palette_store::PaletteStore;
