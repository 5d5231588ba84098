//! Load-once palette holder with explicit reload.
//!
//! Readers get an `Arc<Palette>` snapshot; a reload swaps the snapshot
//! without disturbing analyses already holding the old one.

use std::sync::{Arc, PoisonError, RwLock};

use palette_match::Palette;

use crate::error::SourceError;
use crate::services::palette_loader::{PaletteLoader, PaletteSource};

struct Current {
    palette: Arc<Palette>,
    source: PaletteSource,
}

pub struct PaletteStore {
    loader: PaletteLoader,
    current: RwLock<Current>,
}

impl PaletteStore {
    /// Load the palette once; fails only if the loader fails.
    pub fn load(loader: PaletteLoader) -> Result<Self, SourceError> {
        let loaded = loader.load()?;
        Ok(Self {
            loader,
            current: RwLock::new(Current {
                palette: Arc::new(loaded.palette),
                source: loaded.source,
            }),
        })
    }

    pub fn current(&self) -> Arc<Palette> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .palette
            .clone()
    }

    pub fn source(&self) -> PaletteSource {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .source
            .clone()
    }

    /// Load again and swap in the result.
    ///
    /// On error the previous palette stays current.
    pub fn reload(&self) -> Result<Arc<Palette>, SourceError> {
        let loaded = self.loader.load()?;
        let palette = Arc::new(loaded.palette);

        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        tracing::info!(
            from = %current.source,
            to = %loaded.source,
            entries = palette.len(),
            "Reloaded palette"
        );
        *current = Current {
            palette: palette.clone(),
            source: loaded.source,
        };
        Ok(palette)
    }
}
