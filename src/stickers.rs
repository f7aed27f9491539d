//! Static sticker catalog.
//!
//! Stickers are plain asset references resolved lazily into an [`Overlay`]
//! when the caller actually picks one; nothing is decoded at startup and
//! there is no process-wide mutable sticker state.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::Overlay;

/// A reference to one sticker asset shipped with the application
#[derive(Debug, Clone, Serialize)]
pub struct StickerRef {
    /// Catalog name the caller selects by
    pub name: &'static str,
    /// Path of the PNG asset, relative to the application root
    pub asset: &'static str,
}

/// The built-in sticker choices
pub const STICKER_CATALOG: &[StickerRef] = &[
    StickerRef {
        name: "hand-1",
        asset: "assets/hand-1.png",
    },
    StickerRef {
        name: "hand-2",
        asset: "assets/hand-2.png",
    },
    StickerRef {
        name: "hand-3",
        asset: "assets/hand-3.png",
    },
    StickerRef {
        name: "hand-4",
        asset: "assets/hand-4.png",
    },
];

impl StickerRef {
    /// Look up a catalog sticker by name
    pub fn find(name: &str) -> Option<&'static StickerRef> {
        STICKER_CATALOG.iter().find(|s| s.name == name)
    }

    /// Decode the asset into an overlay
    pub fn load(&self) -> Result<Overlay> {
        let bytes = std::fs::read(self.asset).map_err(|e| {
            Error::Config(format!("sticker asset {} is unreadable: {}", self.asset, e))
        })?;
        Overlay::from_png_bytes(&bytes)
    }
}
