//! PNG encoding and data-URI formatting for captured surfaces

use base64::engine::general_purpose::STANDARD;
use base64::Engine as Base64Engine;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::error::{Error, Result};
use crate::rendering::{DrawSurface, Snapshot};

const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Encode the surface contents as PNG bytes
pub fn encode_png(surface: &DrawSurface) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let encoder = PngEncoder::new(&mut out);
    encoder
        .write_image(
            surface.pixels().as_raw(),
            surface.width(),
            surface.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| Error::Encode(format!("PNG encoding failed: {}", e)))?;
    Ok(out)
}

/// Flatten the surface into a [`Snapshot`]
pub fn snapshot(surface: &DrawSurface) -> Result<Snapshot> {
    Ok(Snapshot {
        width: surface.width(),
        height: surface.height(),
        png_data: encode_png(surface)?,
    })
}

/// Wrap PNG bytes into a self-contained data URI
pub fn to_data_uri(png_data: &[u8]) -> String {
    format!("{}{}", DATA_URI_PREFIX, STANDARD.encode(png_data))
}

/// Recover the PNG bytes from a data URI produced by [`to_data_uri`]
pub fn from_data_uri(uri: &str) -> Result<Vec<u8>> {
    let b64 = uri
        .strip_prefix(DATA_URI_PREFIX)
        .ok_or_else(|| Error::Encode("not a PNG data URI".into()))?;
    STANDARD
        .decode(b64)
        .map_err(|e| Error::Encode(format!("invalid base64 payload: {}", e)))
}
