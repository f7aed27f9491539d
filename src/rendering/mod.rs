//! Drawing surface, compositing pass, and PNG/data-URI encoding

pub mod compose;
pub mod encode;

use image::RgbaImage;

use crate::error::{Error, Result};

/// A fixed-size RGBA drawing surface the controller composites into.
#[derive(Debug, Clone)]
pub struct DrawSurface {
    pixels: RgbaImage,
}

impl DrawSurface {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::Config(format!(
                "draw surface dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }
        Ok(Self {
            pixels: RgbaImage::new(width, height),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut RgbaImage {
        &mut self.pixels
    }
}

/// The flattened contents of a drawing surface at one instant.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub width: u32,
    pub height: u32,
    pub png_data: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_rejects_zero_dimensions() {
        assert!(matches!(DrawSurface::new(0, 10), Err(Error::Config(_))));
        assert!(matches!(DrawSurface::new(10, 0), Err(Error::Config(_))));
    }

    #[test]
    fn surface_starts_transparent() {
        let s = DrawSurface::new(4, 4).unwrap();
        assert_eq!(s.pixels().get_pixel(0, 0).0, [0, 0, 0, 0]);
    }
}
