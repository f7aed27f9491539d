//! The compositing pass: video frame first, overlay second.
//!
//! Ordering is an invariant — the frame is always painted before the
//! overlay so the sticker can never be occluded by the feed.

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::error::{Error, Result};
use crate::platform::camera::VideoFrame;
use crate::rendering::DrawSurface;
use crate::{Overlay, OverlayPlacement};

/// Paint `frame` stretched to fill the whole surface, then alpha-blend the
/// overlay (if any) at its fixed placement on top.
pub fn compose(
    surface: &mut DrawSurface,
    frame: &VideoFrame,
    overlay: Option<&Overlay>,
    placement: &OverlayPlacement,
) -> Result<()> {
    if frame.width == 0 || frame.height == 0 {
        return Err(Error::Render("empty video frame".into()));
    }
    let src = RgbaImage::from_raw(frame.width, frame.height, frame.data.clone())
        .ok_or_else(|| Error::Render("frame buffer does not match its dimensions".into()))?;

    let (sw, sh) = (surface.width(), surface.height());
    // Stretch-to-fill, matching canvas drawImage(video, 0, 0, w, h) semantics.
    *surface.pixels_mut() = if (frame.width, frame.height) == (sw, sh) {
        src
    } else {
        imageops::resize(&src, sw, sh, FilterType::Triangle)
    };

    if let Some(overlay) = overlay {
        let stamp = scaled_overlay(overlay, placement.scale);
        imageops::overlay(surface.pixels_mut(), &stamp, placement.x, placement.y);
    }

    Ok(())
}

fn scaled_overlay(overlay: &Overlay, scale: f32) -> RgbaImage {
    let image = overlay.image();
    if (scale - 1.0).abs() < f32::EPSILON {
        return image.clone();
    }
    let w = ((image.width() as f32 * scale).round() as u32).max(1);
    let h = ((image.height() as f32 * scale).round() as u32).max(1);
    imageops::resize(image, w, h, FilterType::Triangle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_overlay(w: u32, h: u32, rgba: [u8; 4]) -> Overlay {
        let img = RgbaImage::from_pixel(w, h, image::Rgba(rgba));
        Overlay::from_image(img)
    }

    #[test]
    fn frame_fills_the_whole_surface() {
        let mut surface = DrawSurface::new(16, 16).unwrap();
        let frame = VideoFrame::solid(4, 4, [10, 20, 30, 255]);
        compose(&mut surface, &frame, None, &OverlayPlacement::default()).unwrap();
        assert_eq!(surface.pixels().get_pixel(0, 0).0, [10, 20, 30, 255]);
        assert_eq!(surface.pixels().get_pixel(15, 15).0, [10, 20, 30, 255]);
    }

    #[test]
    fn overlay_is_painted_on_top_of_the_frame() {
        let mut surface = DrawSurface::new(16, 16).unwrap();
        let frame = VideoFrame::solid(16, 16, [0, 0, 255, 255]);
        let overlay = solid_overlay(4, 4, [255, 0, 0, 255]);
        let placement = OverlayPlacement {
            x: 2,
            y: 2,
            scale: 1.0,
        };
        compose(&mut surface, &frame, Some(&overlay), &placement).unwrap();
        // Inside the stamp: overlay wins
        assert_eq!(surface.pixels().get_pixel(3, 3).0, [255, 0, 0, 255]);
        // Outside the stamp: feed shows through
        assert_eq!(surface.pixels().get_pixel(10, 10).0, [0, 0, 255, 255]);
    }

    #[test]
    fn transparent_overlay_pixels_let_the_feed_through() {
        let mut surface = DrawSurface::new(8, 8).unwrap();
        let frame = VideoFrame::solid(8, 8, [0, 255, 0, 255]);
        let overlay = solid_overlay(4, 4, [255, 0, 0, 0]);
        let placement = OverlayPlacement {
            x: 0,
            y: 0,
            scale: 1.0,
        };
        compose(&mut surface, &frame, Some(&overlay), &placement).unwrap();
        assert_eq!(surface.pixels().get_pixel(1, 1).0, [0, 255, 0, 255]);
    }

    #[test]
    fn malformed_frame_is_a_render_error() {
        let mut surface = DrawSurface::new(8, 8).unwrap();
        let frame = VideoFrame {
            width: 8,
            height: 8,
            data: vec![0; 7], // wrong length
        };
        assert!(matches!(
            compose(&mut surface, &frame, None, &OverlayPlacement::default()),
            Err(Error::Render(_))
        ));
    }
}
