//! SlapSticker Capture Core
//!
//! A headless capture-and-composite engine for webcam snapshot apps. The
//! [`CaptureController`] owns a live camera stream, renders frames onto a
//! fixed-size drawing surface, optionally blits a sticker overlay on top,
//! and on demand flattens the surface into an immutable picture encoded as
//! a PNG data URI.
//!
//! # Features
//!
//! - **Capability traits**: cameras and preview sinks are trait objects, so
//!   the engine runs identically against hardware backends and the bundled
//!   deterministic test doubles
//! - **Explicit lifecycle**: the camera is acquired only on attach and
//!   released deterministically on detach (and on drop)
//! - **Safe failure**: capture before a stream exists fails with
//!   [`Error::NotReady`] instead of producing a blank image
//!
//! # Example
//!
//! ```
//! use slapsticker::platform::{MockCamera, NoopVideoSink};
//! use slapsticker::{CaptureController, ControllerConfig};
//! use std::sync::Arc;
//!
//! # fn main() -> slapsticker::Result<()> {
//! let camera = Arc::new(MockCamera::granting(64, 48, [0, 0, 255, 255]));
//! let mut controller = CaptureController::new(ControllerConfig::default(), camera);
//! controller.attach_draw_surface(64, 48)?;
//! controller.attach_video_sink(Some(Box::new(NoopVideoSink::new())))?;
//!
//! let picture = controller.capture("hello")?;
//! assert!(picture.data_uri.starts_with("data:image/png;base64,"));
//! assert_eq!(picture.title, "hello");
//! # Ok(())
//! # }
//! ```

use image::RgbaImage;
use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{Error, Result};

pub mod platform;

pub mod rendering;

pub mod controller;
pub use controller::CaptureController;

// Async-friendly facade (worker-backed, mirrors the sync controller)
pub mod async_api;
pub use async_api::AsyncController;

pub mod gallery;
pub use gallery::{Gallery, TitleField, TITLE_PLACEHOLDER};

pub mod stickers;
pub use stickers::{StickerRef, STICKER_CATALOG};

/// Pixel dimensions of the drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

/// Fixed position and scale at which the overlay is blitted.
///
/// Coordinates are in surface pixels, measured from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayPlacement {
    pub x: i64,
    pub y: i64,
    pub scale: f32,
}

impl Default for OverlayPlacement {
    fn default() -> Self {
        Self {
            x: 16,
            y: 16,
            scale: 1.0,
        }
    }
}

/// Configuration for a capture controller
///
/// The defaults are chosen to match a typical webcam preview: a 640x480
/// surface with the sticker stamped near the top-left corner at its
/// intrinsic size.
///
/// # Examples
///
/// ```
/// let cfg = slapsticker::ControllerConfig::default();
/// assert_eq!(cfg.surface.width, 640);
/// assert_eq!(cfg.overlay_placement.scale, 1.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ControllerConfig {
    /// Dimensions used when a draw surface is created lazily
    pub surface: SurfaceSize,
    /// Where the overlay lands on the surface
    pub overlay_placement: OverlayPlacement,
}

/// A decorative image blitted on top of the camera feed.
///
/// The controller only reads pixel data from it at render time; callers
/// keep choosing and swapping overlays freely between captures.
#[derive(Debug, Clone)]
pub struct Overlay {
    image: RgbaImage,
}

impl Overlay {
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Decode an overlay from encoded image bytes (PNG)
    pub fn from_png_bytes(bytes: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| Error::Config(format!("overlay image could not be decoded: {}", e)))?;
        Ok(Self {
            image: decoded.to_rgba8(),
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub(crate) fn image(&self) -> &RgbaImage {
        &self.image
    }
}

/// The immutable output of one capture.
///
/// `data_uri` is a permanent snapshot of what was composited at the moment
/// of capture; later changes to the title field, overlay choice, or camera
/// state never alter it. Creation time is implicit in gallery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedPicture {
    /// Composited frame encoded as a PNG data URI
    pub data_uri: String,
    /// Caller-supplied title
    pub title: String,
}
