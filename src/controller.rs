//! The capture controller: bridges a camera stream into a drawable surface
//! and flattens it into portable snapshots on demand.
//!
//! One controller owns one capture session. The session walks a small state
//! machine: `Idle` until a video sink is attached, `Streaming` once the
//! camera grant succeeds, `Failed` when acquisition is rejected. A failed
//! acquisition is terminal for the session; attaching a sink again is the
//! explicit user re-initiation that starts a new attempt.

use std::sync::Arc;

use log::debug;

use crate::error::{Error, Result};
use crate::platform::camera::{CameraSource, CameraStream};
use crate::platform::sink::VideoSink;
use crate::rendering::{compose, encode, DrawSurface, Snapshot};
use crate::{CapturedPicture, ControllerConfig, Overlay};

enum SessionState {
    /// No stream requested yet, or released after a detach
    Idle,
    /// Live stream with active hardware tracks
    Streaming(Box<dyn CameraStream>),
    /// Acquisition was rejected; waiting for user re-initiation
    Failed,
}

/// Owns a live camera stream, a drawing surface, and an optional overlay,
/// and produces composited snapshots on demand.
pub struct CaptureController {
    config: ControllerConfig,
    source: Arc<dyn CameraSource>,
    sink: Option<Box<dyn VideoSink>>,
    surface: Option<DrawSurface>,
    overlay: Option<Overlay>,
    state: SessionState,
}

impl CaptureController {
    /// Create a controller bound to a camera source.
    ///
    /// No device work happens here; the camera is only requested when a
    /// video sink is attached.
    pub fn new(config: ControllerConfig, source: Arc<dyn CameraSource>) -> Self {
        Self {
            config,
            source,
            sink: None,
            surface: None,
            overlay: None,
            state: SessionState::Idle,
        }
    }

    /// Bind (or rebind) the live-preview sink.
    ///
    /// The first bind with `Some` requests the camera stream, which may be
    /// rejected with [`Error::PermissionDenied`] or
    /// [`Error::DeviceUnavailable`]. Passing `None` detaches: the stream is
    /// stopped synchronously and the device is released.
    pub fn attach_video_sink(&mut self, sink: Option<Box<dyn VideoSink>>) -> Result<()> {
        match sink {
            Some(sink) => {
                self.sink = Some(sink);
                if !self.is_streaming() {
                    match self.source.request_stream() {
                        Ok(stream) => {
                            debug!("camera stream acquired");
                            self.state = SessionState::Streaming(stream);
                        }
                        Err(e) => {
                            debug!("camera acquisition rejected: {}", e);
                            self.sink = None;
                            self.state = SessionState::Failed;
                            return Err(e);
                        }
                    }
                }
                Ok(())
            }
            None => {
                self.release_stream();
                self.sink = None;
                Ok(())
            }
        }
    }

    /// Bind the controller to a drawing surface of fixed pixel dimensions
    pub fn attach_draw_surface(&mut self, width: u32, height: u32) -> Result<()> {
        self.surface = Some(DrawSurface::new(width, height)?);
        Ok(())
    }

    /// Choose the overlay blitted on top of all subsequent renders and
    /// captures. `None` clears it (plain feed).
    pub fn set_overlay(&mut self, overlay: Option<Overlay>) {
        self.overlay = overlay;
    }

    /// Whether a live stream with active tracks is bound
    pub fn is_streaming(&self) -> bool {
        match &self.state {
            SessionState::Streaming(stream) => stream.is_active(),
            _ => false,
        }
    }

    /// Pull the latest camera frame, present it to the sink, and composite
    /// frame + overlay onto the drawing surface.
    ///
    /// Callers driving a preview loop call this per display refresh;
    /// [`capture`](Self::capture) also runs it internally so snapshots never
    /// observe a stale frame or overlay.
    pub fn render_frame(&mut self) -> Result<()> {
        let frame = match &mut self.state {
            SessionState::Streaming(stream) => stream.latest_frame()?,
            _ => return Err(Error::NotReady),
        };

        if let Some(sink) = &mut self.sink {
            sink.present(&frame);
        }

        if self.surface.is_none() {
            let size = self.config.surface;
            self.surface = Some(DrawSurface::new(size.width, size.height)?);
        }
        let Some(surface) = self.surface.as_mut() else {
            return Err(Error::Render("no draw surface bound".into()));
        };

        compose::compose(
            surface,
            &frame,
            self.overlay.as_ref(),
            &self.config.overlay_placement,
        )
    }

    /// Flatten the current composite into an immutable picture.
    ///
    /// Recomposites from the most recent frame and the current overlay
    /// first, so the result reflects exactly what is visible at the moment
    /// of invocation. Fails with [`Error::NotReady`] when no stream is
    /// active.
    pub fn capture(&mut self, title: &str) -> Result<CapturedPicture> {
        if !self.is_streaming() {
            return Err(Error::NotReady);
        }
        self.render_frame()?;

        let Some(surface) = self.surface.as_ref() else {
            return Err(Error::Render("no draw surface bound".into()));
        };
        let png_data = encode::encode_png(surface)?;
        debug!(
            "captured {}x{} picture titled {:?}",
            surface.width(),
            surface.height(),
            title
        );
        Ok(CapturedPicture {
            data_uri: encode::to_data_uri(&png_data),
            title: title.to_string(),
        })
    }

    /// Flatten the current composite into raw PNG bytes without the
    /// data-URI wrapping
    pub fn snapshot(&mut self) -> Result<Snapshot> {
        if !self.is_streaming() {
            return Err(Error::NotReady);
        }
        self.render_frame()?;
        let Some(surface) = self.surface.as_ref() else {
            return Err(Error::Render("no draw surface bound".into()));
        };
        encode::snapshot(surface)
    }

    /// Detach the sink and release the camera. Equivalent to
    /// `attach_video_sink(None)`.
    pub fn close(mut self) -> Result<()> {
        self.release_stream();
        self.sink = None;
        Ok(())
    }

    fn release_stream(&mut self) {
        if let SessionState::Streaming(stream) = &mut self.state {
            stream.stop();
            debug!("camera stream released");
        }
        self.state = SessionState::Idle;
    }
}

impl Drop for CaptureController {
    fn drop(&mut self) {
        // Open camera handles must not outlive the controller
        self.release_stream();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::camera::MockCamera;
    use crate::platform::sink::NoopVideoSink;

    fn granted_controller(fill: [u8; 4]) -> (CaptureController, Arc<MockCamera>) {
        let camera = Arc::new(MockCamera::granting(32, 24, fill));
        let source: Arc<dyn CameraSource> = camera.clone();
        let mut controller = CaptureController::new(ControllerConfig::default(), source);
        controller.attach_draw_surface(32, 24).unwrap();
        controller
            .attach_video_sink(Some(Box::new(NoopVideoSink::new())))
            .unwrap();
        (controller, camera)
    }

    #[test]
    fn capture_before_attach_is_not_ready() {
        let camera = Arc::new(MockCamera::granting(8, 8, [0; 4]));
        let mut controller = CaptureController::new(ControllerConfig::default(), camera);
        assert!(matches!(controller.capture("x"), Err(Error::NotReady)));
    }

    #[test]
    fn construction_has_no_device_side_effects() {
        let camera = Arc::new(MockCamera::granting(8, 8, [0; 4]));
        let source: Arc<dyn CameraSource> = camera.clone();
        let _controller = CaptureController::new(ControllerConfig::default(), source);
        assert_eq!(camera.streams_started(), 0);
    }

    #[test]
    fn capture_returns_a_titled_data_uri() {
        let (mut controller, _camera) = granted_controller([200, 10, 10, 255]);
        let picture = controller.capture("hello").unwrap();
        assert!(picture.data_uri.starts_with("data:image/png;base64,"));
        assert_eq!(picture.title, "hello");
    }

    #[test]
    fn detach_releases_the_device() {
        let (mut controller, camera) = granted_controller([0; 4]);
        controller.attach_video_sink(None).unwrap();
        assert_eq!(camera.streams_started(), 1);
        assert_eq!(camera.streams_stopped(), 1);
        assert!(matches!(controller.capture("x"), Err(Error::NotReady)));
    }

    #[test]
    fn drop_releases_the_device() {
        let (controller, camera) = granted_controller([0; 4]);
        drop(controller);
        assert_eq!(camera.streams_stopped(), camera.streams_started());
    }

    #[test]
    fn failed_acquisition_is_terminal_until_reattach() {
        let camera = Arc::new(MockCamera::denying());
        let mut controller = CaptureController::new(ControllerConfig::default(), camera);
        let err = controller
            .attach_video_sink(Some(Box::new(NoopVideoSink::new())))
            .unwrap_err();
        assert!(matches!(err, Error::PermissionDenied));
        assert!(!controller.is_streaming());
        assert!(matches!(controller.capture("x"), Err(Error::NotReady)));
    }

    #[test]
    fn surface_is_created_lazily_from_config() {
        let camera = Arc::new(MockCamera::granting(16, 16, [5, 5, 5, 255]));
        let config = ControllerConfig {
            surface: crate::SurfaceSize {
                width: 20,
                height: 10,
            },
            ..Default::default()
        };
        let mut controller = CaptureController::new(config, camera);
        controller
            .attach_video_sink(Some(Box::new(NoopVideoSink::new())))
            .unwrap();
        let snapshot = controller.snapshot().unwrap();
        assert_eq!(snapshot.width, 20);
        assert_eq!(snapshot.height, 10);
    }
}
