//! Async-friendly capture facade backed by a dedicated worker thread.
//!
//! Camera acquisition is the one suspension point in a capture session, so
//! async callers get a facade that owns a synchronous [`CaptureController`]
//! on a worker thread and bridges every call over a command channel. The
//! worker serializes all operations, which keeps the "no cross-operation
//! races" property of the sync controller intact.

use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread;

use tokio::sync::oneshot;

use crate::controller::CaptureController;
use crate::error::{Error, Result};
use crate::platform::camera::CameraSource;
use crate::platform::sink::VideoSink;
use crate::{CapturedPicture, ControllerConfig, Overlay};

enum Command {
    AttachSink(Option<Box<dyn VideoSink>>, oneshot::Sender<Result<()>>),
    AttachSurface(u32, u32, oneshot::Sender<Result<()>>),
    SetOverlay(Option<Overlay>, oneshot::Sender<Result<()>>),
    RenderFrame(oneshot::Sender<Result<()>>),
    Capture(String, oneshot::Sender<Result<CapturedPicture>>),
    Close(oneshot::Sender<Result<()>>),
}

/// An async capture controller backed by a dedicated worker thread.
///
/// The worker thread owns the synchronous [`CaptureController`] and executes
/// commands sent from async tasks, so callers get an async interface without
/// the controller itself having to be shared across threads.
#[derive(Clone)]
pub struct AsyncController {
    cmd_tx: Sender<Command>,
}

impl AsyncController {
    /// Spawn the worker thread that owns the controller.
    ///
    /// Like the sync constructor this has no device side effects; the
    /// camera is requested by the first `attach_video_sink(Some(..))`.
    pub fn new(config: ControllerConfig, source: Arc<dyn CameraSource>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();

        thread::spawn(move || {
            let mut controller = CaptureController::new(config, source);

            // Command loop; exits when the last handle is dropped, which
            // drops the controller and releases the stream.
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    Command::AttachSink(sink, resp) => {
                        let _ = resp.send(controller.attach_video_sink(sink));
                    }
                    Command::AttachSurface(width, height, resp) => {
                        let _ = resp.send(controller.attach_draw_surface(width, height));
                    }
                    Command::SetOverlay(overlay, resp) => {
                        controller.set_overlay(overlay);
                        let _ = resp.send(Ok(()));
                    }
                    Command::RenderFrame(resp) => {
                        let _ = resp.send(controller.render_frame());
                    }
                    Command::Capture(title, resp) => {
                        let _ = resp.send(controller.capture(&title));
                    }
                    Command::Close(resp) => {
                        let _ = resp.send(controller.close());
                        break;
                    }
                }
            }
        });

        Self { cmd_tx }
    }

    /// Bind or detach the preview sink; the first bind acquires the camera
    pub async fn attach_video_sink(&self, sink: Option<Box<dyn VideoSink>>) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::AttachSink(sink, tx));
        rx.await
            .map_err(|e| Error::Other(format!("Attach canceled: {}", e)))?
    }

    /// Bind a drawing surface of fixed pixel dimensions
    pub async fn attach_draw_surface(&self, width: u32, height: u32) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::AttachSurface(width, height, tx));
        rx.await
            .map_err(|e| Error::Other(format!("AttachSurface canceled: {}", e)))?
    }

    /// Record the overlay for subsequent renders and captures
    pub async fn set_overlay(&self, overlay: Option<Overlay>) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::SetOverlay(overlay, tx));
        rx.await
            .map_err(|e| Error::Other(format!("SetOverlay canceled: {}", e)))?
    }

    /// Composite the latest frame onto the surface and feed the sink
    pub async fn render_frame(&self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::RenderFrame(tx));
        rx.await
            .map_err(|e| Error::Other(format!("RenderFrame canceled: {}", e)))?
    }

    /// Capture the current composite as a titled picture
    pub async fn capture(&self, title: &str) -> Result<CapturedPicture> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Capture(title.to_string(), tx));
        rx.await
            .map_err(|e| Error::Other(format!("Capture canceled: {}", e)))?
    }

    /// Shut down the worker and release the camera
    pub async fn close(self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Close(tx));
        rx.await
            .map_err(|e| Error::Other(format!("Close canceled: {}", e)))?
    }
}
