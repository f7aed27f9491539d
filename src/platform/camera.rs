//! Camera capability surface.
//!
//! The engine never talks to camera hardware directly; it goes through the
//! [`CameraSource`] trait, which only has to expose "request stream (may
//! fail)" and "stop stream (sync)". Deterministic in-memory implementations
//! are provided for tests and demos: [`TestPatternCamera`] produces a fixed
//! gradient, [`MockCamera`] can grant, deny, or report a missing device and
//! counts every stream start and stop.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::{Error, Result};

/// One RGBA8 video frame as delivered by a camera stream.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA8 pixel data, row-major
    pub data: Vec<u8>,
}

impl VideoFrame {
    /// A frame filled with a single color
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for _ in 0..(width * height) {
            data.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            data,
        }
    }
}

/// A live stream of frames from one camera device.
pub trait CameraStream: Send {
    /// The most recent frame delivered by the device.
    ///
    /// Implementations must never hand out a cached frame older than the
    /// latest available one; capture correctness depends on it.
    fn latest_frame(&mut self) -> Result<VideoFrame>;

    /// Stop all hardware tracks. Synchronous and idempotent.
    fn stop(&mut self);

    /// Whether the stream still has active tracks
    fn is_active(&self) -> bool;
}

/// A camera device that can be asked for a live stream.
///
/// Requesting a stream is the privacy-sensitive side effect (it is what
/// triggers the permission prompt on real platforms), so implementations
/// must only do device work inside `request_stream`, never at construction.
pub trait CameraSource: Send + Sync {
    fn request_stream(&self) -> Result<Box<dyn CameraStream>>;
}

/// A camera that always grants access and produces a deterministic
/// gradient pattern, for demos, benches, and golden tests.
#[derive(Debug, Clone)]
pub struct TestPatternCamera {
    width: u32,
    height: u32,
}

impl TestPatternCamera {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for TestPatternCamera {
    fn default() -> Self {
        Self::new(640, 480)
    }
}

impl CameraSource for TestPatternCamera {
    fn request_stream(&self) -> Result<Box<dyn CameraStream>> {
        Ok(Box::new(TestPatternStream {
            width: self.width,
            height: self.height,
            active: true,
        }))
    }
}

struct TestPatternStream {
    width: u32,
    height: u32,
    active: bool,
}

impl CameraStream for TestPatternStream {
    fn latest_frame(&mut self) -> Result<VideoFrame> {
        if !self.active {
            return Err(Error::NotReady);
        }
        let mut data = Vec::with_capacity((self.width * self.height * 4) as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                // Horizontal red ramp, vertical green ramp, XOR weave in blue.
                let r = (x * 255 / self.width.max(1)) as u8;
                let g = (y * 255 / self.height.max(1)) as u8;
                let b = ((x ^ y) & 0xff) as u8;
                data.extend_from_slice(&[r, g, b, 255]);
            }
        }
        Ok(VideoFrame {
            width: self.width,
            height: self.height,
            data,
        })
    }

    fn stop(&mut self) {
        self.active = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

/// Scripted acquisition outcome for [`MockCamera`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockBehavior {
    /// Grant access and stream solid-color frames
    Grant,
    /// Reject as if the user declined the permission prompt
    DenyPermission,
    /// Reject as if no capture hardware exists
    NoDevice,
}

/// A scriptable camera that records every stream start and stop, so
/// teardown tests can assert that no device handle leaks.
pub struct MockCamera {
    behavior: MockBehavior,
    width: u32,
    height: u32,
    fill: [u8; 4],
    started: Arc<AtomicUsize>,
    stopped: Arc<AtomicUsize>,
}

impl MockCamera {
    /// A camera that grants access and streams `fill`-colored frames
    pub fn granting(width: u32, height: u32, fill: [u8; 4]) -> Self {
        Self::with_behavior(MockBehavior::Grant, width, height, fill)
    }

    /// A camera whose permission prompt is always declined
    pub fn denying() -> Self {
        Self::with_behavior(MockBehavior::DenyPermission, 0, 0, [0; 4])
    }

    /// A host with no capture hardware at all
    pub fn without_device() -> Self {
        Self::with_behavior(MockBehavior::NoDevice, 0, 0, [0; 4])
    }

    fn with_behavior(behavior: MockBehavior, width: u32, height: u32, fill: [u8; 4]) -> Self {
        Self {
            behavior,
            width,
            height,
            fill,
            started: Arc::new(AtomicUsize::new(0)),
            stopped: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of streams handed out so far
    pub fn streams_started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    /// Number of streams stopped so far (explicitly or on drop)
    pub fn streams_stopped(&self) -> usize {
        self.stopped.load(Ordering::SeqCst)
    }
}

impl CameraSource for MockCamera {
    fn request_stream(&self) -> Result<Box<dyn CameraStream>> {
        match self.behavior {
            MockBehavior::Grant => {
                self.started.fetch_add(1, Ordering::SeqCst);
                Ok(Box::new(MockStream {
                    width: self.width,
                    height: self.height,
                    fill: self.fill,
                    active: true,
                    stopped: Arc::clone(&self.stopped),
                }))
            }
            MockBehavior::DenyPermission => Err(Error::PermissionDenied),
            MockBehavior::NoDevice => {
                Err(Error::DeviceUnavailable("no capture device present".into()))
            }
        }
    }
}

struct MockStream {
    width: u32,
    height: u32,
    fill: [u8; 4],
    active: bool,
    stopped: Arc<AtomicUsize>,
}

impl CameraStream for MockStream {
    fn latest_frame(&mut self) -> Result<VideoFrame> {
        if !self.active {
            return Err(Error::NotReady);
        }
        Ok(VideoFrame::solid(self.width, self.height, self.fill))
    }

    fn stop(&mut self) {
        if self.active {
            self.active = false;
            self.stopped.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

impl Drop for MockStream {
    fn drop(&mut self) {
        // Dropping the handle counts as releasing the device
        self.stop();
    }
}
