//! Platform API surface: camera devices and preview sinks
//!
//! This module contains the capability traits the controller uses to reach
//! the outside world, together with deterministic in-memory implementations
//! used by tests, benches, and the demo binary. Real integrations (V4L2,
//! a GUI preview widget) implement the same traits.

pub mod camera;
pub mod sink;

pub use camera::{CameraSource, CameraStream, MockBehavior, MockCamera, TestPatternCamera, VideoFrame};
pub use sink::{NoopVideoSink, RecordingVideoSink, VideoSink};
