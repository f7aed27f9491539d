//! Video sink surface for live preview.
//!
//! The controller pushes each rendered frame into whatever sink is attached;
//! a UI would blit it to the screen. The implementations here keep state
//! in-memory so preview behavior stays testable without a display.

use std::sync::{Arc, Mutex};

use crate::platform::camera::VideoFrame;

/// A surface that displays live video frames.
pub trait VideoSink: Send {
    fn present(&mut self, frame: &VideoFrame);
}

/// Sink that discards every frame
pub struct NoopVideoSink;

impl NoopVideoSink {
    pub fn new() -> Self {
        NoopVideoSink
    }
}

impl Default for NoopVideoSink {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoSink for NoopVideoSink {
    fn present(&mut self, _frame: &VideoFrame) {}
}

/// Sink that remembers the dimensions of every presented frame, for tests
pub struct RecordingVideoSink {
    presented: Arc<Mutex<Vec<(u32, u32)>>>,
}

impl RecordingVideoSink {
    pub fn new() -> Self {
        Self {
            presented: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A handle that stays valid after the sink is handed to a controller
    pub fn presented(&self) -> Arc<Mutex<Vec<(u32, u32)>>> {
        Arc::clone(&self.presented)
    }
}

impl Default for RecordingVideoSink {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoSink for RecordingVideoSink {
    fn present(&mut self, frame: &VideoFrame) {
        let mut g = self.presented.lock().unwrap();
        g.push((frame.width, frame.height));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_remembers_presented_frames() {
        let sink = RecordingVideoSink::new();
        let seen = sink.presented();
        let mut sink = sink;
        sink.present(&VideoFrame::solid(8, 4, [0; 4]));
        sink.present(&VideoFrame::solid(16, 9, [0; 4]));
        let g = seen.lock().unwrap();
        assert_eq!(*g, vec![(8, 4), (16, 9)]);
    }
}
