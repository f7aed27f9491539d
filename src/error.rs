//! Error types for the capture engine

use thiserror::Error;

/// Result type alias for capture operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while acquiring a camera, compositing, or capturing
#[derive(Error, Debug)]
pub enum Error {
    /// The user rejected the camera permission prompt. Not retryable
    /// without explicit user re-initiation (a fresh attach).
    #[error("Camera permission denied")]
    PermissionDenied,

    /// No camera hardware or driver is available
    #[error("Camera device unavailable: {0}")]
    DeviceUnavailable(String),

    /// Capture or frame rendering was requested before a stream is active
    #[error("No active video stream")]
    NotReady,

    /// Failed to composite onto the drawing surface
    #[error("Rendering failed: {0}")]
    Render(String),

    /// Failed to encode the surface contents
    #[error("Encoding failed: {0}")]
    Encode(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
