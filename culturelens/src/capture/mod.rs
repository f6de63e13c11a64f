//! Image acquisition and recognition.
//!
//! [`CaptureSession`] mediates between the two mutually-exclusive acquisition
//! modes (file upload vs. live device camera) and yields raw image bytes to
//! the opaque recognizer. The live stream is the only exclusively-owned
//! resource in the crate: at most one exists, and it is always released
//! before a mode change or teardown.

mod camera;
mod recognizer;
mod session;

use thiserror::Error;

pub use camera::{CameraBackend, CameraStream};
pub use recognizer::{HttpRecognizer, Recognizer};
pub use session::{CaptureMode, CaptureSession};

#[cfg(test)]
pub use camera::tests::{MockCameraBackend, MockCameraStream};
#[cfg(test)]
pub use recognizer::tests::MockRecognizer;

/// Errors raised by the capture pipeline.
///
/// Every variant is recoverable by retry or mode switch; the session never
/// propagates an uncaught fault.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CaptureError {
    /// Platform refused camera access; the session stays in upload mode.
    #[error("camera permission denied: {0}")]
    PermissionDenied(String),

    /// The camera stream failed after acquisition.
    #[error("camera stream error: {0}")]
    Camera(String),

    /// `start_camera` called while a stream is already active.
    #[error("camera already streaming")]
    AlreadyStreaming,

    /// A capture or upload is already being recognized.
    #[error("capture already in progress")]
    Busy,

    /// `capture` called without an active camera stream.
    #[error("no active camera stream")]
    NotStreaming,

    /// The recognizer could not identify the object.
    #[error("recognition failed: {0}")]
    RecognitionFailed(String),
}
