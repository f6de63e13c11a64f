//! Platform camera abstraction.
//!
//! The real backend lives in the platform glue layer; the core only needs
//! these two traits. A stream must release its platform resource when
//! dropped, and `release` must be idempotent.

use bytes::Bytes;

use super::CaptureError;

/// An acquired, exclusively-owned live camera stream.
pub trait CameraStream: Send {
    /// Returns the current frame as raw image bytes.
    fn frame(&mut self) -> Result<Bytes, CaptureError>;

    /// Releases the underlying platform resource. Idempotent; also invoked
    /// on drop by implementations.
    fn release(&mut self);
}

/// Factory for live camera streams.
///
/// Acquisition is the side-effect boundary: it either hands over the single
/// exclusive stream or fails with [`CaptureError::PermissionDenied`].
pub trait CameraBackend: Send + Sync {
    fn open(&self) -> Result<Box<dyn CameraStream>, CaptureError>;
}
