//! Capture session state machine.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, info, warn};

use crate::api::RecognitionResult;

use super::camera::{CameraBackend, CameraStream};
use super::recognizer::Recognizer;
use super::CaptureError;

/// The two mutually-exclusive acquisition modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureMode {
    Upload,
    LiveCamera,
}

/// Internal state. The stream handle lives only inside the `LiveCamera`
/// variant, so "upload mode holding a stream" cannot be expressed.
enum CaptureState {
    Upload { processing: bool },
    LiveCamera { stream: Box<dyn CameraStream>, processing: bool },
}

/// Mediates between the two acquisition modes and the recognizer.
///
/// Created when the capture screen mounts and torn down (stream released)
/// when it unmounts. Starts in upload mode with no resources held.
pub struct CaptureSession {
    state: CaptureState,
    backend: Arc<dyn CameraBackend>,
    recognizer: Arc<dyn Recognizer>,
    last_error: Option<CaptureError>,
}

impl CaptureSession {
    pub fn new(backend: Arc<dyn CameraBackend>, recognizer: Arc<dyn Recognizer>) -> Self {
        Self {
            state: CaptureState::Upload { processing: false },
            backend,
            recognizer,
            last_error: None,
        }
    }

    pub fn mode(&self) -> CaptureMode {
        match self.state {
            CaptureState::Upload { .. } => CaptureMode::Upload,
            CaptureState::LiveCamera { .. } => CaptureMode::LiveCamera,
        }
    }

    pub fn is_streaming(&self) -> bool {
        matches!(self.state, CaptureState::LiveCamera { .. })
    }

    pub fn is_processing(&self) -> bool {
        match self.state {
            CaptureState::Upload { processing } => processing,
            CaptureState::LiveCamera { processing, .. } => processing,
        }
    }

    /// The most recent recoverable failure, if any.
    pub fn last_error(&self) -> Option<&CaptureError> {
        self.last_error.as_ref()
    }

    /// Switches to live-camera mode by acquiring the exclusive stream.
    ///
    /// On acquisition failure (permission denied) the session records the
    /// error and stays in upload mode. Calling while already streaming is an
    /// explicit error, never a second acquisition.
    pub fn start_camera(&mut self) -> Result<(), CaptureError> {
        match self.state {
            CaptureState::LiveCamera { .. } => Err(CaptureError::AlreadyStreaming),
            CaptureState::Upload { processing: true } => Err(CaptureError::Busy),
            CaptureState::Upload { processing: false } => match self.backend.open() {
                Ok(stream) => {
                    info!("camera stream acquired");
                    self.state = CaptureState::LiveCamera {
                        stream,
                        processing: false,
                    };
                    self.last_error = None;
                    Ok(())
                }
                Err(e) => {
                    warn!(error = %e, "camera acquisition failed, staying in upload mode");
                    self.last_error = Some(e.clone());
                    Err(e)
                }
            },
        }
    }

    /// Returns to upload mode, releasing the stream if one is held.
    /// Idempotent: safe to call in any state.
    pub fn stop_camera(&mut self) {
        self.release_stream();
    }

    /// Submits user-selected file bytes to the recognizer.
    pub async fn submit_file(&mut self, bytes: Bytes) -> Result<RecognitionResult, CaptureError> {
        match &mut self.state {
            CaptureState::LiveCamera { .. } => return Err(CaptureError::AlreadyStreaming),
            CaptureState::Upload { processing } => {
                if *processing {
                    return Err(CaptureError::Busy);
                }
                *processing = true;
            }
        }
        self.run_recognition(bytes).await
    }

    /// Captures the current camera frame and submits it to the recognizer.
    ///
    /// On recognition failure the stream is kept so the caller can retry
    /// without re-acquiring it.
    pub async fn capture(&mut self) -> Result<RecognitionResult, CaptureError> {
        let frame = match &mut self.state {
            CaptureState::Upload { .. } => return Err(CaptureError::NotStreaming),
            CaptureState::LiveCamera { stream, processing } => {
                if *processing {
                    return Err(CaptureError::Busy);
                }
                let frame = match stream.frame() {
                    Ok(frame) => frame,
                    Err(e) => {
                        self.last_error = Some(e.clone());
                        return Err(e);
                    }
                };
                *processing = true;
                frame
            }
        };
        self.run_recognition(frame).await
    }

    /// Shared tail of both acquisition paths: recognize, then either tear
    /// down on success or restore the prior mode on failure.
    async fn run_recognition(&mut self, bytes: Bytes) -> Result<RecognitionResult, CaptureError> {
        let recognizer = Arc::clone(&self.recognizer);
        let outcome = recognizer.recognize(bytes).await;

        match outcome {
            Ok(result) => {
                debug!(object_id = %result.object_id, "recognition succeeded, tearing down session");
                self.release_stream();
                self.last_error = None;
                Ok(result)
            }
            Err(e) => {
                // Mode-preserving: clear the processing flag but keep the
                // stream (if any) so a retry needs no re-acquisition.
                match &mut self.state {
                    CaptureState::Upload { processing } => *processing = false,
                    CaptureState::LiveCamera { processing, .. } => *processing = false,
                }
                warn!(error = %e, "recognition failed");
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    fn release_stream(&mut self) {
        let prior = std::mem::replace(&mut self.state, CaptureState::Upload { processing: false });
        if let CaptureState::LiveCamera { mut stream, .. } = prior {
            stream.release();
            info!("camera stream released");
        }
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        self.release_stream();
    }
}
