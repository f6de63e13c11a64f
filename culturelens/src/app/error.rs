//! Application error types.

use std::fmt;

use crate::api::ApiError;
use crate::narration::NarrationError;

/// Errors that can occur during application lifecycle.
#[derive(Debug)]
pub enum AppError {
    /// Failed to create the HTTP transport.
    TransportCreation(ApiError),

    /// Failed to initialize the audio output.
    AudioInit(NarrationError),

    /// Configuration error.
    Config(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::TransportCreation(e) => {
                write!(f, "Failed to create HTTP transport: {}", e)
            }
            AppError::AudioInit(e) => {
                write!(f, "Failed to initialize audio output: {}", e)
            }
            AppError::Config(msg) => {
                write!(f, "Configuration error: {}", msg)
            }
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::TransportCreation(e) => Some(e),
            AppError::AudioInit(e) => Some(e),
            AppError::Config(_) => None,
        }
    }
}

impl From<NarrationError> for AppError {
    fn from(e: NarrationError) -> Self {
        AppError::AudioInit(e)
    }
}
