//! Application configuration for CultureLens.
//!
//! `AppConfig` combines everything needed to bootstrap the client core:
//! where the interpretation backend lives, request timing, and the landmark
//! catalog shown on the map.

use std::time::Duration;

use crate::landmarks::LandmarkCatalog;
use crate::narration::Language;

/// Default backend base URL for local development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default per-request timeout in seconds.
///
/// Interpretation and narration responses are generated server-side and can
/// take tens of seconds; 30 keeps slow generations alive without letting a
/// dead backend hang the client forever.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Top-level configuration passed to [`CultureLens::new`].
///
/// [`CultureLens::new`]: crate::app::CultureLens::new
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Base URL of the interpretation backend.
    pub base_url: String,

    /// Timeout applied to every backend request.
    pub request_timeout: Duration,

    /// Landmarks plotted on the map canvas.
    pub landmarks: LandmarkCatalog,

    /// Languages offered in the narration picker, in display order.
    pub languages: Vec<Language>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            landmarks: LandmarkCatalog::world_heritage(),
            languages: Language::ALL.to_vec(),
        }
    }
}

impl AppConfig {
    /// Set the backend base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Replace the landmark catalog.
    pub fn with_landmarks(mut self, landmarks: LandmarkCatalog) -> Self {
        self.landmarks = landmarks;
        self
    }

    /// Restrict the narration language picker.
    pub fn with_languages(mut self, languages: Vec<Language>) -> Self {
        self.languages = languages;
        self
    }
}
