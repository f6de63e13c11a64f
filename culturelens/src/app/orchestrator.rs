//! Application orchestrator wiring the client components together.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::api::{ApiClient, ApiError, AsyncHttpClient, LensInfo, ReqwestClient};
use crate::capture::{CameraBackend, CaptureSession, HttpRecognizer};
use crate::interpret::InterpretationStore;
use crate::narration::{
    AudioSink, Language, NarrationController, NarrationError, NullSink, RodioSink,
};

use super::config::AppConfig;
use super::error::AppError;

/// The assembled CultureLens client core.
///
/// Owns the shared API client, the interpretation store, and the narration
/// controller, and hands out capture sessions on demand. All backend work
/// runs under a master cancellation token that `shutdown` trips.
pub struct CultureLens {
    config: AppConfig,
    api: ApiClient,
    store: InterpretationStore,
    narration: NarrationController,
    shutdown: CancellationToken,
}

impl CultureLens {
    /// Starts the client core with the real HTTP transport and system audio.
    ///
    /// A missing audio device is not fatal: narration degrades to a silent
    /// sink so the rest of the client keeps working.
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        let http = Arc::new(
            ReqwestClient::with_timeout(config.request_timeout)
                .map_err(AppError::TransportCreation)?,
        );
        let sink: Arc<dyn AudioSink> = match RodioSink::new() {
            Ok(sink) => Arc::new(sink),
            Err(e) => {
                warn!(error = %e, "audio output unavailable, narration will be silent");
                Arc::new(NullSink::new())
            }
        };
        Self::with_parts(config, http, sink)
    }

    /// Starts the client core with injected transport and audio sink.
    pub fn with_parts(
        config: AppConfig,
        http: Arc<dyn AsyncHttpClient>,
        sink: Arc<dyn AudioSink>,
    ) -> Result<Self, AppError> {
        if config.base_url.trim().is_empty() {
            return Err(AppError::Config("backend base URL is empty".to_string()));
        }

        let api = ApiClient::new(config.base_url.clone(), http);
        let shutdown = CancellationToken::new();
        let store = InterpretationStore::new(api.clone(), shutdown.child_token());
        let narration = NarrationController::new(api.clone(), sink);

        info!(base_url = %config.base_url, landmarks = config.landmarks.len(), "CultureLens client core started");
        Ok(Self {
            config,
            api,
            store,
            narration,
            shutdown,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn store(&self) -> &InterpretationStore {
        &self.store
    }

    pub fn narration(&self) -> &NarrationController {
        &self.narration
    }

    /// Creates a capture session backed by the given camera and the shared
    /// recognition endpoint. One session per capture screen.
    pub fn capture_session(&self, backend: Arc<dyn CameraBackend>) -> CaptureSession {
        CaptureSession::new(backend, Arc::new(HttpRecognizer::new(self.api.clone())))
    }

    /// Lenses the backend currently offers, for the lens picker.
    pub async fn available_lenses(&self) -> Result<Vec<LensInfo>, ApiError> {
        self.api.lenses().await
    }

    /// Narration languages the backend currently speaks. Identifiers the
    /// client does not know are skipped.
    pub async fn available_languages(&self) -> Result<Vec<Language>, ApiError> {
        let names = self.api.audio_languages().await?;
        Ok(names
            .iter()
            .filter_map(|name| match name.parse::<Language>() {
                Ok(language) => Some(language),
                Err(_) => {
                    warn!(language = %name, "backend offered an unknown narration language");
                    None
                }
            })
            .collect())
    }

    /// Plays the full narration for the currently selected object and lens.
    pub async fn narrate_current(&self) -> Result<(), NarrationError> {
        let key = self.store.current_key().ok_or(NarrationError::NoSelection)?;
        self.narration.play(&key.object_id, &key.lens).await
    }

    /// Stops playback, drops interpretation state, and cancels outstanding
    /// backend work.
    pub fn shutdown(&self) {
        info!("CultureLens client core shutting down");
        self.narration.stop();
        self.store.invalidate();
        self.shutdown.cancel();
    }
}
