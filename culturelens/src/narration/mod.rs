//! Audio narration of interpretations.
//!
//! [`NarrationController`] fetches narration clips for the selected object
//! and lens, in one of ten languages, and plays at most one clip at a time
//! through an [`AudioSink`].

mod language;
mod sink;

use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::api::{ApiClient, NarrationRequest};

pub use language::Language;
pub use sink::{AudioSink, CompletionHandler, NullSink, RodioSink};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum NarrationError {
    #[error("no object selected for narration")]
    NoSelection,
    #[error("failed to fetch narration: {0}")]
    FetchFailed(String),
    #[error("audio playback failed: {0}")]
    Playback(String),
    #[error("unknown narration language: {0}")]
    UnknownLanguage(String),
}

struct NarrationInner {
    language: Language,
    playing: bool,
    /// Bumped by stop and language switches; a fetch may only start its
    /// clip while the generation it began under is still current.
    generation: u64,
}

/// Fetches and plays narration clips, one at a time.
///
/// Cheap to clone; clones share language selection and playback state.
#[derive(Clone)]
pub struct NarrationController {
    api: ApiClient,
    sink: Arc<dyn AudioSink>,
    inner: Arc<Mutex<NarrationInner>>,
}

impl NarrationController {
    pub fn new(api: ApiClient, sink: Arc<dyn AudioSink>) -> Self {
        let inner = Arc::new(Mutex::new(NarrationInner {
            language: Language::default(),
            playing: false,
            generation: 0,
        }));
        // A clip running out on its own clears the playing flag, so it is
        // only ever true while audio is actually advancing.
        let completion_inner = Arc::clone(&inner);
        sink.set_completion_handler(Box::new(move || {
            completion_inner.lock().playing = false;
        }));
        Self { api, sink, inner }
    }

    pub fn language(&self) -> Language {
        self.inner.lock().language
    }

    pub fn is_playing(&self) -> bool {
        self.inner.lock().playing
    }

    /// Switches the narration language. Stops any current playback so the
    /// next clip is spoken in the new language.
    pub fn select_language(&self, language: Language) {
        let mut inner = self.inner.lock();
        if inner.language == language {
            return;
        }
        info!(language = %language, "narration language changed");
        inner.language = language;
        inner.generation += 1;
        if inner.playing {
            inner.playing = false;
            self.sink.stop();
        }
    }

    /// Fetches and plays the full narration for `(object_id, lens)`.
    pub async fn play(&self, object_id: &str, lens: &str) -> Result<(), NarrationError> {
        self.fetch_and_play(object_id, lens, false).await
    }

    /// Fetches and plays the short introduction clip.
    pub async fn play_intro(&self, object_id: &str, lens: &str) -> Result<(), NarrationError> {
        self.fetch_and_play(object_id, lens, true).await
    }

    /// Stops playback. Idempotent.
    pub fn stop(&self) {
        let mut inner = self.inner.lock();
        inner.generation += 1;
        inner.playing = false;
        self.sink.stop();
    }

    async fn fetch_and_play(
        &self,
        object_id: &str,
        lens: &str,
        intro: bool,
    ) -> Result<(), NarrationError> {
        let (language, generation) = {
            let mut inner = self.inner.lock();
            // Starting a new clip replaces the current one.
            inner.generation += 1;
            if inner.playing {
                inner.playing = false;
                self.sink.stop();
            }
            (inner.language, inner.generation)
        };

        let request = NarrationRequest {
            object_id: object_id.to_string(),
            language: language.as_str().to_string(),
            cultural_lens: lens.to_string(),
        };
        info!(object_id, lens, language = %language, intro, "fetching narration clip");
        let fetch = if intro {
            self.api.narrate_intro(&request).await
        } else {
            self.api.narrate(&request).await
        };
        let clip = fetch.map_err(|e| {
            warn!(error = %e, object_id, "narration fetch failed");
            NarrationError::FetchFailed(e.to_string())
        })?;

        let mut inner = self.inner.lock();
        if inner.generation != generation {
            // Stopped or re-targeted while the clip was in flight.
            debug!(object_id, "discarding superseded narration clip");
            return Ok(());
        }
        self.sink.play_clip(clip)?;
        inner.playing = true;
        Ok(())
    }
}
