//! Interpretation store: selection, fetch lifecycle, session cache.

use std::sync::Arc;

use moka::future::Cache;
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::api::{ApiClient, ApiError, InterpretationRequest, InterpretationResponse, UserContext};

use super::{InterpretationKey, InterpretationState};

/// Maximum number of (object, lens) responses kept for the session.
const CACHE_CAPACITY: u64 = 256;

/// Owns the current (object, lens) selection and its fetch lifecycle.
///
/// Selecting a new key supersedes any in-flight fetch: the old fetch is
/// cancelled and, should its response still arrive, discarded by a
/// generation check before it can overwrite newer state. Resolved responses
/// go into a session cache keyed by the exact (object, lens) pair, so
/// revisiting a pair is instant and costs no second request.
///
/// Cheap to clone; all clones share the same selection and cache.
#[derive(Clone)]
pub struct InterpretationStore {
    api: ApiClient,
    cache: Cache<InterpretationKey, Arc<InterpretationResponse>>,
    inner: Arc<Mutex<Inner>>,
    state_tx: Arc<watch::Sender<InterpretationState>>,
    shutdown: CancellationToken,
}

struct Inner {
    /// Bumped on every selection change; a fetch may only publish its
    /// result while the generation it was started under is still current.
    generation: u64,
    current: Option<InterpretationKey>,
    in_flight: Option<CancellationToken>,
    user_context: Option<UserContext>,
}

impl InterpretationStore {
    pub fn new(api: ApiClient, shutdown: CancellationToken) -> Self {
        let (state_tx, _) = watch::channel(InterpretationState::Idle);
        Self {
            api,
            cache: Cache::new(CACHE_CAPACITY),
            inner: Arc::new(Mutex::new(Inner {
                generation: 0,
                current: None,
                in_flight: None,
                user_context: None,
            })),
            state_tx: Arc::new(state_tx),
            shutdown,
        }
    }

    /// Context forwarded with every subsequent interpretation request.
    pub fn set_user_context(&self, context: Option<UserContext>) {
        self.inner.lock().user_context = context;
    }

    /// Makes `(object_id, lens)` the current selection.
    ///
    /// Cache hits publish `Loaded` immediately with no request. Misses
    /// publish `Loading` and fetch in the background; a newer selection
    /// supersedes the fetch. Re-selecting the current key while it is
    /// loading or loaded is a no-op.
    pub async fn select(&self, object_id: &str, lens: &str) {
        let key = InterpretationKey::new(object_id, lens);
        {
            let inner = self.inner.lock();
            if inner.current.as_ref() == Some(&key) {
                match &*self.state_tx.borrow() {
                    InterpretationState::Loading { .. } | InterpretationState::Loaded { .. } => {
                        return
                    }
                    // Failed or Idle for the same key: fall through and fetch.
                    _ => {}
                }
            }
        }

        if let Some(response) = self.cache.get(&key).await {
            debug!(key = %key, "interpretation served from session cache");
            let mut inner = self.inner.lock();
            inner.generation += 1;
            if let Some(superseded) = inner.in_flight.take() {
                superseded.cancel();
            }
            inner.current = Some(key.clone());
            let _ = self
                .state_tx
                .send(InterpretationState::Loaded { key, response });
            return;
        }

        self.start_fetch(key);
    }

    /// Re-runs the fetch for the current key after a failure. A no-op in
    /// any other state, so it never duplicates an in-flight fetch.
    pub fn retry(&self) {
        let key = {
            let inner = self.inner.lock();
            match &*self.state_tx.borrow() {
                InterpretationState::Failed { .. } => inner.current.clone(),
                _ => return,
            }
        };
        if let Some(key) = key {
            self.start_fetch(key);
        }
    }

    /// Drops the cache and the current selection, cancelling any fetch.
    pub fn invalidate(&self) {
        let mut inner = self.inner.lock();
        inner.generation += 1;
        if let Some(in_flight) = inner.in_flight.take() {
            in_flight.cancel();
        }
        inner.current = None;
        self.cache.invalidate_all();
        let _ = self.state_tx.send(InterpretationState::Idle);
        info!("interpretation store invalidated");
    }

    pub fn current_key(&self) -> Option<InterpretationKey> {
        self.inner.lock().current.clone()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> InterpretationState {
        self.state_tx.borrow().clone()
    }

    /// Receiver for state transitions.
    pub fn subscribe(&self) -> watch::Receiver<InterpretationState> {
        self.state_tx.subscribe()
    }

    fn start_fetch(&self, key: InterpretationKey) {
        let (generation, token, request) = {
            let mut inner = self.inner.lock();
            inner.generation += 1;
            if let Some(superseded) = inner.in_flight.take() {
                superseded.cancel();
            }
            let token = self.shutdown.child_token();
            inner.in_flight = Some(token.clone());
            inner.current = Some(key.clone());
            let request = InterpretationRequest {
                object_id: key.object_id.clone(),
                cultural_lens: key.lens.clone(),
                user_context: inner.user_context.clone(),
            };
            (inner.generation, token, request)
        };

        info!(key = %key, "fetching interpretation");
        let _ = self
            .state_tx
            .send(InterpretationState::Loading { key: key.clone() });

        let store = self.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!(key = %key, "interpretation fetch cancelled");
                }
                result = store.api.interpret(&request) => {
                    store.commit(generation, key, result).await;
                }
            }
        });
    }

    /// Publishes a fetch outcome unless the selection has moved on.
    async fn commit(
        &self,
        generation: u64,
        key: InterpretationKey,
        result: Result<InterpretationResponse, ApiError>,
    ) {
        match result {
            Ok(response) => {
                // Superseded responses reach neither the cache nor the
                // visible state.
                if self.inner.lock().generation != generation {
                    debug!(key = %key, "discarding superseded interpretation response");
                    return;
                }
                let response = Arc::new(response);
                self.cache.insert(key.clone(), Arc::clone(&response)).await;
                let mut inner = self.inner.lock();
                if inner.generation != generation {
                    debug!(key = %key, "superseded while caching interpretation response");
                    return;
                }
                inner.in_flight = None;
                let _ = self
                    .state_tx
                    .send(InterpretationState::Loaded { key, response });
            }
            Err(e) => {
                let mut inner = self.inner.lock();
                if inner.generation != generation {
                    debug!(key = %key, "dropping error from superseded fetch");
                    return;
                }
                inner.in_flight = None;
                warn!(key = %key, error = %e, "interpretation fetch failed");
                let _ = self.state_tx.send(InterpretationState::Failed {
                    key,
                    message: e.to_string(),
                });
            }
        }
    }
}
