//! Interpretation fetching and caching.
//!
//! An interpretation is addressed by an [`InterpretationKey`] (which object,
//! seen through which cultural lens). [`InterpretationStore`] owns the
//! current selection, the in-flight fetch, and the session cache, and
//! publishes [`InterpretationState`] transitions over a watch channel.

mod lenses;
mod store;

use std::fmt;
use std::sync::Arc;

pub use lenses::{normalize_lenses, DEFAULT_LENS};
pub use store::InterpretationStore;

use crate::api::InterpretationResponse;

/// Cache and selection key: one object seen through one cultural lens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InterpretationKey {
    pub object_id: String,
    pub lens: String,
}

impl InterpretationKey {
    pub fn new(object_id: impl Into<String>, lens: impl Into<String>) -> Self {
        Self {
            object_id: object_id.into(),
            lens: lens.into(),
        }
    }
}

impl fmt::Display for InterpretationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.object_id, self.lens)
    }
}

/// Observable state of the store's current selection.
#[derive(Debug, Clone, PartialEq)]
pub enum InterpretationState {
    /// Nothing selected yet (or the store was invalidated).
    Idle,
    /// A fetch for `key` is in flight.
    Loading { key: InterpretationKey },
    /// `key` resolved; `response` is shared with the session cache.
    Loaded {
        key: InterpretationKey,
        response: Arc<InterpretationResponse>,
    },
    /// The fetch for `key` failed; `retry` re-runs it.
    Failed {
        key: InterpretationKey,
        message: String,
    },
}

impl InterpretationState {
    /// The key this state refers to, if any.
    pub fn key(&self) -> Option<&InterpretationKey> {
        match self {
            InterpretationState::Idle => None,
            InterpretationState::Loading { key }
            | InterpretationState::Loaded { key, .. }
            | InterpretationState::Failed { key, .. } => Some(key),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, InterpretationState::Loading { .. })
    }
}
