//! Wire types for the interpretation backend.
//!
//! These mirror the JSON bodies of `/analyze/image`, `/interpret` and
//! `/audio/narrate`. Field names match the wire format exactly, so no serde
//! renames are needed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Result of the opaque recognizer: raw image bytes in, identifier out.
///
/// `object_id` is the join key into interpretation data. The optional fields
/// carry whatever extra signal the recognizer produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionResult {
    pub object_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub visual_tags: Vec<String>,
}

/// Optional user-side context forwarded with an interpretation request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Request body for `POST /interpret`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpretationRequest {
    pub object_id: String,
    pub cultural_lens: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_context: Option<UserContext>,
}

/// Verified historical facts about a landmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkFacts {
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub built: String,
    #[serde(default)]
    pub builder: String,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub material: String,
}

/// A culturally-situated reading of the facts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interpretation {
    pub perspective: String,
    pub narrative: String,
    pub emotional_context: String,
}

/// Bias-transparency metadata accompanying an interpretation.
///
/// `source_dominance` maps source category to its share of available
/// material; shares are non-negative and sum to roughly 1.0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BiasReport {
    #[serde(default)]
    pub transparency_note: String,
    #[serde(default)]
    pub source_dominance: BTreeMap<String, f64>,
    #[serde(default)]
    pub missing_perspectives: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diversity_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub power_imbalances: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub representation_gaps: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

impl BiasReport {
    /// Sum of all source-dominance shares. Expected to be 1.0 ± 0.01 when
    /// any sources are reported.
    pub fn dominance_total(&self) -> f64 {
        self.source_dominance.values().sum()
    }
}

/// Aggregated community reactions for a landmark. Optional in responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommunitySentiment {
    #[serde(default)]
    pub reflections_count: u64,
    #[serde(default)]
    pub emotions: BTreeMap<String, f64>,
    #[serde(default)]
    pub common_themes: Vec<String>,
    #[serde(default)]
    pub sample_quotes: Vec<String>,
}

/// Full response body of `POST /interpret`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpretationResponse {
    #[serde(default)]
    pub object_id: String,
    pub facts: LandmarkFacts,
    #[serde(default)]
    pub available_lenses: Vec<String>,
    pub interpretation: Interpretation,
    #[serde(default)]
    pub bias_report: BiasReport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub community_sentiment: Option<CommunitySentiment>,
}

/// Request body for `POST /audio/narrate` and `POST /audio/intro`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrationRequest {
    pub object_id: String,
    pub language: String,
    pub cultural_lens: String,
}

/// One entry of the `GET /lenses` listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LensInfo {
    pub id: String,
    pub name: String,
}
