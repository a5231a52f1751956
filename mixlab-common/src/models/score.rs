//! Template match results

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Compatibility of one template with a track pair
///
/// Recomputed on demand and never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateMatchScore {
    pub template_id: Uuid,

    /// Weighted aggregate, 0-100
    pub overall_score: u8,

    pub bpm_score: f64,
    pub key_score: f64,
    pub genre_score: f64,
    pub energy_score: f64,

    /// Mean analysis confidence of both tracks, 0.0-1.0, two decimals
    pub confidence: f64,

    pub reasoning: MatchReasoning,
}

/// Human-readable explanation shown next to a recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReasoning {
    pub bpm: String,
    pub key: String,
    pub genre: String,
    pub energy: String,
    pub overall: String,
}
