//! Per-track audio analysis summary

use serde::{Deserialize, Serialize};

/// Derived features for one uploaded track
///
/// Produced by the external analysis service and immutable afterwards.
/// Any field may be missing; consumers fall back to neutral defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AudioAnalysisSummary {
    /// Tempo in beats per minute
    pub bpm: Option<f64>,

    /// Musical key label, e.g. "A minor", "F#m", "8A"
    pub key: Option<String>,

    pub genre: Option<String>,

    /// Perceived intensity, 0.0 to 1.0
    pub energy: Option<f64>,

    pub danceability: Option<f64>,
    pub valence: Option<f64>,
    pub loudness: Option<f64>,

    /// Analysis quality estimate, 0.0 to 1.0
    pub confidence: Option<f64>,
}

impl AudioAnalysisSummary {
    /// Tempo if present and usable (finite, positive)
    pub fn usable_bpm(&self) -> Option<f64> {
        self.bpm.filter(|b| b.is_finite() && *b > 0.0)
    }

    /// Energy if present and finite
    pub fn usable_energy(&self) -> Option<f64> {
        self.energy.filter(|e| e.is_finite())
    }

    /// Genre label if present and not blank
    pub fn usable_genre(&self) -> Option<&str> {
        self.genre
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty())
    }
}
