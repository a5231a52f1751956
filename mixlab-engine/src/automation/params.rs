//! Instantaneous audio-processing parameters

use mixlab_common::models::FilterType;
use serde::{Deserialize, Serialize};

/// Web Audio biquad default Q
pub const DEFAULT_RESONANCE: f64 = 1.0;

/// Parameters the audio-graph adapter applies for one evaluation tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioParameters {
    pub track_a_gain: f64,
    pub track_b_gain: f64,
    pub filter_type: FilterType,

    /// Hz
    pub filter_cutoff: f64,

    /// Q
    pub filter_resonance: f64,
}

impl AudioParameters {
    /// "No effect" values: unity gains, lowpass fully open at `nyquist`
    pub fn neutral(nyquist: f64) -> Self {
        Self {
            track_a_gain: 1.0,
            track_b_gain: 1.0,
            filter_type: FilterType::Lowpass,
            filter_cutoff: nyquist,
            filter_resonance: DEFAULT_RESONANCE,
        }
    }

    /// Whether these parameters leave the signal untouched
    pub fn is_neutral(&self, nyquist: f64) -> bool {
        *self == Self::neutral(nyquist)
    }
}
