//! Energy fit between a track pair and a template energy window

use super::NEUTRAL_SCORE;
use mixlab_common::models::{AudioAnalysisSummary, TemplateData};

/// Score at the outer edge of the buffer
const BUFFER_EDGE_SCORE: f64 = 70.0;

/// Beyond the buffer
const OUTSIDE_SCORE: f64 = 30.0;

/// Mean energy of the tracks that report one
pub fn combined_energy(
    track_a: &AudioAnalysisSummary,
    track_b: &AudioAnalysisSummary,
) -> Option<f64> {
    match (track_a.usable_energy(), track_b.usable_energy()) {
        (Some(a), Some(b)) => Some((a + b) / 2.0),
        (Some(e), None) | (None, Some(e)) => Some(e),
        (None, None) => None,
    }
}

/// Score combined energy against `[energy_min, energy_max]`
///
/// Inside → 100. Within `buffer` of the range → linear from 100 down to 70
/// by distance past the range edge. Further out → 30. Missing energy or
/// either bound → neutral 50.
pub fn score_energy(combined: Option<f64>, data: &TemplateData, buffer: f64) -> f64 {
    let (Some(energy), Some(min), Some(max)) = (combined, data.energy_min, data.energy_max) else {
        return NEUTRAL_SCORE;
    };
    if !(energy.is_finite() && min.is_finite() && max.is_finite()) || min > max {
        return NEUTRAL_SCORE;
    }

    if energy >= min && energy <= max {
        return 100.0;
    }

    let distance = if energy < min { min - energy } else { energy - max };
    if buffer > 0.0 && distance <= buffer {
        return 100.0 - (distance / buffer) * (100.0 - BUFFER_EDGE_SCORE);
    }

    OUTSIDE_SCORE
}
