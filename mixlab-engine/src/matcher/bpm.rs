//! Tempo compatibility between a track pair and a template BPM range

use super::NEUTRAL_SCORE;
use mixlab_common::models::{AudioAnalysisSummary, TemplateData};

/// Score at the edge of the flex margin
const FLEX_EDGE_SCORE: f64 = 50.0;

/// Half-time or double-time fit
const HALF_DOUBLE_SCORE: f64 = 70.0;

/// Combined tempo of the pair
///
/// Arithmetic mean of both tempos where a missing tempo counts as 0, so a
/// single missing value drags the mean down. `None` only when neither
/// track reports a tempo.
pub fn combined_bpm(track_a: &AudioAnalysisSummary, track_b: &AudioAnalysisSummary) -> Option<f64> {
    let a = track_a.usable_bpm();
    let b = track_b.usable_bpm();
    if a.is_none() && b.is_none() {
        return None;
    }
    Some((a.unwrap_or(0.0) + b.unwrap_or(0.0)) / 2.0)
}

/// Score a combined tempo against the template range
///
/// Inside `[min, max]` → 100. Inside the range widened by
/// `flexibility × (max − min)` on each side → linear from 100 down to 50
/// at the flex edge. Half or double tempo inside the widened range → 70.
/// Otherwise 0. Unknown tempo or no declared range → 50.
pub fn score_bpm(combined: Option<f64>, data: &TemplateData, default_flexibility: f64) -> f64 {
    let (Some(bpm), Some(min), Some(max)) = (combined, data.bpm_min, data.bpm_max) else {
        return NEUTRAL_SCORE;
    };
    if !(bpm.is_finite() && min.is_finite() && max.is_finite()) || min > max {
        return NEUTRAL_SCORE;
    }

    if bpm >= min && bpm <= max {
        return 100.0;
    }

    let flexibility = data
        .bpm_flexibility
        .filter(|f| f.is_finite() && *f >= 0.0)
        .unwrap_or(default_flexibility);
    let margin = flexibility * (max - min);
    let flex_min = min - margin;
    let flex_max = max + margin;

    if margin > 0.0 && bpm >= flex_min && bpm <= flex_max {
        let distance = if bpm < min { min - bpm } else { bpm - max };
        return 100.0 - (distance / margin) * (100.0 - FLEX_EDGE_SCORE);
    }

    let within_flex = |tempo: f64| tempo >= flex_min && tempo <= flex_max;
    if within_flex(bpm / 2.0) || within_flex(bpm * 2.0) {
        return HALF_DOUBLE_SCORE;
    }

    0.0
}
