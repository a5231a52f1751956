//! Filter sweep shaping

use mixlab_common::models::FilterType;

/// Lowest cutoff a highpass sweep starts from (Hz)
pub const HIGHPASS_SWEEP_START: f64 = 20.0;

/// Effective cutoff at `progress` (0.0-1.0) through a filter transition
///
/// - Highpass sweeps up from 20 Hz toward `target`.
/// - Lowpass sweeps down from `nyquist` (fully open) toward `target`.
/// - Bandpass holds `target`.
pub fn sweep_cutoff(filter_type: FilterType, target: f64, progress: f64, nyquist: f64) -> f64 {
    let progress = progress.clamp(0.0, 1.0);
    match filter_type {
        FilterType::Highpass => HIGHPASS_SWEEP_START + (target - HIGHPASS_SWEEP_START) * progress,
        FilterType::Lowpass => target + (nyquist - target) * (1.0 - progress),
        FilterType::Bandpass => target,
    }
}
