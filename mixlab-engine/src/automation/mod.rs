//! Template automation evaluation
//!
//! Turns a playback clock and the template placements on a timeline into
//! the gains and filter settings for the current instant.
//!
//! # Evaluation order
//!
//! Every call starts from neutral parameters. Placements are visited in
//! list order and transitions in template order; whichever writes a field
//! last wins. Overlapping transitions are not blended.

pub mod filter;
pub mod params;
pub mod volume;

pub use params::AudioParameters;

use mixlab_common::models::{MixTemplate, TemplatePlacement, Transition, TransitionType};
use mixlab_common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::trace;
use uuid::Uuid;

/// Upper bound on frames produced by one `trace` call
pub const MAX_TRACE_FRAMES: usize = 1_000_000;

/// Parameters at one sampled instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationFrame {
    /// Timeline seconds
    pub time: f64,
    pub parameters: AudioParameters,
}

/// Stateless automation evaluator
///
/// Safe to call once per animation frame: no state is carried between
/// calls, so identical arguments always give identical results.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutomationEvaluator {
    sample_rate: u32,
}

impl Default for AutomationEvaluator {
    fn default() -> Self {
        Self { sample_rate: 44_100 }
    }
}

impl AutomationEvaluator {
    pub fn new(sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(Error::InvalidInput("sample rate must be > 0".to_string()));
        }
        Ok(Self { sample_rate })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Highest representable frequency; where the open lowpass sits
    pub fn nyquist(&self) -> f64 {
        f64::from(self.sample_rate) / 2.0
    }

    /// Parameters to apply at timeline time `time` (seconds)
    ///
    /// # Errors
    /// `Error::InvalidInput` when `time` is negative, NaN or infinite.
    /// Data problems never fail: placements whose template is missing are
    /// skipped and malformed automation is ignored.
    pub fn evaluate(
        &self,
        time: f64,
        placements: &[TemplatePlacement],
        templates: &HashMap<Uuid, MixTemplate>,
    ) -> Result<AudioParameters> {
        validate_time(time)?;

        let mut params = AudioParameters::neutral(self.nyquist());

        for placement in placements {
            let Some(template) = templates.get(&placement.template_id) else {
                trace!(
                    "Placement {} references missing template {}, skipping",
                    placement.id,
                    placement.template_id
                );
                continue;
            };

            let relative_time = time - placement.start_time;
            if relative_time < 0.0 || relative_time > template.span() {
                continue;
            }

            for transition in &template.template_data.transitions {
                if transition.contains(relative_time) {
                    self.apply_transition(&mut params, transition, relative_time, placement);
                }
            }
        }

        Ok(params)
    }

    /// Sample `evaluate` from `from` to `to` (inclusive) every `step` seconds
    ///
    /// Used for crossfade previews and offline rendering of automation lanes.
    ///
    /// # Errors
    /// `Error::InvalidInput` for a bad range or step, or when the range
    /// would need more than `MAX_TRACE_FRAMES` frames.
    pub fn trace(
        &self,
        from: f64,
        to: f64,
        step: f64,
        placements: &[TemplatePlacement],
        templates: &HashMap<Uuid, MixTemplate>,
    ) -> Result<Vec<AutomationFrame>> {
        validate_time(from)?;
        validate_time(to)?;
        if !(step.is_finite() && step > 0.0) {
            return Err(Error::InvalidInput(format!("step must be > 0, got {}", step)));
        }
        if to < from {
            return Err(Error::InvalidInput(format!(
                "range end {} precedes start {}",
                to, from
            )));
        }

        let steps = ((to - from) / step + 1e-9).floor();
        if steps >= MAX_TRACE_FRAMES as f64 {
            return Err(Error::InvalidInput(format!(
                "range {}..{} at step {} exceeds {} frames",
                from, to, step, MAX_TRACE_FRAMES
            )));
        }

        // Index-based stepping avoids accumulating rounding error
        let count = steps as usize + 1;
        (0..count)
            .map(|i| {
                let time = from + step * i as f64;
                self.evaluate(time, placements, templates)
                    .map(|parameters| AutomationFrame { time, parameters })
            })
            .collect()
    }

    fn apply_transition(
        &self,
        params: &mut AudioParameters,
        transition: &Transition,
        relative_time: f64,
        placement: &TemplatePlacement,
    ) {
        let local_time = relative_time - transition.start_time;
        // Zero-length transitions only fire at their instant, at progress 0
        let progress = if transition.duration > 0.0 {
            (local_time / transition.duration).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let parameters = &transition.parameters;

        if !parameters.volume_automation.is_empty() {
            if let Some((a, b)) = volume::interpolate_volume(&parameters.volume_automation, local_time) {
                let overrides = &placement.parameter_overrides;
                params.track_a_gain = (a / 100.0) * overrides.track_a_multiplier();
                params.track_b_gain = (b / 100.0) * overrides.track_b_multiplier();
            }
        }

        if transition.kind == TransitionType::Filter {
            if let (Some(filter_type), Some(cutoff), Some(resonance)) = (
                parameters.filter_type,
                parameters.cutoff_freq.filter(|c| c.is_finite()),
                parameters.resonance.filter(|q| q.is_finite()),
            ) {
                params.filter_type = filter_type;
                params.filter_cutoff =
                    filter::sweep_cutoff(filter_type, cutoff, progress, self.nyquist());
                params.filter_resonance = resonance;
            }
        }
    }
}

/// Lookup map for `evaluate`, keyed by template id
///
/// Later entries with a duplicate id replace earlier ones.
pub fn index_templates(catalog: &[MixTemplate]) -> HashMap<Uuid, MixTemplate> {
    catalog
        .iter()
        .map(|template| (template.id, template.clone()))
        .collect()
}

fn validate_time(time: f64) -> Result<()> {
    if !time.is_finite() || time < 0.0 {
        return Err(Error::InvalidInput(format!(
            "timeline time must be a finite, non-negative number of seconds, got {}",
            time
        )));
    }
    Ok(())
}
