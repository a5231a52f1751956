//! Template placements on a project timeline

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A template instance anchored on the project timeline
///
/// `template_id` is a weak reference: the template may have been deleted,
/// in which case the placement contributes nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePlacement {
    pub id: Uuid,
    pub template_id: Uuid,

    /// Absolute timeline position in seconds
    pub start_time: f64,

    #[serde(default)]
    pub track_a_region: Option<TimeRegion>,

    #[serde(default)]
    pub track_b_region: Option<TimeRegion>,

    #[serde(default)]
    pub parameter_overrides: ParameterOverrides,
}

/// Window of a source track consumed by a placement (seconds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRegion {
    pub start: f64,
    pub end: f64,
}

impl TimeRegion {
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

/// Sparse per-placement overrides of template parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParameterOverrides {
    /// Multiplier applied to the automated track A gain
    pub track_a_volume: Option<f64>,

    /// Multiplier applied to the automated track B gain
    pub track_b_volume: Option<f64>,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl ParameterOverrides {
    pub fn track_a_multiplier(&self) -> f64 {
        usable_multiplier(self.track_a_volume)
    }

    pub fn track_b_multiplier(&self) -> f64 {
        usable_multiplier(self.track_b_volume)
    }
}

fn usable_multiplier(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite() && *v >= 0.0).unwrap_or(1.0)
}
