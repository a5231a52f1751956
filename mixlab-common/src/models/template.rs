//! Mix template catalog entries
//!
//! A template bundles a compatibility profile (tempo range, keys, genre
//! weights, energy window) with the timed transitions it performs.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Catalog entry authored by template designers, read-only to the core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MixTemplate {
    pub id: Uuid,

    #[serde(default)]
    pub name: Option<String>,

    /// Empty `Other` label when the document has none
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: TemplateCategory,

    #[serde(default, deserialize_with = "null_as_default")]
    pub difficulty: Difficulty,

    /// Template length in seconds
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub template_data: TemplateData,
}

impl MixTemplate {
    /// Seconds covered by a placement of this template
    ///
    /// Uses the declared duration; templates without one fall back to
    /// the end of their last transition.
    pub fn span(&self) -> f64 {
        if self.duration.is_finite() && self.duration > 0.0 {
            return self.duration;
        }
        self.template_data
            .transitions
            .iter()
            .map(Transition::end_time)
            .filter(|t| t.is_finite())
            .fold(0.0, f64::max)
    }
}

/// Genre-like template category
///
/// Labels outside the fixed set are kept as `Other` instead of failing
/// the whole catalog document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TemplateCategory {
    House,
    Techno,
    Trance,
    HipHop,
    Pop,
    Rock,
    DrumAndBass,
    Dubstep,
    Electronic,
    Ambient,
    Disco,
    Other(String),
}

impl TemplateCategory {
    /// Canonical label, lowercase words separated by single spaces
    pub fn label(&self) -> &str {
        match self {
            TemplateCategory::House => "house",
            TemplateCategory::Techno => "techno",
            TemplateCategory::Trance => "trance",
            TemplateCategory::HipHop => "hip hop",
            TemplateCategory::Pop => "pop",
            TemplateCategory::Rock => "rock",
            TemplateCategory::DrumAndBass => "drum and bass",
            TemplateCategory::Dubstep => "dubstep",
            TemplateCategory::Electronic => "electronic",
            TemplateCategory::Ambient => "ambient",
            TemplateCategory::Disco => "disco",
            TemplateCategory::Other(label) => label,
        }
    }

    /// Parse a category label; accepts `_`/`-` separators and any case
    pub fn parse(label: &str) -> Self {
        let normalized = label
            .trim()
            .to_lowercase()
            .replace(['_', '-'], " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        match normalized.as_str() {
            "house" => TemplateCategory::House,
            "techno" => TemplateCategory::Techno,
            "trance" => TemplateCategory::Trance,
            "hip hop" | "hiphop" => TemplateCategory::HipHop,
            "pop" => TemplateCategory::Pop,
            "rock" => TemplateCategory::Rock,
            "drum and bass" | "drum & bass" | "dnb" => TemplateCategory::DrumAndBass,
            "dubstep" => TemplateCategory::Dubstep,
            "electronic" => TemplateCategory::Electronic,
            "ambient" => TemplateCategory::Ambient,
            "disco" => TemplateCategory::Disco,
            _ => TemplateCategory::Other(normalized),
        }
    }

    /// Whether the template declares no category at all
    pub fn is_unset(&self) -> bool {
        matches!(self, TemplateCategory::Other(label) if label.is_empty())
    }
}

impl Default for TemplateCategory {
    fn default() -> Self {
        TemplateCategory::Other(String::new())
    }
}

impl From<String> for TemplateCategory {
    fn from(label: String) -> Self {
        TemplateCategory::parse(&label)
    }
}

impl From<TemplateCategory> for String {
    fn from(category: TemplateCategory) -> Self {
        category.label().replace(' ', "_")
    }
}

impl std::fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    #[serde(other)]
    Unknown,
}

/// Compatibility profile and transitions of a template
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateData {
    pub bpm_min: Option<f64>,
    pub bpm_max: Option<f64>,

    /// Fraction of the BPM range tolerated beyond each bound
    pub bpm_flexibility: Option<f64>,

    #[serde(deserialize_with = "null_as_default")]
    pub compatible_keys: Vec<String>,

    pub energy_min: Option<f64>,
    pub energy_max: Option<f64>,

    /// Genre label → weight (0.0 to 1.0)
    #[serde(deserialize_with = "null_as_default")]
    pub genre_tags: HashMap<String, f64>,

    #[serde(deserialize_with = "null_as_default")]
    pub transitions: Vec<Transition>,
}

/// One timed effect segment within a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    #[serde(rename = "type")]
    pub kind: TransitionType,

    /// Seconds from template start
    #[serde(default, deserialize_with = "null_as_default")]
    pub start_time: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub parameters: TransitionParameters,
}

impl Transition {
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }

    /// Whether template-relative `time` falls inside this transition (inclusive)
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start_time && time <= self.end_time()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionType {
    Crossfade,
    Cut,
    Scratch,
    Echo,
    Filter,
    Reverse,
    Stutter,
    Drop,
    /// Type label this build does not know; carries no automation
    #[serde(other)]
    Unknown,
}

/// Type-dependent parameter bag of a transition
///
/// Keys this core does not interpret are preserved in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransitionParameters {
    /// Control points (crossfade, cut, scratch, drop)
    #[serde(deserialize_with = "null_as_default")]
    pub volume_automation: Vec<VolumePoint>,

    #[serde(deserialize_with = "lenient_filter_type")]
    pub filter_type: Option<FilterType>,

    /// Target cutoff in Hz
    pub cutoff_freq: Option<f64>,

    /// Filter Q
    pub resonance: Option<f64>,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Volume control point, volumes in percent (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumePoint {
    /// Seconds from transition start
    pub time: f64,
    pub track_a_volume: f64,
    pub track_b_volume: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    #[default]
    Lowpass,
    Highpass,
    Bandpass,
}

impl FilterType {
    /// Parse a filter label (case-insensitive, tolerates `low-pass` spellings)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "lowpass" => Some(FilterType::Lowpass),
            "highpass" => Some(FilterType::Highpass),
            "bandpass" => Some(FilterType::Bandpass),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterType::Lowpass => "lowpass",
            FilterType::Highpass => "highpass",
            FilterType::Bandpass => "bandpass",
        }
    }
}

impl std::fmt::Display for FilterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_filter_type<'de, D>(deserializer: D) -> Result<Option<FilterType>, D::Error>
where
    D: Deserializer<'de>,
{
    let label = Option::<String>::deserialize(deserializer)?;
    Ok(label.as_deref().and_then(FilterType::from_str))
}
