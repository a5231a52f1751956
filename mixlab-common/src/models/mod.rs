//! Data model shared by the matcher and the automation evaluator
//!
//! Documents arrive as JSON from the external store, so every type uses
//! camelCase field names and tolerates absent or `null` optional fields.

pub mod analysis;
pub mod placement;
pub mod score;
pub mod template;

pub use analysis::AudioAnalysisSummary;
pub use placement::{ParameterOverrides, TemplatePlacement, TimeRegion};
pub use score::{MatchReasoning, TemplateMatchScore};
pub use template::{
    Difficulty, FilterType, MixTemplate, TemplateCategory, TemplateData, Transition,
    TransitionParameters, TransitionType, VolumePoint,
};
