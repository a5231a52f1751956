//! mixlab-engine library interface
//!
//! - [`matcher`]: ranks mix templates for a track pair
//! - [`automation`]: evaluates template automation against a playback clock
//! - [`cli`]: command implementations behind the `mixlab` binary

pub mod automation;
pub mod cli;
pub mod matcher;

pub use automation::{index_templates, AudioParameters, AutomationEvaluator, AutomationFrame};
pub use matcher::{best_match, top_matches, TemplateMatcher};
