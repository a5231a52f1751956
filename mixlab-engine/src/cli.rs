//! Command-line interface for the `mixlab` binary
//!
//! Inputs are the JSON documents the external store produces (analysis
//! summaries, template catalog, timeline placements). Results are returned
//! as JSON values for the binary to print on stdout.

use crate::automation::{index_templates, AutomationEvaluator};
use crate::matcher::{top_matches, TemplateMatcher};
use clap::{Parser, Subcommand};
use mixlab_common::config::MixlabConfig;
use mixlab_common::models::{AudioAnalysisSummary, MixTemplate, TemplatePlacement};
use mixlab_common::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::info;

/// Command-line arguments for mixlab
#[derive(Parser, Debug)]
#[command(name = "mixlab")]
#[command(about = "Template matching and automation preview for mixlab")]
#[command(version)]
pub struct Args {
    /// TOML configuration file (overrides MIXLAB_CONFIG)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level or filter directive (overrides RUST_LOG and config)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rank catalog templates for a pair of analyzed tracks
    Match {
        /// Analysis summary JSON for track A
        #[arg(long)]
        track_a: PathBuf,

        /// Analysis summary JSON for track B
        #[arg(long)]
        track_b: PathBuf,

        /// JSON array of mix templates
        #[arg(long)]
        catalog: PathBuf,

        /// Only output the N best matches
        #[arg(long)]
        top: Option<usize>,

        /// Output only the best match, and only if it reaches this score
        #[arg(long, conflicts_with = "top")]
        min_score: Option<u8>,
    },

    /// Evaluate timeline automation at one instant or over a range
    Automate {
        /// JSON array of template placements
        #[arg(long)]
        placements: PathBuf,

        /// JSON array of mix templates
        #[arg(long)]
        catalog: PathBuf,

        /// Timeline time in seconds
        #[arg(long, conflicts_with_all = ["from", "to"])]
        at: Option<f64>,

        /// Range start in seconds
        #[arg(long, requires = "to")]
        from: Option<f64>,

        /// Range end in seconds
        #[arg(long, requires = "from")]
        to: Option<f64>,

        /// Range step in seconds
        #[arg(long, default_value_t = 0.1)]
        step: f64,
    },
}

/// Read and parse a JSON document
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    let value = serde_json::from_str(&content)?;
    Ok(value)
}

/// Execute a parsed command with the loaded configuration
pub fn run(command: &Command, config: &MixlabConfig) -> Result<Value> {
    match command {
        Command::Match {
            track_a,
            track_b,
            catalog,
            top,
            min_score,
        } => {
            let matcher = TemplateMatcher::new(config.scoring.clone())?;
            run_match(&matcher, track_a, track_b, catalog, *top, *min_score)
        }
        Command::Automate {
            placements,
            catalog,
            at,
            from,
            to,
            step,
        } => {
            let evaluator = AutomationEvaluator::new(config.automation.sample_rate)?;
            let window = match (at, from, to) {
                (Some(at), _, _) => AutomateWindow::At(*at),
                (None, Some(from), Some(to)) => AutomateWindow::Range {
                    from: *from,
                    to: *to,
                    step: *step,
                },
                _ => {
                    return Err(Error::InvalidInput(
                        "automate needs either --at or --from/--to".to_string(),
                    ))
                }
            };
            run_automate(&evaluator, placements, catalog, window)
        }
    }
}

/// Rank a catalog for two analysis summaries read from disk
pub fn run_match(
    matcher: &TemplateMatcher,
    track_a: &Path,
    track_b: &Path,
    catalog: &Path,
    top: Option<usize>,
    min_score: Option<u8>,
) -> Result<Value> {
    let track_a: AudioAnalysisSummary = load_json(track_a)?;
    let track_b: AudioAnalysisSummary = load_json(track_b)?;
    let catalog: Vec<MixTemplate> = load_json(catalog)?;
    info!("Scoring {} templates", catalog.len());

    if let Some(min_score) = min_score {
        let picked = matcher.auto_pick(&track_a, &track_b, &catalog, min_score);
        return Ok(serde_json::to_value(picked)?);
    }

    let scores = matcher.match_templates(&track_a, &track_b, &catalog);
    let selected = match top {
        Some(n) => top_matches(&scores, n),
        None => &scores[..],
    };
    Ok(serde_json::to_value(selected)?)
}

/// What part of the timeline to evaluate
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AutomateWindow {
    At(f64),
    Range { from: f64, to: f64, step: f64 },
}

/// Evaluate automation for placements and catalog read from disk
pub fn run_automate(
    evaluator: &AutomationEvaluator,
    placements: &Path,
    catalog: &Path,
    window: AutomateWindow,
) -> Result<Value> {
    let placements: Vec<TemplatePlacement> = load_json(placements)?;
    let catalog: Vec<MixTemplate> = load_json(catalog)?;
    let templates = index_templates(&catalog);
    info!(
        "Evaluating {} placements against {} templates",
        placements.len(),
        templates.len()
    );

    match window {
        AutomateWindow::At(time) => {
            let params = evaluator.evaluate(time, &placements, &templates)?;
            Ok(serde_json::to_value(params)?)
        }
        AutomateWindow::Range { from, to, step } => {
            let frames = evaluator.trace(from, to, step, &placements, &templates)?;
            Ok(serde_json::to_value(frames)?)
        }
    }
}
