//! Configuration loading and config file resolution
//!
//! Priority order for locating the TOML file:
//! 1. Command-line argument (highest priority)
//! 2. `MIXLAB_CONFIG` environment variable
//! 3. Platform config directory (`<config_dir>/mixlab/config.toml`)
//! 4. Compiled defaults (fallback)
//!
//! A file named explicitly (CLI or environment) must load. A missing or
//! unusable file at the platform location is not an error: defaults are used
//! and `ConfigSource::log` emits the warning.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "MIXLAB_CONFIG";

/// Tolerance when checking that scoring weights sum to 1
const WEIGHT_SUM_TOLERANCE: f64 = 0.001;

/// Complete mixlab configuration (TOML root)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MixlabConfig {
    /// Logging configuration (optional section)
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Compatibility scoring tunables (optional section)
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Automation evaluation tunables (optional section)
    #[serde(default)]
    pub automation: AutomationConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Weights and tolerances used by the template matcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub bpm_weight: f64,
    pub key_weight: f64,
    pub genre_weight: f64,
    pub energy_weight: f64,

    /// Fraction of the template BPM range tolerated on each side
    /// when the template does not declare its own flexibility
    pub default_bpm_flexibility: f64,

    /// Normalized energy distance tolerated outside the template range
    pub energy_buffer: f64,

    /// Analysis confidence assumed for a track that reports none
    pub default_track_confidence: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            bpm_weight: 0.35,
            key_weight: 0.25,
            genre_weight: 0.25,
            energy_weight: 0.15,
            default_bpm_flexibility: 0.1,
            energy_buffer: 0.15,
            default_track_confidence: 0.7,
        }
    }
}

impl ScoringConfig {
    /// Sum of the four dimension weights
    pub fn weight_sum(&self) -> f64 {
        self.bpm_weight + self.key_weight + self.genre_weight + self.energy_weight
    }

    /// Reject weight sets and tolerances the matcher cannot use
    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("bpm_weight", self.bpm_weight),
            ("key_weight", self.key_weight),
            ("genre_weight", self.genre_weight),
            ("energy_weight", self.energy_weight),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Config(format!(
                    "scoring.{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        let sum = self.weight_sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(Error::Config(format!(
                "scoring weights must sum to 1.0, got {:.3}",
                sum
            )));
        }

        if !(self.default_bpm_flexibility >= 0.0) {
            return Err(Error::Config(
                "scoring.default_bpm_flexibility must be >= 0".to_string(),
            ));
        }
        if !(self.energy_buffer > 0.0) {
            return Err(Error::Config(
                "scoring.energy_buffer must be > 0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.default_track_confidence) {
            return Err(Error::Config(
                "scoring.default_track_confidence must be within [0, 1]".to_string(),
            ));
        }

        Ok(())
    }
}

/// Automation evaluator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomationConfig {
    /// Audio context sample rate; filter sweeps open up to half of it
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_sample_rate() -> u32 {
    44_100
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    CommandLine(PathBuf),
    Environment(PathBuf),
    PlatformDefault(PathBuf),
    CompiledDefaults,
    /// Platform file exists but could not be loaded; compiled defaults are active
    RejectedPlatformFile { path: PathBuf, reason: String },
}

impl ConfigSource {
    /// Whether compiled defaults are in effect
    pub fn is_fallback(&self) -> bool {
        matches!(
            self,
            ConfigSource::CompiledDefaults | ConfigSource::RejectedPlatformFile { .. }
        )
    }

    /// Report the source through `tracing`
    ///
    /// `load` runs before the binary installs its subscriber, so the
    /// outcome is logged once logging is up.
    pub fn log(&self) {
        match self {
            ConfigSource::CommandLine(path) => {
                info!("Loaded configuration from {} (command line)", path.display())
            }
            ConfigSource::Environment(path) => info!(
                "Loaded configuration from {} ({})",
                path.display(),
                CONFIG_ENV_VAR
            ),
            ConfigSource::PlatformDefault(path) => {
                info!("Loaded configuration from {}", path.display())
            }
            ConfigSource::CompiledDefaults => {
                warn!("No configuration file found, using compiled defaults")
            }
            ConfigSource::RejectedPlatformFile { path, reason } => warn!(
                "Ignoring unusable config file {}: {}. Using compiled defaults",
                path.display(),
                reason
            ),
        }
    }
}

impl MixlabConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: MixlabConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Validate all sections
    pub fn validate(&self) -> Result<()> {
        self.scoring.validate()?;
        if self.automation.sample_rate == 0 {
            return Err(Error::Config(
                "automation.sample_rate must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolve and load configuration following the documented priority order
    ///
    /// Returns the configuration together with the source it was taken from.
    /// An unusable platform file falls back to compiled defaults and is
    /// reported as `ConfigSource::RejectedPlatformFile`.
    pub fn load(cli_arg: Option<&Path>) -> Result<(Self, ConfigSource)> {
        match resolve_config_source(cli_arg) {
            ConfigSource::CommandLine(path) => {
                let config = Self::from_file(&path)?;
                Ok((config, ConfigSource::CommandLine(path)))
            }
            ConfigSource::Environment(path) => {
                let config = Self::from_file(&path)?;
                Ok((config, ConfigSource::Environment(path)))
            }
            ConfigSource::PlatformDefault(path) => match Self::from_file(&path) {
                Ok(config) => Ok((config, ConfigSource::PlatformDefault(path))),
                Err(e) => Ok((
                    Self::default(),
                    ConfigSource::RejectedPlatformFile {
                        path,
                        reason: e.to_string(),
                    },
                )),
            },
            source => Ok((Self::default(), source)),
        }
    }
}

/// Decide which configuration source applies, without reading it
pub fn resolve_config_source(cli_arg: Option<&Path>) -> ConfigSource {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return ConfigSource::CommandLine(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return ConfigSource::Environment(PathBuf::from(path));
        }
    }

    // Priority 3: Platform config directory
    if let Some(path) = platform_config_path() {
        if path.exists() {
            return ConfigSource::PlatformDefault(path);
        }
    }

    // Priority 4: Compiled defaults
    ConfigSource::CompiledDefaults
}

/// Platform-specific config file location
pub fn platform_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("mixlab").join("config.toml"))
}
