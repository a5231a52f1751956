//! mixlab - template matching and automation preview
//!
//! Reads analysis summaries, template catalogs and timeline placements as
//! JSON and prints template rankings or automation parameters as JSON.
//! Logs go to stderr so stdout stays machine-readable.

use anyhow::{Context, Result};
use clap::Parser;
use mixlab_common::config::MixlabConfig;
use mixlab_engine::cli::{self, Args};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    let args = Args::parse();

    let (config, source) =
        MixlabConfig::load(args.config.as_deref()).context("Failed to load configuration")?;

    // Priority: --log-level, then RUST_LOG, then [logging] level
    let filter = match &args.log_level {
        Some(level) => EnvFilter::try_new(level)
            .with_context(|| format!("Invalid log level '{}'", level))?,
        None => EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.logging.level))
            .context("Invalid log level in configuration")?,
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("mixlab {}", env!("CARGO_PKG_VERSION"));
    source.log();

    let output = cli::run(&args.command, &config).context("Command failed")?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
