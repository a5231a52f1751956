//! # mixlab Common Library
//!
//! Shared code for the mixlab scoring and automation core:
//! - Data model (analysis summaries, mix templates, placements, scores)
//! - Shared error type
//! - TOML configuration loading

pub mod config;
pub mod error;
pub mod models;

pub use error::{Error, Result};
