//! File-backed tracing setup. Log lines go to the data directory so they never
//! interleave with the terminal UI.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

pub const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber. A second call is a no-op.
pub fn init(config: &AppConfig, filter: Option<&str>) -> Result<()> {
    let directive: Directive = filter
        .unwrap_or(DEFAULT_FILTER)
        .parse()
        .with_context(|| format!("Invalid log filter '{}'", filter.unwrap_or(DEFAULT_FILTER)))?;
    let env_filter = EnvFilter::builder()
        .with_default_directive(directive)
        .from_env_lossy();

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.log_path())
        .with_context(|| format!("Failed to open log file at {}", config.log_path().display()))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .compact()
        .try_init();
    Ok(())
}
