// src/logging.rs

//! Log subscriber for the `shapebuild` binary.
//!
//! `--log-level` wins when given. Otherwise `SHAPEBUILD_LOG` is read as an
//! `EnvFilter` directive, so `SHAPEBUILD_LOG=shapebuild::dag=debug` works as
//! well as a plain level. With neither set the filter is `info`.
//!
//! Output goes to stderr; stdout is reserved for dry-run listings and tool
//! output.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

use crate::cli::LogLevel;

pub const LOG_ENV_VAR: &str = "SHAPEBUILD_LOG";

const DEFAULT_DIRECTIVE: &str = "info";

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(cli_level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("installing log subscriber: {e}"))
}

fn build_filter(cli_level: Option<LogLevel>) -> EnvFilter {
    match cli_level {
        Some(level) => EnvFilter::new(level.as_directive()),
        None => EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE)),
    }
}
