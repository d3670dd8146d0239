// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::catalog::RunRequest;
use crate::config::CONFIG_FILE_NAME;

/// Command-line arguments for `shapebuild`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "shapebuild",
    version,
    about = "Build, test, package and publish a project from its declared shape.",
    long_about = None
)]
pub struct CliArgs {
    /// Targets to run (e.g. `clean`, `compile`, `test`, `dist`, `package`).
    ///
    /// With no targets, the implicit `default` target runs.
    #[arg(value_name = "TARGET")]
    pub targets: Vec<String>,

    /// Path to the project config file (JSON), relative to the work dir.
    #[arg(long, value_name = "PATH", default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// Project directory. Defaults to the current working directory.
    #[arg(long, value_name = "DIR")]
    pub work_dir: Option<PathBuf>,

    /// Maximum number of leaf actions running at the same time.
    #[arg(long, short = 'j', value_name = "N")]
    pub jobs: Option<usize>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SHAPEBUILD_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Resolve the layout and print the task graph without running anything.
    #[arg(long)]
    pub dry_run: bool,
}

impl CliArgs {
    /// The run request: the positional targets, or `["default"]` when none
    /// were given.
    pub fn run_request(&self) -> RunRequest {
        RunRequest::new(self.targets.clone())
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// The `EnvFilter` directive selecting this level.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
