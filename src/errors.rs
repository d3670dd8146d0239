// src/errors.rs

//! Crate-wide error types.
//!
//! [`BuildError`] covers everything that stops a run before any node
//! executes (bad config, unknown target, malformed graph). [`ActionError`]
//! is what a single leaf action reports; it only ever fails its own node.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown target: {0}")]
    UnknownTarget(String),

    #[error("Cycle detected in task graph: {0}")]
    Cycle(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum ActionError {
    /// An external tool exited unsuccessfully. `detail` carries the captured
    /// stderr and stdout.
    #[error("{tool} failed with exit code {code}:{detail}")]
    Tool {
        tool: String,
        code: i32,
        detail: String,
    },

    #[error("lint reported {count} violation(s) at or above '{severity}':\n{report}")]
    LintViolations {
        count: usize,
        severity: String,
        report: String,
    },

    #[error("bundling '{app}' failed: {message}")]
    Bundle { app: String, message: String },

    #[error("tag version {tag} != package version {version}")]
    ProvenanceMismatch { tag: String, version: String },

    #[error("template {name} is not available for {path:?}")]
    Template { name: String, path: PathBuf },

    #[error("dependency '{0}' has a floating version but is not installed")]
    MissingDependency(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, BuildError>;
pub type ActionResult = std::result::Result<(), ActionError>;
