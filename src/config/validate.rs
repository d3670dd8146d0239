// src/config/validate.rs

use std::path::{Component, Path};

use crate::config::model::{ProjectConfig, RawProjectConfig};
use crate::errors::{BuildError, Result};

impl TryFrom<RawProjectConfig> for ProjectConfig {
    type Error = BuildError;

    fn try_from(raw: RawProjectConfig) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ProjectConfig::new_unchecked(raw))
    }
}

fn validate_raw_config(cfg: &RawProjectConfig) -> Result<()> {
    validate_paths(cfg)?;
    validate_tools(cfg)?;
    validate_jobs(cfg)?;
    Ok(())
}

fn validate_paths(cfg: &RawProjectConfig) -> Result<()> {
    for (key, value) in cfg.paths.entries() {
        if value.trim().is_empty() {
            return Err(BuildError::Config(format!("paths.{key} must not be empty")));
        }

        let path = Path::new(value);
        if path.is_absolute() {
            return Err(BuildError::Config(format!(
                "paths.{key} must be relative to the project directory (got '{value}')"
            )));
        }
        if path.components().any(|c| matches!(c, Component::ParentDir)) {
            return Err(BuildError::Config(format!(
                "paths.{key} must not leave the project directory (got '{value}')"
            )));
        }
    }

    // The dist directory is wiped by clean:dist; it must not alias an area.
    let dist = cfg.paths.dist.trim_end_matches('/');
    for (key, value) in cfg.paths.entries() {
        if key != "dist" && value.trim_end_matches('/') == dist {
            return Err(BuildError::Config(format!(
                "paths.dist and paths.{key} must differ (both '{dist}')"
            )));
        }
    }

    Ok(())
}

fn validate_tools(cfg: &RawProjectConfig) -> Result<()> {
    let tools = &cfg.tools;
    for (key, value) in [
        ("linter", &tools.linter),
        ("compiler", &tools.compiler),
        ("bundler", &tools.bundler),
        ("test_runner", &tools.test_runner),
        ("package_manager", &tools.package_manager),
    ] {
        if value.trim().is_empty() {
            return Err(BuildError::Config(format!("tools.{key} must not be empty")));
        }
    }
    Ok(())
}

fn validate_jobs(cfg: &RawProjectConfig) -> Result<()> {
    if cfg.jobs == Some(0) {
        return Err(BuildError::Config("jobs must be >= 1 (got 0)".to_string()));
    }
    Ok(())
}
