// src/config/loader.rs

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::info;

use crate::config::merge::merged_with_defaults;
use crate::config::model::{ProjectConfig, RawProjectConfig};
use crate::errors::{BuildError, Result};

/// Read the user's config file as raw JSON.
///
/// Returns `Ok(None)` when the file does not exist: running without a
/// config file is normal and falls back to the built-in defaults.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Option<Value>> {
    let path = path.as_ref();
    if !path.exists() {
        info!(
            path = %path.display(),
            "config file not found; using default configuration"
        );
        return Ok(None);
    }

    info!(path = %path.display(), "reading config file");
    let contents = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&contents)
        .map_err(|e| BuildError::Config(format!("parsing {}: {e}", path.display())))?;

    Ok(Some(value))
}

/// Merge a user config (if any) onto the type defaults, deserialize it and
/// validate the result.
pub fn from_value(user: Option<&Value>) -> Result<ProjectConfig> {
    let merged = merged_with_defaults(user).map_err(BuildError::Config)?;
    let raw: RawProjectConfig = serde_json::from_value(merged)
        .map_err(|e| BuildError::Config(format!("invalid config: {e}")))?;
    ProjectConfig::try_from(raw)
}

/// Load the config file at `path` (if present), apply defaults and validate.
///
/// This is the entry point used by `run`.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ProjectConfig> {
    let user = load_from_path(&path)?;
    from_value(user.as_ref())
}

/// Config file name looked up in the work dir when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "shapebuild.json";
