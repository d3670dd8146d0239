// src/config/mod.rs

//! Configuration loading and validation.
//!
//! - `model.rs`: the serde-backed data model.
//! - `merge.rs`: per-type defaults and the deep merge of user overrides.
//! - `loader.rs`: reading `shapebuild.json` (absence is not an error).
//! - `validate.rs`: path, tool and job sanity checks.

pub mod loader;
pub mod merge;
pub mod model;
pub mod validate;

pub use loader::{CONFIG_FILE_NAME, from_value, load_and_validate, load_from_path};
pub use merge::{deep_merge, default_config};
pub use model::{
    ExternalConfigSection, LintSection, PathsSection, ProjectConfig, RawProjectConfig,
    ToolsSection,
};
