// src/actions/templates.rs

//! Tool configuration files materialized from bundled templates.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::errors::ActionError;
use crate::types::ProjectType;

/// A tool configuration file the build can create on first use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    CompilerConfig,
    LinterConfig,
    BundlerConfig(ProjectType),
}

impl Template {
    /// File name in the work dir.
    pub fn file_name(&self) -> &'static str {
        match self {
            Template::CompilerConfig => "tsconfig.json",
            Template::LinterConfig => "tslint.json",
            Template::BundlerConfig(_) => "webpack.config.js",
        }
    }

    fn contents(&self) -> Option<&'static str> {
        match self {
            Template::CompilerConfig => Some(include_str!("../../res/tsconfig.json")),
            Template::LinterConfig => Some(include_str!("../../res/tslint.json")),
            Template::BundlerConfig(ProjectType::DesktopShell) => {
                Some(include_str!("../../res/desktop-shell-webpack.config.js"))
            }
            Template::BundlerConfig(ProjectType::WebClientServer) => {
                Some(include_str!("../../res/web-client-server-webpack.config.js"))
            }
            // No bundled area exists for the generic type.
            Template::BundlerConfig(ProjectType::Generic) => None,
        }
    }
}

/// Return the path of `template` under `work_dir`, creating it from the
/// bundled template if absent.
///
/// The contents are written to a temp file next to the target and linked
/// into place without clobbering, so a concurrent node sees either no file
/// or the complete one, and a user's copy is never replaced.
pub fn ensure(work_dir: &Path, template: Template) -> Result<PathBuf, ActionError> {
    let path = work_dir.join(template.file_name());
    if path.exists() {
        debug!(file = %path.display(), "tool configuration present");
        return Ok(path);
    }

    let contents = template.contents().ok_or_else(|| ActionError::Template {
        name: template.file_name().to_string(),
        path: path.clone(),
    })?;

    let mut staged = NamedTempFile::new_in(work_dir)?;
    staged.write_all(contents.as_bytes())?;
    staged.flush()?;

    match staged.persist_noclobber(&path) {
        Ok(_) => {
            warn!(
                "The project has no {} file. Created {} (you should commit it)",
                template.file_name(),
                path.display()
            );
            Ok(path)
        }
        Err(err) if err.error.kind() == ErrorKind::AlreadyExists => {
            debug!(file = %path.display(), "tool configuration created concurrently");
            Ok(path)
        }
        Err(err) => Err(err.error.into()),
    }
}
