// src/actions/clean.rs

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info};

use crate::actions::ActionContext;
use crate::errors::{ActionError, ActionResult};
use crate::fs::{FileMatcher, matching_files};
use crate::types::{Area, ProjectType};

/// Compiler output patterns, relative to an area directory.
const GENERATED: [&str; 3] = ["**/*.d.ts", "**/*.js", "**/*.map"];

/// Per-app bundler override files live at the top of a bundled area and
/// are authored, even though they end in `.js`.
const BUNDLER_OVERRIDES: [&str; 1] = ["*-webpack.js"];

/// Delete compiled output, map files and declaration files under the area.
/// Authored sources (`.ts`, bundler overrides, resources) are kept.
pub fn clean_area(ctx: &ActionContext, area: Area) -> ActionResult {
    let dir = ctx.area_dir(area);
    let exclude: &[&str] = if area.is_bundled() { &BUNDLER_OVERRIDES } else { &[] };
    let matcher = FileMatcher::new(&GENERATED, exclude)?;

    let files = matching_files(&dir, &matcher)?;
    for file in &files {
        remove_file_if_present(file)?;
    }

    info!(area = %area, removed = files.len(), "cleaned generated files");
    Ok(())
}

/// Remove the dist directory; the generic type also removes the package
/// output directory.
pub fn clean_dist(ctx: &ActionContext) -> ActionResult {
    remove_dir_if_present(&ctx.dist_dir())?;
    if ctx.config.project_type == ProjectType::Generic {
        remove_dir_if_present(&ctx.package_dir())?;
    }
    Ok(())
}

fn remove_file_if_present(path: &Path) -> ActionResult {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!(file = %path.display(), "removed");
            Ok(())
        }
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(ActionError::Io(err)),
    }
}

pub(crate) fn remove_dir_if_present(path: &Path) -> ActionResult {
    match fs::remove_dir_all(path) {
        Ok(()) => {
            info!(dir = %path.display(), "removed directory");
            Ok(())
        }
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(ActionError::Io(err)),
    }
}
