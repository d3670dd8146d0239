// src/actions/compile.rs

//! `compile:<area>:ts`: compile one area in place with the TypeScript
//! compiler.
//!
//! The project's `tsconfig.json` (created from the bundled template when
//! missing) is extended by a per-area config under [`SCRATCH_DIR`] that
//! narrows the inputs to the area and sets the mode-dependent options.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use tracing::{debug, info};

use crate::actions::ActionContext;
use crate::actions::templates::{self, Template};
use crate::errors::ActionResult;
use crate::exec::ToolInvocation;
use crate::types::{Area, BuildMode};

/// Work-dir relative directory holding generated per-run files.
pub const SCRATCH_DIR: &str = ".shapebuild";

pub async fn compile_area(ctx: &ActionContext, area: Area) -> ActionResult {
    templates::ensure(ctx.work_dir(), Template::CompilerConfig)?;

    let mode = ctx.build_mode();
    let area_path = ctx.config.area_path(area);
    let types_path = ctx.presence.has(Area::Types).then(|| ctx.config.paths.types.as_str());
    let project = write_area_project(ctx.work_dir(), area, area_path, types_path, mode)?;

    info!(area = %area, mode = mode.as_str(), "compiling");
    let output = ToolInvocation::new(&ctx.config.tools.compiler, ctx.work_dir())
        .with_node_bin(ctx.work_dir())
        .arg("--project")
        .arg(project.to_string_lossy())
        .run()
        .await?
        .into_result()?;

    if !output.stdout.trim().is_empty() {
        debug!(area = %area, "compiler output: {}", output.stdout.trim_end());
    }
    Ok(())
}

/// Write `<scratch>/tsconfig.<area>.json` and return its path.
///
/// Sourcemaps are produced only outside production; declarations always.
pub fn write_area_project(
    work_dir: &Path,
    area: Area,
    area_path: &str,
    types_path: Option<&str>,
    mode: BuildMode,
) -> std::io::Result<PathBuf> {
    let scratch = work_dir.join(SCRATCH_DIR);
    fs::create_dir_all(&scratch)?;

    let up = |p: &str| format!("../{p}");
    let mut include = vec![format!("../{area_path}/**/*.ts")];
    if let Some(types) = types_path {
        include.push(format!("../{types}/**/*.d.ts"));
    }

    let project = json!({
        "extends": "../tsconfig.json",
        "compilerOptions": {
            "rootDir": up(area_path),
            "outDir": up(area_path),
            "sourceMap": !mode.is_production(),
            "declaration": true,
        },
        "include": include,
    });

    let file_name = format!("tsconfig.{}.json", area.id().replace(':', "."));
    let path = scratch.join(file_name);
    fs::write(&path, serde_json::to_string_pretty(&project)?)?;
    Ok(path)
}
