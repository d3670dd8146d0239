// src/actions/package.rs

//! `package:install` and `package:archive`.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use serde_json::Value;
use tar::Builder;
use tracing::{info, warn};

use crate::actions::ActionContext;
use crate::actions::provenance::{archive_package_name, archive_version};
use crate::errors::{ActionError, ActionResult};
use crate::exec::ToolInvocation;

/// Install production dependencies into the dist directory.
pub async fn install(ctx: &ActionContext) -> ActionResult {
    ToolInvocation::new(&ctx.config.tools.package_manager, ctx.dist_dir())
        .with_node_bin(ctx.work_dir())
        .args(["install", "--production", "--progress=false"])
        .run()
        .await?
        .into_result()?;
    info!(dist = %ctx.dist_dir().display(), "production dependencies installed");
    Ok(())
}

/// Archive file names for a dist manifest: `(dist, config bundle)`.
pub fn archive_names(manifest: &Value) -> Result<(String, String), ActionError> {
    let name = archive_package_name(manifest)
        .ok_or_else(|| ActionError::Other(anyhow::anyhow!("dist package.json has no name")))?;
    let stem = format!("{name}-{}", archive_version(manifest));
    Ok((format!("{stem}.tar.gz"), format!("{stem}-config.tar.gz")))
}

/// Write the dist archive and the configuration bundle archive into the
/// package directory.
pub fn archive(ctx: &ActionContext) -> ActionResult {
    let dist = ctx.dist_dir();
    let raw = fs::read_to_string(dist.join("package.json"))?;
    let manifest: Value = serde_json::from_str(&raw)?;
    let (dist_archive, config_archive) = archive_names(&manifest)?;

    let package_dir = ctx.package_dir();
    fs::create_dir_all(&package_dir)?;

    let target = package_dir.join(&dist_archive);
    write_tar_gz(&target, &dist)?;
    info!(archive = %target.display(), "dist archived");

    let bundle = ctx.work_dir().join(&ctx.config.paths.config_bundle);
    if bundle.exists() {
        let target = package_dir.join(&config_archive);
        write_tar_gz(&target, &bundle)?;
        info!(archive = %target.display(), "configuration bundle archived");
    } else {
        warn!(bundle = %bundle.display(), "configuration bundle not found; skipping its archive");
    }
    Ok(())
}

/// Gzip-compressed tar of `source`: a directory's contents at the archive
/// root, or a single file under its own name.
pub fn write_tar_gz(output: &Path, source: &Path) -> Result<PathBuf, ActionError> {
    let file = File::create(output)?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = Builder::new(encoder);

    if source.is_dir() {
        builder.append_dir_all(".", source)?;
    } else {
        let name = source
            .file_name()
            .ok_or_else(|| ActionError::Other(anyhow::anyhow!("invalid archive source {}", source.display())))?;
        builder.append_path_with_name(source, name)?;
    }

    let encoder = builder.into_inner()?;
    encoder.finish()?;
    Ok(output.to_path_buf())
}
