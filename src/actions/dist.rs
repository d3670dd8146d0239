// src/actions/dist.rs

//! `dist`: assemble the distributable package directory.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::actions::env::SITE_VAR;
use crate::actions::provenance::{self, Provenance};
use crate::actions::{ActionContext, BuildEnv};
use crate::errors::{ActionError, ActionResult};
use crate::fs::{FileMatcher, matching_files};
use crate::types::{Area, ProjectType};

/// Package metadata fields that only matter for development.
pub const DEV_ONLY_FIELDS: [&str; 5] = ["devDependencies", "private", "scripts", "types", "typings"];

pub fn assemble(ctx: &ActionContext) -> ActionResult {
    let manifest_path = ctx.work_dir().join("package.json");
    let raw = fs::read_to_string(&manifest_path).map_err(|err| {
        ActionError::Other(anyhow::anyhow!("reading {}: {err}", manifest_path.display()))
    })?;
    let pkg = match serde_json::from_str::<Value>(&raw)? {
        Value::Object(map) => map,
        _ => {
            return Err(ActionError::Other(anyhow::anyhow!(
                "{} is not a JSON object",
                manifest_path.display()
            )));
        }
    };

    let manifest = manifest(ctx, pkg)?;
    let dist = ctx.dist_dir();
    fs::create_dir_all(&dist)?;
    write_tab_indented(&dist.join("package.json"), &Value::Object(manifest))?;

    copy_root_configs(ctx.work_dir(), &dist)?;
    copy_tree(&ctx.work_dir().join("res"), &dist.join("res"), &["**"], &[])?;
    copy_npmrc(ctx.work_dir(), &dist)?;

    let source_areas = ctx.presence.source_areas(ctx.config.project_type);
    let two_areas = ctx.config.project_type != ProjectType::Generic;
    for area in source_areas {
        let lib = if two_areas {
            dist.join("lib").join(ctx.config.area_path(area))
        } else {
            dist.join("lib")
        };
        let exclude: &[&str] = if area.is_bundled() { &["*-webpack.js"] } else { &[] };
        copy_tree(&ctx.area_dir(area), &lib, &["**/*.js", "**/*.d.ts"], exclude)?;
    }

    if ctx.presence.has(Area::Types) {
        copy_tree(&ctx.area_dir(Area::Types), &dist.join("types"), &["**/*.d.ts"], &[])?;
    }

    info!(dist = %dist.display(), "dist assembled");
    Ok(())
}

/// Turn the project's package metadata into the dist manifest: strip
/// development fields, apply the external version and provenance, pin
/// floating dependencies and point `main`/`types` at the compiled output.
pub fn manifest(ctx: &ActionContext, mut pkg: Map<String, Value>) -> Result<Map<String, Value>, ActionError> {
    for field in DEV_ONLY_FIELDS {
        pkg.shift_remove(field);
    }

    if ctx.config.external_config.enabled {
        let dir = match &ctx.config.external_config.dir {
            Some(dir) => ctx.work_dir().join(dir),
            None => ctx.work_dir().join("config"),
        };
        info!(dir = %dir.display(), "using external project configuration");
        let version = external_version(&dir, &ctx.env)?;
        pkg.insert("version".into(), version.into());
    } else {
        debug!("external project configuration is not used");
    }

    let provenance = Provenance::detect(&ctx.env, Local::now());
    provenance::log_detected(&provenance);
    provenance.apply(&mut pkg)?;

    pin_floating_dependencies(ctx.work_dir(), &mut pkg)?;

    let p = &ctx.config.paths;
    match ctx.config.project_type {
        ProjectType::Generic if ctx.presence.has(Area::Src) => {
            pkg.insert("main".into(), "./lib/index.js".into());
            pkg.insert("types".into(), "./lib/index.d.ts".into());
        }
        ProjectType::DesktopShell if ctx.presence.has(Area::SrcMain) => {
            pkg.insert("main".into(), format!("./lib/{}/index.js", p.src_main).into());
            pkg.insert("types".into(), format!("./lib/{}/index.d.ts", p.src_main).into());
        }
        ProjectType::WebClientServer if ctx.presence.has(Area::SrcServer) => {
            pkg.insert("main".into(), format!("./lib/{}/index.js", p.src_server).into());
            pkg.insert("types".into(), format!("./lib/{}/index.d.ts", p.src_server).into());
        }
        _ if ctx.presence.has(Area::Types) => {
            pkg.insert("types".into(), "./types/index.d.ts".into());
        }
        _ => {}
    }

    Ok(pkg)
}

/// Replace `""` and `"*"` dependency versions by `^<installed version>`.
fn pin_floating_dependencies(work_dir: &Path, pkg: &mut Map<String, Value>) -> ActionResult {
    let Some(Value::Object(deps)) = pkg.get_mut("dependencies") else {
        return Ok(());
    };

    for (name, version) in deps.iter_mut() {
        let floating = matches!(version.as_str(), Some("") | Some("*"));
        if !floating {
            continue;
        }
        let installed = work_dir.join("node_modules").join(name).join("package.json");
        let installed_version = fs::read_to_string(&installed)
            .ok()
            .and_then(|raw| serde_json::from_str::<Value>(&raw).ok())
            .and_then(|v| v.get("version").and_then(Value::as_str).map(str::to_string))
            .ok_or_else(|| ActionError::MissingDependency(name.clone()))?;
        let pinned = format!("^{installed_version}");
        info!(dependency = %name, version = %pinned, "pinned floating dependency version");
        *version = Value::String(pinned);
    }
    Ok(())
}

/// `major.minor.build` from the properties of an external configuration
/// directory.
///
/// Reads `<dir>/project.properties` (a file, or every `*.properties` file
/// in it when it is a directory), then `<dir>/<SITE>.properties` on top
/// when `SITE` is set.
pub fn external_version(dir: &Path, env: &BuildEnv) -> Result<String, ActionError> {
    let mut props = BTreeMap::new();

    let base = dir.join("project.properties");
    if base.is_dir() {
        let matcher = FileMatcher::new(&["*.properties"], &[])?;
        for file in matching_files(&base, &matcher)? {
            props.extend(parse_properties(&fs::read_to_string(&file)?));
        }
    } else {
        props.extend(parse_properties(&fs::read_to_string(&base)?));
    }

    if let Some(site) = env.get(SITE_VAR) {
        let site_file = dir.join(format!("{site}.properties"));
        if site_file.is_file() {
            props.extend(parse_properties(&fs::read_to_string(&site_file)?));
        }
    }

    let int = |key: &str| -> Result<u64, ActionError> {
        props
            .get(key)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .ok_or_else(|| ActionError::Other(anyhow::anyhow!("{key} is missing or not an integer in {}", dir.display())))
    };

    Ok(format!("{}.{}.{}", int("version.major")?, int("version.minor")?, int("version.build")?))
}

/// Minimal `.properties` reader: `key=value` or `key: value` lines; `#`
/// and `!` start comments.
pub fn parse_properties(source: &str) -> BTreeMap<String, String> {
    source
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#') && !l.starts_with('!'))
        .filter_map(|l| {
            let idx = l.find(['=', ':'])?;
            Some((l[..idx].trim().to_string(), l[idx + 1..].trim().to_string()))
        })
        .collect()
}

fn write_tab_indented(path: &Path, value: &Value) -> ActionResult {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    fs::write(path, buf)?;
    Ok(())
}

/// Copy `*.config*` files at the top of the work dir.
fn copy_root_configs(work_dir: &Path, dist: &Path) -> ActionResult {
    let matcher = FileMatcher::new(&["*.config*"], &[])?;
    for entry in fs::read_dir(work_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if path.is_file() && matcher.is_match(name) {
            fs::copy(&path, dist.join(name))?;
        }
    }
    Ok(())
}

/// Copy `.npmrc`, forcing lock files on for the installed package.
fn copy_npmrc(work_dir: &Path, dist: &Path) -> ActionResult {
    let src = work_dir.join(".npmrc");
    if !src.is_file() {
        return Ok(());
    }
    let content = fs::read_to_string(&src)?;
    fs::write(dist.join(".npmrc"), content.replace("package-lock=false", "package-lock=true"))?;
    Ok(())
}

/// Copy the files under `src` selected by the globs into `dest`, keeping
/// their relative paths. Returns the copied destinations.
fn copy_tree(src: &Path, dest: &Path, include: &[&str], exclude: &[&str]) -> Result<Vec<PathBuf>, ActionError> {
    let matcher = FileMatcher::new(include, exclude)?;
    let mut copied = Vec::new();
    for file in matching_files(src, &matcher)? {
        let Ok(rel) = file.strip_prefix(src) else {
            continue;
        };
        let target = dest.join(rel);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(&file, &target)?;
        copied.push(target);
    }
    debug!(from = %src.display(), to = %dest.display(), files = copied.len(), "copied");
    Ok(copied)
}
