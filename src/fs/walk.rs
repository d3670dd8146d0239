// src/fs/walk.rs

//! Glob-filtered recursive file listing on the real disk, used by the
//! actions that operate on generated or compiled files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

/// Include/exclude glob sets matched against `/`-separated paths relative
/// to a root. `*` never crosses a directory boundary; use `**` for that.
#[derive(Debug, Clone)]
pub struct FileMatcher {
    include: GlobSet,
    exclude: Option<GlobSet>,
}

impl FileMatcher {
    pub fn new(include: &[&str], exclude: &[&str]) -> Result<Self> {
        let include = build_globset(include)?;
        let exclude = if exclude.is_empty() {
            None
        } else {
            Some(build_globset(exclude)?)
        };
        Ok(Self { include, exclude })
    }

    /// Whether a relative path is selected.
    pub fn is_match(&self, rel: &str) -> bool {
        if !self.include.is_match(rel) {
            return false;
        }
        match &self.exclude {
            Some(ex) => !ex.is_match(rel),
            None => true,
        }
    }
}

/// Every file under `root` selected by `matcher`, sorted. A missing root
/// yields no files.
pub fn matching_files(root: &Path, matcher: &FileMatcher) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.with_context(|| format!("walking {:?}", root))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if let Ok(rel) = path.strip_prefix(root) {
            let rel_str = rel.to_string_lossy().replace('\\', "/");
            if matcher.is_match(&rel_str) {
                files.push(path.to_path_buf());
            }
        }
    }

    files.sort();
    Ok(files)
}

fn build_globset(patterns: &[&str]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = GlobBuilder::new(pat)
            .literal_separator(true)
            .build()
            .with_context(|| format!("invalid glob pattern: {pat}"))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}
