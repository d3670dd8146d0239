// src/layout/mod.rs

//! Project layout resolution.
//!
//! Probes the work dir once per run to find which areas exist for the
//! declared project type, and which bundled sub-applications (`app.*`
//! directories) each bundled area contains. The result is read-only for
//! the rest of the run. Absence of any directory is a valid outcome.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::ProjectConfig;
use crate::fs::FileSystem;
use crate::types::{Area, ProjectType};

/// Directory-name prefix marking a bundled sub-application.
pub const APP_DIR_PREFIX: &str = "app.";

/// Which areas exist on disk, plus the sub-applications of bundled areas.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutPresence {
    present: BTreeSet<Area>,
    apps: BTreeMap<Area, Vec<String>>,
    dist: bool,
    package: bool,
}

impl LayoutPresence {
    /// Presence built by hand, for tests and callers that already know the
    /// layout.
    pub fn from_areas(areas: impl IntoIterator<Item = Area>) -> Self {
        Self {
            present: areas.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Attach discovered sub-applications to a bundled area.
    pub fn with_apps(mut self, area: Area, apps: Vec<String>) -> Self {
        self.apps.insert(area, apps);
        self
    }

    pub fn has(&self, area: Area) -> bool {
        self.present.contains(&area)
    }

    pub fn areas(&self) -> impl Iterator<Item = Area> + '_ {
        self.present.iter().copied()
    }

    /// Present source areas for the given project type, in catalog order.
    pub fn source_areas(&self, project_type: ProjectType) -> Vec<Area> {
        Area::source_areas(project_type)
            .iter()
            .copied()
            .filter(|a| self.has(*a))
            .collect()
    }

    pub fn has_source(&self, project_type: ProjectType) -> bool {
        !self.source_areas(project_type).is_empty()
    }

    /// Sub-application directory names of a bundled area, sorted.
    pub fn apps_of(&self, area: Area) -> &[String] {
        self.apps.get(&area).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn dist_exists(&self) -> bool {
        self.dist
    }

    pub fn package_exists(&self) -> bool {
        self.package
    }
}

/// Resolve the layout of `work_dir` for `config`.
pub fn resolve(config: &ProjectConfig, work_dir: &Path, fs: &dyn FileSystem) -> LayoutPresence {
    let mut presence = LayoutPresence::default();

    for area in config.relevant_areas() {
        let dir = work_dir.join(config.area_path(area));
        let exists = fs.is_dir(&dir);
        debug!(area = %area, path = %dir.display(), exists, "probed area");
        if !exists {
            continue;
        }
        presence.present.insert(area);

        if area.is_bundled() {
            let apps = discover_apps(fs, &dir);
            debug!(area = %area, ?apps, "discovered bundled sub-applications");
            presence.apps.insert(area, apps);
        }
    }

    presence.dist = fs.is_dir(&work_dir.join(&config.paths.dist));
    presence.package = fs.is_dir(&work_dir.join(&config.paths.package));
    presence
}

/// Sub-directories of `dir` whose name starts with [`APP_DIR_PREFIX`].
pub fn discover_apps(fs: &dyn FileSystem, dir: &Path) -> Vec<String> {
    let subdirs: Vec<PathBuf> = match fs.subdirs(dir) {
        Ok(subdirs) => subdirs,
        Err(e) => {
            warn!(path = %dir.display(), error = %e, "could not list bundled area");
            return Vec::new();
        }
    };

    let mut apps: Vec<String> = subdirs
        .into_iter()
        .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(str::to_string))
        .filter(|name| name.starts_with(APP_DIR_PREFIX))
        .collect();
    apps.sort();
    apps
}
