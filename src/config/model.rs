// src/config/model.rs

use serde::Deserialize;

use crate::types::{Area, LintSeverity, ProjectType};

/// Project configuration as read from `shapebuild.json`, after it has been
/// deep-merged onto the defaults for its project type:
///
/// ```json
/// {
///   "type": "desktop-shell",
///   "paths": { "src_main": "app/main", "dist": "out" },
///   "lint": { "severity": "warning" },
///   "jobs": 4
/// }
/// ```
///
/// Every section is optional.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawProjectConfig {
    #[serde(rename = "type", default)]
    pub project_type: ProjectType,

    #[serde(default)]
    pub paths: PathsSection,

    #[serde(default)]
    pub lint: LintSection,

    #[serde(default)]
    pub tools: ToolsSection,

    #[serde(default)]
    pub external_config: ExternalConfigSection,

    /// Upper bound on concurrently running leaf actions.
    #[serde(default)]
    pub jobs: Option<usize>,
}

/// Validated project configuration.
///
/// Construct via `ProjectConfig::try_from(raw)`, which runs
/// `config::validate`. Immutable for the rest of the run.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    pub project_type: ProjectType,
    pub paths: PathsSection,
    pub lint: LintSection,
    pub tools: ToolsSection,
    pub external_config: ExternalConfigSection,
    pub jobs: Option<usize>,
}

impl ProjectConfig {
    pub(crate) fn new_unchecked(raw: RawProjectConfig) -> Self {
        Self {
            project_type: raw.project_type,
            paths: raw.paths,
            lint: raw.lint,
            tools: raw.tools,
            external_config: raw.external_config,
            jobs: raw.jobs,
        }
    }

    /// Relative directory of an area.
    pub fn area_path(&self, area: Area) -> &str {
        let p = &self.paths;
        match area {
            Area::Src => &p.src,
            Area::SrcMain => &p.src_main,
            Area::SrcRender => &p.src_render,
            Area::SrcClient => &p.src_client,
            Area::SrcServer => &p.src_server,
            Area::Test => &p.test,
            Area::Types => &p.types,
        }
    }

    /// Areas worth probing on disk for this project type.
    pub fn relevant_areas(&self) -> Vec<Area> {
        let mut areas = Area::source_areas(self.project_type).to_vec();
        areas.push(Area::Test);
        areas.push(Area::Types);
        areas
    }
}

/// `"paths"` section: logical area name to directory, relative to the work dir.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsSection {
    pub dist: String,
    pub package: String,
    pub src: String,
    pub src_main: String,
    pub src_render: String,
    pub src_client: String,
    pub src_server: String,
    pub test: String,
    pub types: String,
    /// Directory archived next to the dist archive by `package:archive`.
    pub config_bundle: String,
}

impl Default for PathsSection {
    fn default() -> Self {
        Self {
            dist: ".dist".to_string(),
            package: ".package".to_string(),
            src: "src".to_string(),
            src_main: "src.main".to_string(),
            src_render: "src.render".to_string(),
            src_client: "src.client".to_string(),
            src_server: "src.server".to_string(),
            test: "test".to_string(),
            types: "types".to_string(),
            config_bundle: "config/project.properties".to_string(),
        }
    }
}

impl PathsSection {
    /// Every configured path with its key, for validation and dry-run output.
    pub fn entries(&self) -> [(&'static str, &str); 10] {
        [
            ("dist", &self.dist),
            ("package", &self.package),
            ("src", &self.src),
            ("src_main", &self.src_main),
            ("src_render", &self.src_render),
            ("src_client", &self.src_client),
            ("src_server", &self.src_server),
            ("test", &self.test),
            ("types", &self.types),
            ("config_bundle", &self.config_bundle),
        ]
    }
}

/// `"lint"` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LintSection {
    /// Violations at or above this severity fail the lint node.
    pub severity: LintSeverity,
    /// Formatter name passed to the linter. The violation parser expects the
    /// `verbose` format.
    pub formatter: String,
}

impl Default for LintSection {
    fn default() -> Self {
        Self {
            severity: LintSeverity::Error,
            formatter: "verbose".to_string(),
        }
    }
}

/// `"tools"` section: command names of the external collaborators.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToolsSection {
    pub linter: String,
    pub compiler: String,
    pub bundler: String,
    pub test_runner: String,
    pub package_manager: String,
}

impl Default for ToolsSection {
    fn default() -> Self {
        Self {
            linter: "tslint".to_string(),
            compiler: "tsc".to_string(),
            bundler: "webpack".to_string(),
            test_runner: "mocha".to_string(),
            package_manager: "npm".to_string(),
        }
    }
}

/// `"external_config"` section: recompute the package version from a
/// properties-based project configuration directory.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ExternalConfigSection {
    pub enabled: bool,
    /// Defaults to `config` under the work dir.
    pub dir: Option<String>,
}
