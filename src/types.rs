use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// The declared shape of a project.
///
/// - `Generic`: a single `src` area (a library or plain package).
/// - `DesktopShell`: a main process area plus a bundled renderer area.
/// - `WebClientServer`: a bundled client area plus a server area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    #[serde(alias = "default")]
    Generic,
    #[serde(alias = "electron")]
    DesktopShell,
    #[serde(alias = "webapp")]
    WebClientServer,
}

impl Default for ProjectType {
    fn default() -> Self {
        ProjectType::Generic
    }
}

impl ProjectType {
    pub const ALL: [ProjectType; 3] = [
        ProjectType::Generic,
        ProjectType::DesktopShell,
        ProjectType::WebClientServer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Generic => "generic",
            ProjectType::DesktopShell => "desktop-shell",
            ProjectType::WebClientServer => "web-client-server",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "generic" | "default" => Ok(ProjectType::Generic),
            "desktop-shell" | "electron" => Ok(ProjectType::DesktopShell),
            "web-client-server" | "webapp" => Ok(ProjectType::WebClientServer),
            other => Err(format!(
                "invalid project type: {other} (expected \"generic\", \"desktop-shell\" or \"web-client-server\")"
            )),
        }
    }
}

/// Lowest lint severity that fails a lint node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LintSeverity {
    #[serde(alias = "warn")]
    Warning,
    Error,
}

impl Default for LintSeverity {
    fn default() -> Self {
        LintSeverity::Error
    }
}

impl fmt::Display for LintSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintSeverity::Warning => f.write_str("warning"),
            LintSeverity::Error => f.write_str("error"),
        }
    }
}

impl FromStr for LintSeverity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "warning" | "warn" => Ok(LintSeverity::Warning),
            "error" => Ok(LintSeverity::Error),
            other => Err(format!("invalid lint severity: {other}")),
        }
    }
}

/// Build mode derived from `BUILD_TARGET`.
///
/// Unset means production. Sourcemaps are only produced outside production;
/// bundles are only minimised in production.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    Production,
    Development,
}

impl BuildMode {
    pub fn from_build_target(value: Option<&str>) -> Self {
        match value {
            None | Some("production") => BuildMode::Production,
            Some(_) => BuildMode::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, BuildMode::Production)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildMode::Production => "production",
            BuildMode::Development => "development",
        }
    }
}

/// A logical source region of the project, mapped to a directory by
/// `paths.*` in the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Area {
    Src,
    SrcMain,
    SrcRender,
    SrcClient,
    SrcServer,
    Test,
    Types,
}

impl Area {
    pub const ALL: [Area; 7] = [
        Area::Src,
        Area::SrcMain,
        Area::SrcRender,
        Area::SrcClient,
        Area::SrcServer,
        Area::Test,
        Area::Types,
    ];

    /// Identifier used inside target names (`compile:<id>:lint`).
    pub fn id(&self) -> &'static str {
        match self {
            Area::Src => "src",
            Area::SrcMain => "src:main",
            Area::SrcRender => "src:render",
            Area::SrcClient => "src:client",
            Area::SrcServer => "src:server",
            Area::Test => "test",
            Area::Types => "types",
        }
    }

    /// Source areas that exist for a given project type, in catalog order.
    pub fn source_areas(project_type: ProjectType) -> &'static [Area] {
        match project_type {
            ProjectType::Generic => &[Area::Src],
            ProjectType::DesktopShell => &[Area::SrcMain, Area::SrcRender],
            ProjectType::WebClientServer => &[Area::SrcClient, Area::SrcServer],
        }
    }

    /// Areas whose compiled output is additionally run through the bundler,
    /// once per `app.*` sub-application.
    pub fn is_bundled(&self) -> bool {
        matches!(self, Area::SrcRender | Area::SrcClient)
    }

    pub fn is_source(&self) -> bool {
        !matches!(self, Area::Test | Area::Types)
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
