// src/catalog/target.rs

//! Typed target identifiers and the leaf actions attached to them.

use std::fmt;

use crate::types::Area;

/// Canonical task name type used by the graph, scheduler and runtime.
///
/// It is always the rendered form of a [`TargetId`].
pub type TaskName = String;

/// Identity of a target. Rendering it with `Display` gives the user-facing
/// name (`compile:src:render:app.one:webpack`), so two distinct ids can
/// never collide through string formatting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TargetId {
    Default,
    Clean,
    CleanArea(Area),
    CleanDist,
    Compile,
    /// `compile:<area>`: lint + compile (+ bundle) of one area.
    CompileArea(Area),
    Lint(Area),
    Ts(Area),
    /// Aggregates every per-app bundle of a bundled area.
    Webpack(Area),
    WebpackApp(Area, String),
    /// `compile:src` over both source areas of a two-area project type.
    SrcGroup,
    SrcLintGroup,
    SrcTsGroup,
    Test,
    Dist,
    Package,
    PackageInstall,
    PackageArchive,
    Publish,
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetId::Default => f.write_str("default"),
            TargetId::Clean => f.write_str("clean"),
            TargetId::CleanArea(area) => write!(f, "clean:{area}"),
            TargetId::CleanDist => f.write_str("clean:dist"),
            TargetId::Compile => f.write_str("compile"),
            TargetId::CompileArea(area) => write!(f, "compile:{area}"),
            TargetId::Lint(area) => write!(f, "compile:{area}:lint"),
            TargetId::Ts(area) => write!(f, "compile:{area}:ts"),
            TargetId::Webpack(area) => write!(f, "compile:{area}:webpack"),
            TargetId::WebpackApp(area, app) => write!(f, "compile:{area}:{app}:webpack"),
            TargetId::SrcGroup => f.write_str("compile:src"),
            TargetId::SrcLintGroup => f.write_str("compile:src:lint"),
            TargetId::SrcTsGroup => f.write_str("compile:src:ts"),
            TargetId::Test => f.write_str("test"),
            TargetId::Dist => f.write_str("dist"),
            TargetId::Package => f.write_str("package"),
            TargetId::PackageInstall => f.write_str("package:install"),
            TargetId::PackageArchive => f.write_str("package:archive"),
            TargetId::Publish => f.write_str("publish"),
        }
    }
}

impl TargetId {
    pub fn name(&self) -> TaskName {
        self.to_string()
    }
}

/// The unit of work a leaf node performs. Aggregator nodes carry none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    CleanArea(Area),
    CleanDist,
    Lint(Area),
    Compile(Area),
    Bundle { area: Area, app: String },
    RunTests,
    Dist,
    PackageInstall,
    PackageArchive,
    Publish,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::CleanArea(area) => write!(f, "clean generated files in {area}"),
            Action::CleanDist => f.write_str("remove dist output"),
            Action::Lint(area) => write!(f, "lint {area}"),
            Action::Compile(area) => write!(f, "compile {area}"),
            Action::Bundle { area, app } => write!(f, "bundle {area}/{app}"),
            Action::RunTests => f.write_str("run tests"),
            Action::Dist => f.write_str("assemble dist"),
            Action::PackageInstall => f.write_str("install production dependencies"),
            Action::PackageArchive => f.write_str("archive dist and config bundle"),
            Action::Publish => f.write_str("publish dist"),
        }
    }
}

/// One catalog entry: a target, its direct dependencies, and its action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub id: TargetId,
    pub depends_on: Vec<TargetId>,
    pub action: Option<Action>,
}

impl Rule {
    pub fn aggregate(id: TargetId, depends_on: Vec<TargetId>) -> Self {
        Self {
            id,
            depends_on,
            action: None,
        }
    }

    pub fn leaf(id: TargetId, depends_on: Vec<TargetId>, action: Action) -> Self {
        Self {
            id,
            depends_on,
            action: Some(action),
        }
    }

    pub fn name(&self) -> TaskName {
        self.id.name()
    }
}
