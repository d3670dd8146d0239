// src/actions/mod.rs

//! Leaf actions: the units of work behind every non-aggregator node.
//!
//! Each action reads the shared [`ActionContext`] and returns an
//! [`ActionResult`]; none of them decide anything about the run as a whole.
//! Actions touching many files run on the blocking pool, the rest await
//! external tools.

pub mod bundle;
pub mod clean;
pub mod compile;
pub mod dist;
pub mod env;
pub mod lint;
pub mod package;
pub mod provenance;
pub mod publish;
pub mod templates;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::catalog::Action;
use crate::config::ProjectConfig;
use crate::errors::{ActionError, ActionResult};
use crate::layout::LayoutPresence;
use crate::types::{Area, BuildMode};

pub use env::BuildEnv;

/// Everything a leaf action may read. Built once per run and shared
/// read-only between all workers.
#[derive(Debug, Clone)]
pub struct ActionContext {
    pub work_dir: PathBuf,
    pub config: ProjectConfig,
    pub presence: LayoutPresence,
    pub env: BuildEnv,
}

impl ActionContext {
    pub fn new(work_dir: impl Into<PathBuf>, config: ProjectConfig, presence: LayoutPresence, env: BuildEnv) -> Self {
        Self {
            work_dir: work_dir.into(),
            config,
            presence,
            env,
        }
    }

    pub fn area_dir(&self, area: Area) -> PathBuf {
        self.work_dir.join(self.config.area_path(area))
    }

    pub fn dist_dir(&self) -> PathBuf {
        self.work_dir.join(&self.config.paths.dist)
    }

    pub fn package_dir(&self) -> PathBuf {
        self.work_dir.join(&self.config.paths.package)
    }

    pub fn build_mode(&self) -> BuildMode {
        self.env.build_mode()
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }
}

/// Run one leaf action to completion.
pub async fn execute(ctx: &Arc<ActionContext>, action: &Action) -> ActionResult {
    match action {
        Action::CleanArea(area) => {
            let area = *area;
            blocking(ctx, move |ctx| clean::clean_area(ctx, area)).await
        }
        Action::CleanDist => blocking(ctx, clean::clean_dist).await,
        Action::Lint(area) => lint::lint_area(ctx, *area).await,
        Action::Compile(area) => compile::compile_area(ctx, *area).await,
        Action::Bundle { area, app } => bundle::bundle_app(ctx, *area, app).await,
        Action::RunTests => test::run_tests(ctx).await,
        Action::Dist => blocking(ctx, dist::assemble).await,
        Action::PackageInstall => package::install(ctx).await,
        Action::PackageArchive => blocking(ctx, package::archive).await,
        Action::Publish => publish::publish(ctx).await,
    }
}

async fn blocking<F>(ctx: &Arc<ActionContext>, f: F) -> ActionResult
where
    F: FnOnce(&ActionContext) -> ActionResult + Send + 'static,
{
    let ctx = Arc::clone(ctx);
    tokio::task::spawn_blocking(move || f(&ctx))
        .await
        .map_err(|err| ActionError::Other(err.into()))?
}
