// src/lib.rs

pub mod actions;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod graph;
pub mod layout;
pub mod logging;
pub mod types;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::actions::{ActionContext, BuildEnv};
use crate::catalog::{RunRequest, rules_for};
use crate::cli::CliArgs;
use crate::config::ProjectConfig;
use crate::config::loader::load_and_validate;
use crate::dag::{RunReport, Scheduler};
use crate::engine::{CoreRuntime, Runtime, RuntimeEvent};
use crate::exec::{ExecutorBackend, RealExecutorBackend};
use crate::fs::{FileSystem, RealFileSystem};
use crate::graph::TaskGraph;
use crate::layout::LayoutPresence;

/// Everything decided before any node runs.
#[derive(Debug, Clone)]
pub struct BuildPlan {
    pub config: ProjectConfig,
    pub presence: LayoutPresence,
    pub request: RunRequest,
    pub graph: TaskGraph,
}

/// How an invocation ended.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// `--dry-run`: the graph was printed, nothing ran.
    DryRun,
    Finished(RunReport),
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::DryRun => 0,
            Outcome::Finished(report) => report.exit_code(),
        }
    }
}

/// Resolve the layout and build the graph of a request.
///
/// Fails on an unknown target or a malformed rule set; nothing runs.
pub fn plan(
    config: ProjectConfig,
    work_dir: &Path,
    fs: &dyn FileSystem,
    request: RunRequest,
) -> errors::Result<BuildPlan> {
    let presence = layout::resolve(&config, work_dir, fs);
    let rules = rules_for(config.project_type, &presence, request.implies_clean());
    let graph = graph::build(&rules, &request)?;
    debug!(nodes = graph.len(), "task graph built");
    Ok(BuildPlan {
        config,
        presence,
        request,
        graph,
    })
}

/// Drive a graph to its end with the given executor.
///
/// `event_rx` must be the receiving side of the channel the executor
/// reports completions on.
pub async fn execute_graph<E: ExecutorBackend>(
    graph: TaskGraph,
    executor: E,
    event_rx: mpsc::Receiver<RuntimeEvent>,
) -> errors::Result<RunReport> {
    let core = CoreRuntime::new(Scheduler::new(graph));
    Runtime::new(core, event_rx, executor).run().await
}

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and layout resolution
/// - the catalog and graph builder
/// - scheduler / runtime / executor
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<Outcome> {
    let work_dir = match &args.work_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("resolving the current directory")?,
    };
    let config_path = resolve_config_path(&work_dir, &args.config);
    let config = load_and_validate(&config_path)?;

    let plan = plan(config, &work_dir, &RealFileSystem, args.run_request())?;
    info!(
        project_type = %plan.config.project_type,
        targets = ?plan.request.targets(),
        nodes = plan.graph.len(),
        "planned run"
    );

    if args.dry_run {
        print_dry_run(&plan, &work_dir);
        return Ok(Outcome::DryRun);
    }

    let jobs = args
        .jobs
        .or(plan.config.jobs)
        .unwrap_or_else(|| std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1));

    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);
    let ctx = Arc::new(ActionContext::new(
        work_dir,
        plan.config,
        plan.presence,
        BuildEnv::from_process(),
    ));
    let executor = RealExecutorBackend::new(rt_tx.clone(), ctx, jobs);

    // Ctrl-C → abort like a failure; running actions finish.
    {
        let tx = rt_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
        });
    }
    drop(rt_tx);

    let report = execute_graph(plan.graph, executor, rt_rx).await?;
    log_report(&report);
    Ok(Outcome::Finished(report))
}

fn resolve_config_path(work_dir: &Path, config: &Path) -> PathBuf {
    if config.is_absolute() {
        config.to_path_buf()
    } else {
        work_dir.join(config)
    }
}

fn log_report(report: &RunReport) {
    for failure in &report.failed {
        error!(task = %failure.name, "failed: {}", failure.detail);
    }
    if !report.not_started.is_empty() {
        warn!(tasks = ?report.not_started, "not started because the run aborted");
    }
    if report.is_success() {
        info!(completed = report.completed.len(), "build succeeded");
    } else {
        error!(
            completed = report.completed.len(),
            reason = report.abort_reason.as_deref().unwrap_or("unknown"),
            "build failed"
        );
    }
}

fn presence_word(exists: bool) -> &'static str {
    if exists { "present" } else { "absent" }
}

/// Dry-run output: layout, then every node with its dependencies and action.
fn print_dry_run(plan: &BuildPlan, work_dir: &Path) {
    println!("shapebuild dry-run");
    println!("  work_dir = {}", work_dir.display());
    println!("  type = {}", plan.config.project_type);
    let areas: Vec<String> = plan.presence.areas().map(|a| a.to_string()).collect();
    println!("  present areas = [{}]", areas.join(", "));
    println!(
        "  outputs = dist: {}, package: {}",
        presence_word(plan.presence.dist_exists()),
        presence_word(plan.presence.package_exists())
    );
    println!("  targets = [{}]", plan.request.targets().join(", "));
    println!();

    println!("tasks ({}):", plan.graph.len());
    for node in plan.graph.nodes() {
        println!("  - {}", node.name);
        if !node.deps.is_empty() {
            println!("      after: [{}]", node.deps.join(", "));
        }
        match &node.action {
            Some(action) => println!("      action: {action}"),
            None => println!("      action: (aggregate)"),
        }
    }

    debug!("dry-run complete (no execution)");
}
