#![allow(dead_code)]

pub use shapebuild_test_utils::builders;
pub use shapebuild_test_utils::fake_executor;
pub use shapebuild_test_utils::{init_tracing, with_timeout};

use shapebuild::catalog::{RunRequest, rules_for};
use shapebuild::graph::{TaskGraph, build};
use shapebuild::layout::LayoutPresence;
use shapebuild::types::ProjectType;

/// Build the graph for `targets` the way a run would.
pub fn graph_for(project_type: ProjectType, presence: &LayoutPresence, targets: &[&str]) -> TaskGraph {
    let request: RunRequest = targets.iter().copied().collect();
    let rules = rules_for(project_type, presence, request.implies_clean());
    build(&rules, &request).expect("graph builds")
}

/// Sorted node names of a graph.
pub fn names(graph: &TaskGraph) -> Vec<String> {
    graph.tasks().map(str::to_string).collect()
}

pub fn sorted(mut v: Vec<&str>) -> Vec<String> {
    v.sort();
    v.into_iter().map(str::to_string).collect()
}
