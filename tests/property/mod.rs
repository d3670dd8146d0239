mod graph;
mod scheduler;

use proptest::prelude::*;
use shapebuild::catalog::{RunRequest, rules_for};
use shapebuild::graph::{TaskGraph, build};
use shapebuild::layout::LayoutPresence;
use shapebuild::types::{Area, ProjectType};

/// Targets every project offers, whatever its layout.
pub const TOP_LEVEL: [&str; 7] = ["default", "clean", "compile", "test", "dist", "package", "publish"];

/// A project: its type, which areas exist, and the apps of bundled areas.
pub fn project_strategy() -> impl Strategy<Value = (ProjectType, LayoutPresence)> {
    (
        proptest::sample::select(ProjectType::ALL.to_vec()),
        proptest::sample::subsequence(Area::ALL.to_vec(), 0..=Area::ALL.len()),
        0..3usize,
        0..3usize,
    )
        .prop_map(|(project_type, areas, render_apps, client_apps)| {
            let apps = |n: usize| (0..n).map(|i| format!("app.{i}")).collect::<Vec<_>>();
            let presence = LayoutPresence::from_areas(areas)
                .with_apps(Area::SrcRender, apps(render_apps))
                .with_apps(Area::SrcClient, apps(client_apps));
            (project_type, presence)
        })
}

pub fn request_strategy() -> impl Strategy<Value = Vec<&'static str>> {
    proptest::sample::subsequence(TOP_LEVEL.to_vec(), 0..=3)
}

pub fn build_graph(project_type: ProjectType, presence: &LayoutPresence, targets: &[&str]) -> (RunRequest, TaskGraph) {
    let request: RunRequest = targets.iter().copied().collect();
    let rules = rules_for(project_type, presence, request.implies_clean());
    let graph = build(&rules, &request).expect("top-level targets always build");
    (request, graph)
}
