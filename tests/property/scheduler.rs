use std::collections::HashSet;

use proptest::prelude::*;
use shapebuild::dag::{RunStatus, Scheduler};
use shapebuild::engine::{CoreCommand, CoreRuntime, CoreStep, RuntimeEvent, TaskOutcome};
use shapebuild::graph::TaskGraph;

use super::{build_graph, project_strategy, request_strategy};

fn dispatched(step: &CoreStep) -> Vec<String> {
    step.commands
        .iter()
        .flat_map(|c| match c {
            CoreCommand::DispatchTasks(tasks) => tasks.iter().map(|t| t.name.clone()).collect(),
            CoreCommand::Finish => Vec::new(),
        })
        .collect()
}

fn deps_completed(core: &CoreRuntime, graph: &TaskGraph, tasks: &[String]) -> Result<(), TestCaseError> {
    for task in tasks {
        for dep in graph.dependencies_of(task) {
            prop_assert!(
                core.scheduler().completion_log().contains(dep),
                "{} ran before {}",
                task,
                dep
            );
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn any_completion_order_respects_dependencies_and_ends_once(
        (project_type, presence) in project_strategy(),
        targets in request_strategy(),
        picks in proptest::collection::vec(any::<prop::sample::Index>(), 64),
        fail_at in proptest::option::of(0..16usize),
    ) {
        let (_, graph) = build_graph(project_type, &presence, &targets);
        let mut core = CoreRuntime::new(Scheduler::new(graph.clone()));

        let start = core.start();
        let mut running = dispatched(&start);
        deps_completed(&core, &graph, &running)?;
        let mut end_steps = usize::from(!start.keep_running);
        if !start.keep_running {
            prop_assert!(running.is_empty());
        }

        let mut completions = 0usize;
        let mut failed = false;
        let mut picks = picks.into_iter().cycle();

        while let Some(pick) = picks.next() {
            if running.is_empty() {
                break;
            }
            prop_assert_eq!(end_steps, 0, "a task reported after the run ended");

            let task = running.swap_remove(pick.index(running.len()));
            let outcome = if fail_at == Some(completions) {
                failed = true;
                TaskOutcome::Failed("boom".into())
            } else {
                TaskOutcome::Success
            };
            completions += 1;

            let step = core.step(RuntimeEvent::TaskCompleted { task, outcome });
            let next = dispatched(&step);
            if failed {
                prop_assert!(next.is_empty(), "{:?} started after a failure", next);
            }
            deps_completed(&core, &graph, &next)?;
            running.extend(next);

            if !step.keep_running {
                end_steps += 1;
                prop_assert!(step.commands.contains(&CoreCommand::Finish));
                prop_assert!(running.is_empty(), "run ended with {:?} still running", running);
            }
        }

        // The shell stops on exactly one step, and only once nothing runs.
        prop_assert_eq!(end_steps, 1);
        prop_assert!(core.is_finished());

        // Every node appears after its dependencies in the completion log.
        let mut seen = HashSet::new();
        for name in core.scheduler().completion_log() {
            for dep in graph.dependencies_of(name) {
                prop_assert!(seen.contains(dep), "{} completed before {}", name, dep);
            }
            seen.insert(name.clone());
        }

        let report = core.report();
        if failed {
            prop_assert_eq!(report.status, RunStatus::Aborted);
            prop_assert_eq!(report.failed.len(), 1);
            prop_assert_eq!(report.exit_code(), 1);
        } else {
            prop_assert_eq!(report.status, RunStatus::Completed);
            prop_assert_eq!(report.completed.len(), graph.len());
            prop_assert!(report.not_started.is_empty());
            prop_assert_eq!(report.exit_code(), 0);
        }
    }
}
