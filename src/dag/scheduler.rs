use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::catalog::TaskName;
use crate::dag::scheduler_step::SchedulerStep;
use crate::dag::state_manager::{ReadOnlyStateManager, StateManager};
use crate::dag::task_info::{NodeState, RunStatus, ScheduledTask, TaskFailure, TaskInfo};
use crate::engine::TaskOutcome;
use crate::graph::TaskGraph;

/// Scheduler holds the graph of one run plus its mutable state.
///
/// It is responsible for:
/// - deciding when a node is ready (every dependency Done)
/// - completing aggregator nodes without dispatching them
/// - recording leaf outcomes and the completion order
/// - aborting the run on the first failure: nodes already Running may
///   finish, nothing new starts
///
/// It performs no IO; the engine feeds it completions and dispatches what
/// it returns.
#[derive(Debug)]
pub struct Scheduler {
    graph: TaskGraph,
    tasks: BTreeMap<TaskName, TaskInfo>,
    status: RunStatus,
    started: bool,
    completion_log: Vec<TaskName>,
    failures: Vec<TaskFailure>,
    abort_reason: Option<String>,
    /// Set once a step has reported the end of the run.
    end_reported: bool,
}

impl Scheduler {
    pub fn new(graph: TaskGraph) -> Self {
        let tasks = graph
            .nodes()
            .map(|node| (node.name.clone(), TaskInfo::from_node(node)))
            .collect();

        Self {
            graph,
            tasks,
            status: RunStatus::Running,
            started: false,
            completion_log: Vec::new(),
            failures: Vec::new(),
            abort_reason: None,
            end_reported: false,
        }
    }

    pub fn graph(&self) -> &TaskGraph {
        &self.graph
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// The run is over: either everything is Done, or it aborted and no
    /// node is still Running.
    pub fn is_finished(&self) -> bool {
        match self.status {
            RunStatus::Completed => true,
            RunStatus::Aborted => !ReadOnlyStateManager::new(&self.tasks).any_running(),
            RunStatus::Running => false,
        }
    }

    pub fn state_of(&self, task: &str) -> Option<NodeState> {
        self.tasks.get(task).map(|info| info.state)
    }

    /// Whether the dependencies of `task` are all Done. `None` if unknown.
    pub fn deps_satisfied(&self, task: &str) -> Option<bool> {
        let info = self.tasks.get(task)?;
        Some(ReadOnlyStateManager::new(&self.tasks).deps_satisfied_for_info(info))
    }

    /// Names of nodes in the order they reached Done.
    pub fn completion_log(&self) -> &[TaskName] {
        &self.completion_log
    }

    pub fn task_names(&self) -> impl Iterator<Item = &str> {
        self.graph.tasks()
    }

    /// Kick off the run: returns the leaves that are ready immediately.
    /// Calling it more than once has no further effect.
    pub fn start(&mut self) -> SchedulerStep {
        if self.started {
            warn!("scheduler: start called twice; ignoring");
            return SchedulerStep::default();
        }
        self.started = true;
        info!(nodes = self.tasks.len(), "scheduler: starting run");
        self.advance(Vec::new(), None)
    }

    /// Handle completion of a Running leaf (production API).
    pub fn handle_completion(&mut self, task: &str, outcome: TaskOutcome) -> Vec<ScheduledTask> {
        self.step_completion(task, outcome).newly_scheduled
    }

    /// Manual-step variant of `handle_completion` that returns a rich
    /// [`SchedulerStep`].
    pub fn step_completion(&mut self, task: &str, outcome: TaskOutcome) -> SchedulerStep {
        let success = matches!(outcome, TaskOutcome::Success);
        if !StateManager::new(&mut self.tasks).finish(task, success) {
            return SchedulerStep::default();
        }

        match outcome {
            TaskOutcome::Success => {
                debug!(task = %task, "task completed successfully");
                self.advance(vec![task.to_string()], None)
            }
            TaskOutcome::Failed(detail) => {
                warn!(task = %task, "task failed; aborting run");
                self.failures.push(TaskFailure {
                    name: task.to_string(),
                    detail,
                });
                self.mark_aborted(format!("task '{task}' failed"));
                self.advance(Vec::new(), Some(task.to_string()))
            }
        }
    }

    /// Abort without a failing node (e.g. Ctrl-C). Running nodes may still
    /// report back; nothing new is started.
    pub fn abort(&mut self, reason: impl Into<String>) -> SchedulerStep {
        self.mark_aborted(reason.into());
        self.advance(Vec::new(), None)
    }

    /// Snapshot of the run outcome.
    pub fn report(&self) -> RunReport {
        let not_started = self
            .tasks
            .values()
            .filter(|i| i.state == NodeState::Pending)
            .map(|i| i.name.clone())
            .collect();

        // A run that stopped before reaching an end state never succeeded.
        let status = match self.status {
            RunStatus::Running => RunStatus::Aborted,
            other => other,
        };

        RunReport {
            status,
            completed: self.completion_log.clone(),
            failed: self.failures.clone(),
            not_started,
            abort_reason: self.abort_reason.clone(),
        }
    }

    fn mark_aborted(&mut self, reason: String) {
        if self.status == RunStatus::Running {
            info!(reason = %reason, "scheduler: run aborted; no new tasks will start");
            self.status = RunStatus::Aborted;
            self.abort_reason = Some(reason);
        }
    }

    /// Shared tail of every step: complete aggregators, pick up ready
    /// leaves (unless aborted) and detect the end of the run.
    fn advance(&mut self, mut newly_done: Vec<TaskName>, newly_failed: Option<TaskName>) -> SchedulerStep {
        let newly_scheduled = if self.status == RunStatus::Running {
            StateManager::new(&mut self.tasks).advance(&mut newly_done)
        } else {
            Vec::new()
        };

        self.completion_log.extend(newly_done.iter().cloned());

        if self.status == RunStatus::Running && ReadOnlyStateManager::new(&self.tasks).all_done() {
            info!("scheduler: all tasks done; run completed");
            self.status = RunStatus::Completed;
        }

        // Reported exactly once, whichever transition got the run here.
        let run_just_finished = !self.end_reported && self.is_finished();
        self.end_reported |= run_just_finished;

        SchedulerStep {
            newly_scheduled,
            newly_done,
            newly_failed,
            run_just_finished,
        }
    }
}

/// Outcome of a whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub status: RunStatus,
    /// Nodes in the order they reached Done.
    pub completed: Vec<TaskName>,
    pub failed: Vec<TaskFailure>,
    /// Nodes that never started because the run aborted.
    pub not_started: Vec<TaskName>,
    pub abort_reason: Option<String>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.status == RunStatus::Completed
    }

    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() { 0 } else { 1 }
    }
}
