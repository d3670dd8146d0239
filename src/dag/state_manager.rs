// src/dag/state_manager.rs

//! Readiness and state transitions for the nodes of a run.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::catalog::TaskName;
use crate::dag::task_info::{NodeState, ScheduledTask, TaskInfo};

/// Applies state transitions to the task map of a run.
pub struct StateManager<'a> {
    tasks: &'a mut BTreeMap<TaskName, TaskInfo>,
}

impl<'a> StateManager<'a> {
    pub fn new(tasks: &'a mut BTreeMap<TaskName, TaskInfo>) -> Self {
        Self { tasks }
    }

    /// Move every Pending node whose dependencies are all Done forward.
    ///
    /// Aggregators complete on the spot (no executor slot) and their
    /// completion may unblock further nodes, so this repeats until nothing
    /// changes. Leaves are marked Running and returned for dispatch.
    /// Completed aggregators are appended to `done`, in completion order.
    pub fn advance(&mut self, done: &mut Vec<TaskName>) -> Vec<ScheduledTask> {
        let mut ready = Vec::new();

        loop {
            // Decide first, then mutate to avoid borrowing issues.
            let candidates: Vec<TaskName> = {
                let ro = ReadOnlyStateManager::new(self.tasks);
                self.tasks
                    .values()
                    .filter(|info| info.state == NodeState::Pending && ro.deps_satisfied_for_info(info))
                    .map(|info| info.name.clone())
                    .collect()
            };

            if candidates.is_empty() {
                break;
            }

            for name in candidates {
                let Some(info) = self.tasks.get_mut(&name) else {
                    continue;
                };
                match info.action.clone() {
                    None => {
                        debug!(task = %info.name, "aggregator dependencies done; marking Done");
                        info.state = NodeState::Done;
                        done.push(info.name.clone());
                    }
                    Some(action) => {
                        debug!(task = %info.name, "dependencies satisfied; marking Running");
                        info.state = NodeState::Running;
                        ready.push(ScheduledTask {
                            name: info.name.clone(),
                            action,
                        });
                    }
                }
            }
        }

        ready
    }

    /// Record the outcome of a Running node. Returns `false` (and changes
    /// nothing) if the node is unknown or not Running.
    pub fn finish(&mut self, task: &str, success: bool) -> bool {
        match self.tasks.get_mut(task) {
            Some(info) if info.state == NodeState::Running => {
                info.state = if success {
                    NodeState::Done
                } else {
                    NodeState::Failed
                };
                true
            }
            Some(info) => {
                warn!(
                    task = %task,
                    state = ?info.state,
                    "completion for a task that is not running; ignoring"
                );
                false
            }
            None => {
                warn!(task = %task, "completion for unknown task; ignoring");
                false
            }
        }
    }
}

/// A read-only view over the task map.
pub struct ReadOnlyStateManager<'a> {
    tasks: &'a BTreeMap<TaskName, TaskInfo>,
}

impl<'a> ReadOnlyStateManager<'a> {
    pub fn new(tasks: &'a BTreeMap<TaskName, TaskInfo>) -> Self {
        Self { tasks }
    }

    /// A node may start only once every dependency is Done.
    pub fn deps_satisfied_for_info(&self, info: &TaskInfo) -> bool {
        info.deps.iter().all(|dep| match self.tasks.get(dep) {
            Some(d) => d.state == NodeState::Done,
            None => {
                warn!(task = %info.name, dep = %dep, "dependency missing from tasks map");
                false
            }
        })
    }

    pub fn any_running(&self) -> bool {
        self.tasks.values().any(|i| i.state == NodeState::Running)
    }

    pub fn all_done(&self) -> bool {
        self.tasks.values().all(|i| i.state == NodeState::Done)
    }
}
