// src/dag/task_info.rs

//! Per-node state for a single run.

use crate::catalog::{Action, TaskName};
use crate::graph::TaskNode;

/// State of one node. `Done` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// Waiting for dependencies (or never started because the run aborted).
    Pending,
    /// Dispatched to the executor.
    Running,
    Done,
    Failed,
}

/// Global state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Running,
    Completed,
    Aborted,
}

/// Static node information plus its current state.
#[derive(Debug, Clone)]
pub struct TaskInfo {
    pub name: TaskName,
    pub deps: Vec<TaskName>,
    pub action: Option<Action>,
    pub state: NodeState,
}

impl TaskInfo {
    pub fn from_node(node: &TaskNode) -> Self {
        Self {
            name: node.name.clone(),
            deps: node.deps.clone(),
            action: node.action.clone(),
            state: NodeState::Pending,
        }
    }
}

/// A leaf node the scheduler wants the executor to run now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTask {
    pub name: TaskName,
    pub action: Action,
}

/// A node that failed, with the detail its action reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFailure {
    pub name: TaskName,
    pub detail: String,
}
