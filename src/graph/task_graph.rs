// src/graph/task_graph.rs

use std::collections::BTreeMap;

use crate::catalog::{Action, TargetId, TaskName};

/// One node of a run's graph.
#[derive(Debug, Clone)]
pub struct TaskNode {
    pub id: TargetId,
    pub name: TaskName,
    /// Direct dependencies: nodes that must be Done before this one starts.
    pub deps: Vec<TaskName>,
    /// Direct dependents: nodes listing this one in `deps`.
    pub dependents: Vec<TaskName>,
    /// `None` for pure aggregation points.
    pub action: Option<Action>,
}

impl TaskNode {
    pub fn is_aggregator(&self) -> bool {
        self.action.is_none()
    }
}

/// The concrete, acyclic task graph of a single run, keyed by task name.
///
/// Built by [`crate::graph::build`], which guarantees that every node is an
/// ancestor of (or equal to) a requested target and that there are no
/// cycles.
#[derive(Debug, Clone, Default)]
pub struct TaskGraph {
    nodes: BTreeMap<TaskName, TaskNode>,
    requested: Vec<TaskName>,
}

impl TaskGraph {
    pub(crate) fn new(nodes: BTreeMap<TaskName, TaskNode>, requested: Vec<TaskName>) -> Self {
        Self { nodes, requested }
    }

    /// Return all task names, sorted.
    pub fn tasks(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(|s| s.as_str())
    }

    pub fn nodes(&self) -> impl Iterator<Item = &TaskNode> {
        self.nodes.values()
    }

    pub fn node(&self, name: &str) -> Option<&TaskNode> {
        self.nodes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Targets the run was asked for, in request order.
    pub fn requested(&self) -> &[TaskName] {
        &self.requested
    }

    pub fn dependencies_of(&self, name: &str) -> &[TaskName] {
        self.nodes
            .get(name)
            .map(|n| n.deps.as_slice())
            .unwrap_or(&[])
    }

    pub fn dependents_of(&self, name: &str) -> &[TaskName] {
        self.nodes
            .get(name)
            .map(|n| n.dependents.as_slice())
            .unwrap_or(&[])
    }

    /// Whether `ancestor` is reachable from `name` by following dependency
    /// edges.
    pub fn depends_transitively(&self, name: &str, ancestor: &str) -> bool {
        let mut stack: Vec<&str> = self.dependencies_of(name).iter().map(|s| s.as_str()).collect();
        let mut visited = std::collections::HashSet::new();

        while let Some(current) = stack.pop() {
            if current == ancestor {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            stack.extend(self.dependencies_of(current).iter().map(|s| s.as_str()));
        }

        false
    }
}
