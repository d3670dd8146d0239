// src/graph/builder.rs

use std::collections::{BTreeMap, HashMap, HashSet};

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use tracing::debug;

use crate::catalog::{Rule, RunRequest, TaskName};
use crate::errors::{BuildError, Result};
use crate::graph::task_graph::{TaskGraph, TaskNode};

/// Build the graph for `request` out of the catalog `rules`.
///
/// Only the requested targets and their transitive dependencies become
/// nodes. Fails with [`BuildError::UnknownTarget`] when a requested name has
/// no rule, and with [`BuildError::Cycle`] if the rules loop back on
/// themselves.
pub fn build(rules: &[Rule], request: &RunRequest) -> Result<TaskGraph> {
    let index = index_rules(rules)?;

    for target in request.targets() {
        if !index.contains_key(target.as_str()) {
            return Err(BuildError::UnknownTarget(target.clone()));
        }
    }

    // Walk dependency edges upwards from the requested targets. The visited
    // set keeps this finite even if the rules contain a cycle.
    let mut included: HashSet<TaskName> = HashSet::new();
    let mut stack: Vec<TaskName> = request.targets().to_vec();

    while let Some(name) = stack.pop() {
        if !included.insert(name.clone()) {
            continue;
        }
        let rule = index[name.as_str()];
        for dep in rule.depends_on.iter() {
            let dep_name = dep.name();
            if !index.contains_key(dep_name.as_str()) {
                return Err(BuildError::Config(format!(
                    "target '{name}' depends on undefined target '{dep_name}'"
                )));
            }
            stack.push(dep_name);
        }
    }

    ensure_acyclic(&index, &included)?;

    let mut nodes: BTreeMap<TaskName, TaskNode> = BTreeMap::new();
    for name in included.iter() {
        let rule = index[name.as_str()];
        let mut deps: Vec<TaskName> = Vec::new();
        for dep in rule.depends_on.iter().map(|d| d.name()) {
            if !deps.contains(&dep) {
                deps.push(dep);
            }
        }
        nodes.insert(
            name.clone(),
            TaskNode {
                id: rule.id.clone(),
                name: name.clone(),
                deps,
                dependents: Vec::new(),
                action: rule.action.clone(),
            },
        );
    }

    // Second pass: populate dependents based on deps.
    let names: Vec<TaskName> = nodes.keys().cloned().collect();
    for name in names {
        let deps = nodes.get(&name).map(|n| n.deps.clone()).unwrap_or_default();
        for dep in deps {
            if let Some(dep_node) = nodes.get_mut(&dep) {
                dep_node.dependents.push(name.clone());
            }
        }
    }

    debug!(
        requested = ?request.targets(),
        nodes = nodes.len(),
        "built task graph"
    );

    Ok(TaskGraph::new(nodes, request.targets().to_vec()))
}

fn index_rules(rules: &[Rule]) -> Result<HashMap<String, &Rule>> {
    let mut index: HashMap<String, &Rule> = HashMap::with_capacity(rules.len());
    for rule in rules {
        if index.insert(rule.name(), rule).is_some() {
            return Err(BuildError::Config(format!(
                "target '{}' is defined more than once",
                rule.name()
            )));
        }
    }
    Ok(index)
}

fn ensure_acyclic(index: &HashMap<String, &Rule>, included: &HashSet<TaskName>) -> Result<()> {
    // Edge direction: dep -> dependent.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for name in included.iter() {
        graph.add_node(name.as_str());
    }

    let dep_names: Vec<(&str, TaskName)> = included
        .iter()
        .flat_map(|name| {
            index[name.as_str()]
                .depends_on
                .iter()
                .map(move |d| (name.as_str(), d.name()))
        })
        .collect();

    for (name, dep) in dep_names.iter() {
        if let Some(dep_key) = included.get(dep) {
            graph.add_edge(dep_key.as_str(), *name, ());
        }
    }

    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(BuildError::Cycle(format!(
            "cycle detected in task graph involving target '{}'",
            cycle.node_id()
        ))),
    }
}
