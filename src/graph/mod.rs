// src/graph/mod.rs

//! Construction of the per-run task graph.
//!
//! - [`task_graph`] holds the graph value itself: nodes keyed by name with
//!   dependency and dependent edges.
//! - [`builder`] turns catalog rules plus a run request into that graph,
//!   restricted to the ancestors of the requested targets.

pub mod builder;
pub mod task_graph;

pub use builder::build;
pub use task_graph::{TaskGraph, TaskNode};
