// src/dag/scheduler_step.rs

//! Step-by-step execution result types for the scheduler.

use crate::catalog::TaskName;
use crate::dag::task_info::ScheduledTask;

/// Structured result of a single scheduler "step".
///
/// Tests use it to drive the graph by hand and make assertions about what
/// changed.
#[derive(Debug, Clone, Default)]
pub struct SchedulerStep {
    /// Leaf tasks that became ready and were marked Running.
    pub newly_scheduled: Vec<ScheduledTask>,
    /// Nodes that reached Done in this step, in order: the completed task
    /// first, then any aggregators that completed as a consequence.
    pub newly_done: Vec<TaskName>,
    /// The task that failed in this step, if any.
    pub newly_failed: Option<TaskName>,
    /// Whether the run reached its end in this step.
    pub run_just_finished: bool,
}
