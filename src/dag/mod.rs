// src/dag/mod.rs

//! Run-time scheduling over the task graph.
//!
//! - [`scheduler`] contains the per-run state machine that decides which
//!   nodes are ready and when the run is over.
//! - [`task_info`] provides node state and scheduled task types.
//! - [`scheduler_step`] defines the result type for scheduler steps.
//! - [`state_manager`] applies readiness and state transitions.

pub mod scheduler;
pub mod scheduler_step;
pub mod state_manager;
pub mod task_info;

pub use scheduler::{RunReport, Scheduler};
pub use scheduler_step::SchedulerStep;
pub use task_info::{NodeState, RunStatus, ScheduledTask, TaskFailure};
