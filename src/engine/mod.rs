// src/engine/mod.rs

//! Drives one build run from start to report.
//!
//! [`core::CoreRuntime`] turns events (a leaf finished, Ctrl-C) into
//! commands without doing any IO. [`runtime::Runtime`] owns the event
//! channel and the executor backend and carries those commands out.

use crate::catalog::TaskName;

/// Outcome of a leaf action for the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Success,
    /// The action failed; carries the message reported to the user.
    Failed(String),
}

/// Events flowing into the runtime from the executor and signal handlers.
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    /// A leaf action finished with a concrete outcome.
    TaskCompleted {
        task: TaskName,
        outcome: TaskOutcome,
    },
    /// Abort requested (e.g. Ctrl-C). Treated like a failure: nothing new
    /// starts and the run ends once in-flight actions report back.
    ShutdownRequested,
}

pub mod core;
pub mod event_handlers;
pub mod runtime;

pub use core::CoreRuntime;
pub use event_handlers::{CoreCommand, CoreStep};
pub use runtime::Runtime;
