// src/engine/core.rs

//! Synchronous half of the engine.
//!
//! Feeding the same events in the same order always yields the same
//! [`CoreStep`]s, which is what lets `tests/core_runtime.rs` and the
//! scheduler property tests step a run by hand without a tokio runtime.

use crate::dag::{RunReport, Scheduler};
use crate::engine::RuntimeEvent;
use crate::engine::event_handlers::{CoreStep, handle_shutdown, handle_start, handle_task_completion};

/// Pure core runtime state. Owns the scheduler of the current run and
/// performs no IO.
#[derive(Debug)]
pub struct CoreRuntime {
    scheduler: Scheduler,
}

impl CoreRuntime {
    pub fn new(scheduler: Scheduler) -> Self {
        Self { scheduler }
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn is_finished(&self) -> bool {
        self.scheduler.is_finished()
    }

    /// Begin the run. Must be called once before any event is fed in.
    pub fn start(&mut self) -> CoreStep {
        handle_start(&mut self.scheduler)
    }

    /// Handle a single runtime event, updating core state and returning the
    /// resulting commands for the IO shell.
    pub fn step(&mut self, event: RuntimeEvent) -> CoreStep {
        match event {
            RuntimeEvent::TaskCompleted { task, outcome } => {
                handle_task_completion(&mut self.scheduler, task, outcome)
            }
            RuntimeEvent::ShutdownRequested => handle_shutdown(&mut self.scheduler),
        }
    }

    pub fn report(&self) -> RunReport {
        self.scheduler.report()
    }
}
