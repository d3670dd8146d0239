// src/engine/event_handlers.rs

//! Event handling logic for the core runtime.

use tracing::{info, warn};

use crate::catalog::TaskName;
use crate::dag::{ScheduledTask, Scheduler, SchedulerStep};
use crate::engine::TaskOutcome;

/// Command produced by the pure core, to be executed by the outer IO shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreCommand {
    /// Send these tasks to the executor.
    DispatchTasks(Vec<ScheduledTask>),
    /// The run reached its end; the shell should stop and report.
    Finish,
}

/// Decision returned by the core after handling a single event.
#[derive(Debug, Clone)]
pub struct CoreStep {
    /// Commands the IO shell should execute.
    pub commands: Vec<CoreCommand>,
    /// Whether the outer runtime loop should keep running.
    pub keep_running: bool,
}

impl CoreStep {
    fn from_scheduler_step(step: SchedulerStep) -> Self {
        let mut commands = Vec::new();
        if !step.newly_scheduled.is_empty() {
            commands.push(CoreCommand::DispatchTasks(step.newly_scheduled));
        }
        let keep_running = !step.run_just_finished;
        if step.run_just_finished {
            commands.push(CoreCommand::Finish);
        }
        CoreStep {
            commands,
            keep_running,
        }
    }
}

/// Seed the run: dispatch every leaf whose dependencies are already met.
///
/// A graph made only of aggregators finishes right here.
pub fn handle_start(scheduler: &mut Scheduler) -> CoreStep {
    CoreStep::from_scheduler_step(scheduler.start())
}

/// Handle a task completion event.
pub fn handle_task_completion(scheduler: &mut Scheduler, task: TaskName, outcome: TaskOutcome) -> CoreStep {
    if let TaskOutcome::Failed(detail) = &outcome {
        warn!(task = %task, detail = %detail, "task reported failure");
    }
    CoreStep::from_scheduler_step(scheduler.step_completion(&task, outcome))
}

/// Handle Ctrl-C: abort like a failure, but keep waiting for in-flight
/// actions so their outcome is still reported.
pub fn handle_shutdown(scheduler: &mut Scheduler) -> CoreStep {
    info!("shutdown requested; waiting for running tasks");
    let step = scheduler.abort("interrupted");
    let mut core_step = CoreStep::from_scheduler_step(step);
    if scheduler.is_finished() && core_step.keep_running {
        core_step.keep_running = false;
        core_step.commands.push(CoreCommand::Finish);
    }
    core_step
}
