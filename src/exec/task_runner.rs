// src/exec/task_runner.rs

//! Individual task runner.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;
use tracing::{error, info};

use crate::actions::{self, ActionContext};
use crate::dag::ScheduledTask;
use crate::engine::{RuntimeEvent, TaskOutcome};

/// Run the action of a single task and emit exactly one `TaskCompleted`
/// event for it.
///
/// Action errors never escape: they become `TaskOutcome::Failed` with the
/// error's message as detail, and the scheduler decides what happens next.
pub async fn run_task(task: ScheduledTask, ctx: Arc<ActionContext>, runtime_tx: mpsc::Sender<RuntimeEvent>) {
    let started = Instant::now();
    info!(task = %task.name, action = %task.action, "Starting '{}'", task.name);

    let outcome = match actions::execute(&ctx, &task.action).await {
        Ok(()) => {
            info!(task = %task.name, "Finished '{}' after {:?}", task.name, started.elapsed());
            TaskOutcome::Success
        }
        Err(err) => {
            error!(
                task = %task.name,
                error = %err,
                "'{}' errored after {:?}",
                task.name,
                started.elapsed()
            );
            TaskOutcome::Failed(err.to_string())
        }
    };

    if let Err(err) = runtime_tx
        .send(RuntimeEvent::TaskCompleted {
            task: task.name.clone(),
            outcome,
        })
        .await
    {
        error!(task = %task.name, error = %err, "sending TaskCompleted event to runtime failed");
    }
}
