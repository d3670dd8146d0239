// src/exec/executor_loop.rs

//! Main executor loop that runs scheduled leaf actions.

use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tracing::{debug, error, info};

use crate::actions::ActionContext;
use crate::dag::ScheduledTask;
use crate::engine::{RuntimeEvent, TaskOutcome};
use crate::exec::task_runner::run_task;

/// Spawn the background executor loop.
///
/// The returned `mpsc::Sender<ScheduledTask>` is what `RealExecutorBackend`
/// sends to. Each scheduled task runs in its own Tokio task once it holds a
/// semaphore permit, so at most `jobs` actions are in flight. The scheduler
/// never hands out the same task twice, so there is no per-name
/// deduplication here.
pub fn spawn_executor(
    runtime_tx: mpsc::Sender<RuntimeEvent>,
    ctx: Arc<ActionContext>,
    jobs: usize,
) -> mpsc::Sender<ScheduledTask> {
    let (tx, mut rx) = mpsc::channel::<ScheduledTask>(32);
    let permits = Arc::new(Semaphore::new(jobs.max(1)));

    tokio::spawn(async move {
        info!(jobs, "executor loop started");

        while let Some(task) = rx.recv().await {
            let permits = Arc::clone(&permits);
            let ctx = Arc::clone(&ctx);
            let rt_tx = runtime_tx.clone();

            tokio::spawn(async move {
                let name = task.name.clone();
                let permit = match permits.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(err) => {
                        error!(task = %name, error = %err, "executor semaphore closed");
                        let _ = rt_tx
                            .send(RuntimeEvent::TaskCompleted {
                                task: name,
                                outcome: TaskOutcome::Failed(format!("executor unavailable: {err}")),
                            })
                            .await;
                        return;
                    }
                };

                run_task(task, ctx, rt_tx).await;
                drop(permit);
                debug!(task = %name, "task runner future finished");
            });
        }

        info!("executor loop finished (channel closed)");
    });

    tx
}
