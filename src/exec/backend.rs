// src/exec/backend.rs

//! The seam between the runtime and whatever runs leaf actions.
//!
//! [`RealExecutorBackend`] hands tasks to the bounded executor loop in
//! [`super::executor_loop`]. Tests plug in a backend that answers with
//! `TaskCompleted` events directly, so scheduling can be checked without
//! touching the disk or spawning tools.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::actions::ActionContext;
use crate::dag::ScheduledTask;
use crate::engine::RuntimeEvent;
use crate::errors::{Error, Result};

use super::executor_loop::spawn_executor;

/// Future returned by [`ExecutorBackend::spawn_ready_tasks`].
pub type DispatchFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;

pub trait ExecutorBackend: Send {
    /// Accept tasks the scheduler just marked Running. Each one must later
    /// be answered with exactly one `RuntimeEvent::TaskCompleted`.
    fn spawn_ready_tasks(&mut self, tasks: Vec<ScheduledTask>) -> DispatchFuture<'_>;
}

/// Runs build actions on the tokio runtime, `jobs` at a time.
pub struct RealExecutorBackend {
    queue: mpsc::Sender<ScheduledTask>,
}

impl RealExecutorBackend {
    /// Starts the executor loop right away; it reports back on `runtime_tx`.
    pub fn new(runtime_tx: mpsc::Sender<RuntimeEvent>, ctx: Arc<ActionContext>, jobs: usize) -> Self {
        Self {
            queue: spawn_executor(runtime_tx, ctx, jobs),
        }
    }
}

impl ExecutorBackend for RealExecutorBackend {
    fn spawn_ready_tasks(&mut self, tasks: Vec<ScheduledTask>) -> DispatchFuture<'_> {
        let queue = self.queue.clone();
        Box::pin(async move {
            for task in tasks {
                queue.send(task).await.map_err(Error::from)?;
            }
            Ok(())
        })
    }
}
