use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use shapebuild::dag::ScheduledTask;
use shapebuild::engine::{RuntimeEvent, TaskOutcome};
use shapebuild::exec::{DispatchFuture, ExecutorBackend};
use tokio::sync::mpsc;

/// Backend that runs nothing. Every dispatched task is logged into
/// `dispatched` and answered at once: `Failed` if its name was passed to
/// [`FakeExecutor::failing`], `Success` otherwise.
pub struct FakeExecutor {
    runtime_tx: mpsc::Sender<RuntimeEvent>,
    dispatched: Arc<Mutex<Vec<String>>>,
    failing: BTreeSet<String>,
}

impl FakeExecutor {
    pub fn new(runtime_tx: mpsc::Sender<RuntimeEvent>, dispatched: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            runtime_tx,
            dispatched,
            failing: BTreeSet::new(),
        }
    }

    pub fn failing<I, S>(mut self, tasks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.failing.extend(tasks.into_iter().map(Into::into));
        self
    }

    fn outcome_for(&self, task: &str) -> TaskOutcome {
        if self.failing.contains(task) {
            TaskOutcome::Failed(format!("{task} failed on purpose"))
        } else {
            TaskOutcome::Success
        }
    }
}

impl ExecutorBackend for FakeExecutor {
    fn spawn_ready_tasks(&mut self, tasks: Vec<ScheduledTask>) -> DispatchFuture<'_> {
        let replies: Vec<RuntimeEvent> = tasks
            .into_iter()
            .map(|t| RuntimeEvent::TaskCompleted {
                outcome: self.outcome_for(&t.name),
                task: t.name,
            })
            .collect();
        let tx = self.runtime_tx.clone();
        let dispatched = Arc::clone(&self.dispatched);

        Box::pin(async move {
            for reply in replies {
                if let RuntimeEvent::TaskCompleted { task, .. } = &reply {
                    dispatched.lock().unwrap().push(task.clone());
                }
                tx.send(reply).await.map_err(anyhow::Error::from)?;
            }
            Ok(())
        })
    }
}
