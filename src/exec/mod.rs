// src/exec/mod.rs

//! Action execution layer.
//!
//! This module runs the leaf actions of scheduled tasks and reports back to
//! the orchestration runtime via `RuntimeEvent`s.
//!
//! - [`executor_loop`] owns the main executor loop, bounded by a semaphore.
//! - [`task_runner`] runs one task and times it.
//! - [`tool`] spawns external tools with `tokio::process::Command`.
//! - [`backend`] provides the `ExecutorBackend` trait and a concrete
//!   `RealExecutorBackend` that the runtime uses in production, and which
//!   tests can replace with a fake implementation.

pub mod backend;
pub mod executor_loop;
pub mod task_runner;
pub mod tool;

pub use backend::{DispatchFuture, ExecutorBackend, RealExecutorBackend};
pub use executor_loop::spawn_executor;
pub use tool::{ToolInvocation, ToolOutput};
