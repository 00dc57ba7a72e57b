// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tasks and the invocation boundary
//!
//! A task is an opaque callable. The worker only learns whether it returned
//! normally; an unwind or an `Err` from a fallible task is captured by
//! [`Task::invoke`] and never escapes it.

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use wh_core::{Failure, TaskId};

type Job = Box<dyn FnOnce() -> Result<(), String> + Send + 'static>;

/// A unit of work submitted to a worker
pub struct Task {
    label: Option<String>,
    job: Job,
}

impl Task {
    /// Wrap an infallible callable
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            label: None,
            job: Box::new(move || {
                f();
                Ok(())
            }),
        }
    }

    /// Wrap a callable whose `Err` is recorded as a fault
    pub fn fallible<F, E>(f: F) -> Self
    where
        F: FnOnce() -> Result<(), E> + Send + 'static,
        E: fmt::Display,
    {
        Self {
            label: None,
            job: Box::new(move || f().map_err(|e| e.to_string())),
        }
    }

    /// Attach a caller label, carried into any fault this task produces
    pub fn with_label(self, label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..self
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Run the task inside a failure boundary
    pub fn invoke(self) -> Result<(), Failure> {
        match catch_unwind(AssertUnwindSafe(self.job)) {
            Ok(Ok(())) => Ok(()),
            Ok(Err(message)) => Err(Failure::errored(message)),
            Err(payload) => Err(Failure::panicked(payload.as_ref())),
        }
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// A task paired with the id assigned at submission
#[derive(Debug)]
pub(crate) struct QueuedTask {
    pub id: TaskId,
    pub task: Task,
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
