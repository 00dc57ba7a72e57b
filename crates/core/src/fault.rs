// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task fault records
//!
//! A fault pairs the failing task's identity with the failure payload
//! captured at the invocation boundary. Faults never change the worker's
//! resting lifecycle unless the fault policy asks for a pause.

use crate::id::TaskId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;

/// What the worker does after a task fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaultPolicy {
    /// Keep draining the queue
    #[default]
    Continue,
    /// Stop draining and rest in `Idle` until the next `Work`
    Pause,
}

impl fmt::Display for FaultPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Continue => write!(f, "continue"),
            Self::Pause => write!(f, "pause"),
        }
    }
}

/// How a task failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultKind {
    /// The task unwound
    Panicked,
    /// A fallible task returned an error
    Errored,
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Panicked => write!(f, "panicked"),
            Self::Errored => write!(f, "errored"),
        }
    }
}

/// A failure captured at the task invocation boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FaultKind,
    pub message: String,
}

impl Failure {
    pub fn panicked(payload: &(dyn Any + Send)) -> Self {
        Self {
            kind: FaultKind::Panicked,
            message: panic_message(payload),
        }
    }

    pub fn errored(message: impl Into<String>) -> Self {
        Self {
            kind: FaultKind::Errored,
            message: message.into(),
        }
    }
}

/// Record of a single task failure, delivered on the fault stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fault {
    pub worker_id: u64,
    pub task_id: TaskId,
    pub label: Option<String>,
    pub kind: FaultKind,
    pub message: String,
    pub occurred_at: DateTime<Utc>,
}

impl Fault {
    pub fn new(worker_id: u64, task_id: TaskId, label: Option<String>, failure: Failure) -> Self {
        Self {
            worker_id,
            task_id,
            label,
            kind: failure.kind,
            message: failure.message,
            occurred_at: Utc::now(),
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task {}", self.task_id)?;
        if let Some(label) = &self.label {
            write!(f, " [{label}]")?;
        }
        write!(f, " {}: {}", self.kind, self.message)
    }
}

/// Extract a readable message from a panic payload
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
#[path = "fault_tests.rs"]
mod tests;
