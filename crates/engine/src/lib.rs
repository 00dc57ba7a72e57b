// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! workaholic worker engine
//!
//! Runs a single worker on its own thread and exposes the command and
//! control surface: submit tasks, signal with acknowledgment, read status,
//! drain faults.

mod error;
mod protocol;
mod runner;
mod task;
mod worker;

pub use error::{JoinError, SignalError, SpawnError, SubmitError, TrySubmitError};
pub use protocol::SignalOutcome;
pub use task::Task;
pub use worker::{FaultStream, Worker, WorkerHandle};

pub use wh_core::{
    Fault, FaultKind, FaultPolicy, Signal, Status, StatusReport, TaskId, Transition,
    WorkerConfig, WorkerState, WorkerStats,
};
