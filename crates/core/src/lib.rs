// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! wh-core: Core types for the workaholic worker
//!
//! This crate provides:
//! - The pure lifecycle state machine (`Lifecycle::transition`)
//! - Signal, status and transition records
//! - Fault records and the fault policy
//! - Worker configuration and task identifiers

pub mod config;
pub mod fault;
pub mod id;
pub mod state;

pub use config::{ConfigError, WorkerConfig};
pub use fault::{panic_message, Failure, Fault, FaultKind, FaultPolicy};
pub use id::{SequentialIdGen, TaskId};
pub use state::{
    Effect, Lifecycle, LifecycleEvent, Signal, Status, StatusReport, Transition, WorkerState,
    WorkerStats,
};
