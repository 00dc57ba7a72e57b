// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker lifecycle state machine
//!
//! The lifecycle is a pure value: `transition` maps the current state and an
//! event to the next state plus the effects the worker thread must apply.
//! Nothing here touches channels or threads.

use crate::fault::FaultPolicy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state owned by the worker thread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerState {
    /// Waiting for a signal; the task queue is not drained
    Idle,
    /// Draining the task queue between signal checkpoints
    Busy,
    /// Absorbing final state; the worker thread has exited
    Terminated,
}

impl WorkerState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminated)
    }
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Busy => "busy",
            Self::Terminated => "terminated",
        };
        write!(f, "{s}")
    }
}

/// Control signal kinds accepted by the worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    /// Begin, or resume, draining the task queue
    Work,
    /// Stop draining after the in-flight task
    Pause,
    /// Snapshot the current status
    Report,
    /// Terminate the worker
    Quit,
}

impl Signal {
    pub const ALL: [Signal; 4] = [Signal::Work, Signal::Pause, Signal::Report, Signal::Quit];
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Work => "work",
            Self::Pause => "pause",
            Self::Report => "report",
            Self::Quit => "quit",
        };
        write!(f, "{s}")
    }
}

/// Externally observable status snapshot
///
/// `Faulted` only ever appears on the status slot, published when a task
/// fails. `Interrupted` is reserved and never published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Idle,
    Busy,
    Faulted,
    Interrupted,
    Terminated,
}

impl From<WorkerState> for Status {
    fn from(state: WorkerState) -> Self {
        match state {
            WorkerState::Idle => Status::Idle,
            WorkerState::Busy => Status::Busy,
            WorkerState::Terminated => Status::Terminated,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "Idle",
            Self::Busy => "Busy",
            Self::Faulted => "Faulted",
            Self::Interrupted => "Interrupted",
            Self::Terminated => "Terminated",
        };
        write!(f, "{s}")
    }
}

/// Side effects requested by a lifecycle transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Start pulling tasks from the queue
    BeginDraining,
    /// Stop pulling tasks; the in-flight task (if any) has already completed
    StopDraining,
    /// Replace the value in the status slot
    PublishStatus(Status),
    /// Close the control inbox so later signals fail fast
    CloseInbox,
}

/// Events that can change lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// A control signal reached the head of the inbox
    Signal(Signal),
    /// A task invocation failed abruptly or returned an error
    TaskFaulted,
}

/// The worker lifecycle: current state plus the fixed fault policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lifecycle {
    pub state: WorkerState,
    pub fault_policy: FaultPolicy,
}

impl Lifecycle {
    /// A fresh lifecycle, resting in `Idle`
    pub fn new(fault_policy: FaultPolicy) -> Self {
        Self {
            state: WorkerState::Idle,
            fault_policy,
        }
    }

    /// Pure transition function - returns new lifecycle and effects
    pub fn transition(&self, event: LifecycleEvent) -> (Lifecycle, Vec<Effect>) {
        use WorkerState::*;

        let (state, effects) = match (self.state, event) {
            (Terminated, _) => (Terminated, vec![]),

            (Idle, LifecycleEvent::Signal(Signal::Work)) => (Busy, vec![Effect::BeginDraining]),
            (Busy, LifecycleEvent::Signal(Signal::Work)) => (Busy, vec![]),

            (Idle, LifecycleEvent::Signal(Signal::Pause)) => (Idle, vec![]),
            (Busy, LifecycleEvent::Signal(Signal::Pause)) => (Idle, vec![Effect::StopDraining]),

            (state, LifecycleEvent::Signal(Signal::Report)) => {
                (state, vec![Effect::PublishStatus(state.into())])
            }

            (_, LifecycleEvent::Signal(Signal::Quit)) => (
                Terminated,
                vec![
                    Effect::PublishStatus(Status::Terminated),
                    Effect::CloseInbox,
                ],
            ),

            (Busy, LifecycleEvent::TaskFaulted) => match self.fault_policy {
                FaultPolicy::Continue => (Busy, vec![Effect::PublishStatus(Status::Faulted)]),
                FaultPolicy::Pause => (
                    Idle,
                    vec![Effect::StopDraining, Effect::PublishStatus(Status::Faulted)],
                ),
            },
            (Idle, LifecycleEvent::TaskFaulted) => {
                (Idle, vec![Effect::PublishStatus(Status::Faulted)])
            }
        };

        (
            Lifecycle {
                state,
                fault_policy: self.fault_policy,
            },
            effects,
        )
    }
}

/// Task counters carried by acknowledgments and status reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerStats {
    /// Tasks that returned normally
    pub completed: u64,
    /// Tasks that failed and produced a fault
    pub faulted: u64,
}

impl WorkerStats {
    pub fn invoked(&self) -> u64 {
        self.completed + self.faulted
    }
}

/// Acknowledgment written to a signal's reply slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub signal: Signal,
    pub from: WorkerState,
    pub to: WorkerState,
    pub stats: WorkerStats,
}

impl Transition {
    /// Status snapshot as of this transition
    pub fn status(&self) -> Status {
        self.to.into()
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} -> {} (completed: {}, faulted: {})",
            self.signal, self.from, self.to, self.stats.completed, self.stats.faulted
        )
    }
}

/// Content of a worker's status slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub worker_id: u64,
    pub status: Status,
    pub stats: WorkerStats,
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "worker {}: {}", self.worker_id, self.status)
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
