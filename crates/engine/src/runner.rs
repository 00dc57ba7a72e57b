// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The worker loop
//!
//! Runs on the worker's dedicated thread and is the only owner of lifecycle
//! state. Signals are checked before every task; a task itself is never
//! interrupted.

use crate::protocol::ControlRequest;
use crate::task::QueuedTask;
use tokio::sync::{mpsc, watch};
use wh_core::{
    Effect, Fault, Lifecycle, LifecycleEvent, Status, StatusReport, Transition, WorkerState,
    WorkerStats,
};

/// Channel ends owned by the worker thread
pub(crate) struct RunnerChannels {
    pub tasks: mpsc::Receiver<QueuedTask>,
    pub control: mpsc::Receiver<ControlRequest>,
    pub faults: mpsc::Sender<Fault>,
    pub status: watch::Sender<StatusReport>,
}

pub(crate) struct Runner {
    worker_id: u64,
    lifecycle: Lifecycle,
    stats: WorkerStats,
    tasks: mpsc::Receiver<QueuedTask>,
    tasks_open: bool,
    control: mpsc::Receiver<ControlRequest>,
    faults: mpsc::Sender<Fault>,
    status: watch::Sender<StatusReport>,
}

impl Runner {
    pub fn new(worker_id: u64, lifecycle: Lifecycle, channels: RunnerChannels) -> Self {
        Self {
            worker_id,
            lifecycle,
            stats: WorkerStats::default(),
            tasks: channels.tasks,
            tasks_open: true,
            control: channels.control,
            faults: channels.faults,
            status: channels.status,
        }
    }

    /// Drive the lifecycle until it terminates
    pub async fn run(mut self) {
        tracing::info!(fault_policy = %self.lifecycle.fault_policy, "worker started");

        while !self.lifecycle.state.is_terminal() {
            match self.lifecycle.state {
                WorkerState::Busy if self.tasks_open => {
                    tokio::select! {
                        biased;

                        request = self.control.recv() => self.on_request(request),

                        queued = self.tasks.recv() => match queued {
                            Some(queued) => self.perform(queued).await,
                            None => {
                                tracing::debug!("task queue closed, waiting for signals only");
                                self.tasks_open = false;
                            }
                        },
                    }
                }
                _ => {
                    let request = self.control.recv().await;
                    self.on_request(request);
                }
            }
        }

        tracing::info!(
            completed = self.stats.completed,
            faulted = self.stats.faulted,
            "worker terminated"
        );
    }

    fn on_request(&mut self, request: Option<ControlRequest>) {
        match request {
            Some(request) => self.on_signal(request),
            None => self.abandon(),
        }
    }

    fn on_signal(&mut self, request: ControlRequest) {
        let signal = request.signal;
        let from = self.lifecycle.state;
        let (next, effects) = self.lifecycle.transition(LifecycleEvent::Signal(signal));
        self.lifecycle = next;

        tracing::debug!(%signal, %from, to = %next.state, "signal");

        // Effects first: closed queues must be visible before Quit is acknowledged
        self.apply(effects);

        request.acknowledge(Transition {
            signal,
            from,
            to: next.state,
            stats: self.stats,
        });
    }

    /// Every handle is gone; nobody can signal this worker again
    fn abandon(&mut self) {
        tracing::info!("all handles dropped, terminating");
        self.lifecycle.state = WorkerState::Terminated;
        self.publish(Status::Terminated);
    }

    async fn perform(&mut self, queued: QueuedTask) {
        let QueuedTask { id, task } = queued;
        let label = task.label().map(str::to_owned);

        let failure = match task.invoke() {
            Ok(()) => {
                self.stats.completed += 1;
                tracing::trace!(task = %id, "task completed");
                return;
            }
            Err(failure) => failure,
        };

        self.stats.faulted += 1;
        tracing::warn!(
            task = %id,
            kind = %failure.kind,
            message = %failure.message,
            "task failed"
        );

        let (next, effects) = self.lifecycle.transition(LifecycleEvent::TaskFaulted);
        self.lifecycle = next;
        self.apply(effects);

        let fault = Fault::new(self.worker_id, id, label, failure);
        // Waits while the fault queue is full
        if self.faults.send(fault).await.is_err() {
            tracing::debug!("fault stream dropped, fault discarded");
        }
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::BeginDraining => tracing::debug!("draining task queue"),
                Effect::StopDraining => tracing::debug!("stopped draining task queue"),
                Effect::PublishStatus(status) => self.publish(status),
                Effect::CloseInbox => {
                    self.control.close();
                    self.tasks.close();
                }
            }
        }
    }

    fn publish(&self, status: Status) {
        self.status.send_replace(StatusReport {
            worker_id: self.worker_id,
            status,
            stats: self.stats,
        });
    }
}
