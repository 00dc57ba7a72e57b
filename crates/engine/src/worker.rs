// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker construction and the caller-side handle
//!
//! A worker owns one dedicated thread. Callers interact with it only through
//! messages: tasks on the task queue, signals on the control inbox, faults on
//! the fault stream, and snapshots in the status slot.

use crate::error::{JoinError, SignalError, SpawnError, SubmitError, TrySubmitError};
use crate::protocol::{self, Inbox, SignalOutcome};
use crate::runner::{Runner, RunnerChannels};
use crate::task::{QueuedTask, Task};
use std::io;
use std::sync::mpsc as std_mpsc;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::Instrument;
use wh_core::{
    panic_message, Fault, Lifecycle, SequentialIdGen, Signal, Status, StatusReport, TaskId,
    Transition, WorkerConfig, WorkerStats,
};

/// A running worker
///
/// Dropping the `Worker` does not stop it; the worker terminates on `Quit`
/// or once every handle is dropped.
pub struct Worker {
    handle: WorkerHandle,
    faults: Option<FaultStream>,
    thread: Option<JoinHandle<()>>,
}

impl Worker {
    /// Validate `config` and start the worker thread, resting in `Idle`
    pub fn spawn(config: WorkerConfig) -> Result<Self, SpawnError> {
        config.validate()?;

        let (task_tx, task_rx) = mpsc::channel(config.task_capacity);
        let (control_tx, control_rx) = mpsc::channel(config.control_capacity);
        let (fault_tx, fault_rx) = mpsc::channel(config.fault_capacity);
        let (status_tx, status_rx) = watch::channel(StatusReport {
            worker_id: config.id,
            status: Status::Idle,
            stats: WorkerStats::default(),
        });

        let runner = Runner::new(
            config.id,
            Lifecycle::new(config.fault_policy),
            RunnerChannels {
                tasks: task_rx,
                control: control_rx,
                faults: fault_tx,
                status: status_tx,
            },
        );

        // The runtime is built, run and dropped on the worker thread only
        let (started_tx, started_rx) = std_mpsc::sync_channel(1);
        let span = tracing::info_span!("worker", id = config.id, name = %config.name);
        let thread = std::thread::Builder::new()
            .name(format!("wh-{}", config.name))
            .spawn(move || {
                let runtime = match tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                {
                    Ok(runtime) => runtime,
                    Err(e) => {
                        let _ = started_tx.send(Err(e));
                        return;
                    }
                };
                let _ = started_tx.send(Ok(()));
                runtime.block_on(runner.run().instrument(span));
            })
            .map_err(SpawnError::Thread)?;

        match started_rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                let _ = thread.join();
                return Err(SpawnError::Runtime(e));
            }
            Err(_) => {
                let _ = thread.join();
                return Err(SpawnError::Runtime(io::Error::other(
                    "worker thread exited before starting",
                )));
            }
        }

        let handle = WorkerHandle {
            config: Arc::new(config),
            tasks: task_tx,
            control: control_tx,
            status: status_rx,
            ids: SequentialIdGen::default(),
        };

        Ok(Self {
            handle,
            faults: Some(FaultStream { rx: fault_rx }),
            thread: Some(thread),
        })
    }

    pub fn handle(&self) -> &WorkerHandle {
        &self.handle
    }

    /// Take the fault stream; only the first call returns it
    ///
    /// Faults accumulate in a bounded queue. Once it is full the worker
    /// waits on the next failing task until the stream is drained or dropped.
    pub fn take_faults(&mut self) -> Option<FaultStream> {
        self.faults.take()
    }

    /// Block until the worker thread exits
    ///
    /// The thread only exits after `Quit`, or after every handle (including
    /// this worker's own) is dropped; join after quitting.
    pub fn join(mut self) -> Result<(), JoinError> {
        let Some(thread) = self.thread.take() else {
            return Ok(());
        };
        drop(self);
        thread
            .join()
            .map_err(|payload| JoinError::Panicked(panic_message(payload.as_ref())))
    }
}

/// Cloneable caller-side handle to a worker
#[derive(Clone)]
pub struct WorkerHandle {
    config: Arc<WorkerConfig>,
    tasks: mpsc::Sender<QueuedTask>,
    control: Inbox,
    status: watch::Receiver<StatusReport>,
    ids: SequentialIdGen,
}

impl WorkerHandle {
    pub fn id(&self) -> u64 {
        self.config.id
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    fn queue(&self, task: Task) -> (TaskId, QueuedTask) {
        let id = self.ids.next();
        let queued = QueuedTask {
            id: id.clone(),
            task,
        };
        (id, queued)
    }

    fn submit_terminated(&self) -> SubmitError {
        SubmitError::Terminated {
            name: self.config.name.clone(),
        }
    }

    /// Queue a task, waiting while the queue is full
    pub async fn submit(&self, task: Task) -> Result<TaskId, SubmitError> {
        let (id, queued) = self.queue(task);
        self.tasks
            .send(queued)
            .await
            .map_err(|_| self.submit_terminated())?;
        Ok(id)
    }

    /// Queue a task without waiting; a full queue hands the task back
    pub fn try_submit(&self, task: Task) -> Result<TaskId, TrySubmitError> {
        let (id, queued) = self.queue(task);
        match self.tasks.try_send(queued) {
            Ok(()) => Ok(id),
            Err(mpsc::error::TrySendError::Full(queued)) => Err(TrySubmitError::Full(queued.task)),
            Err(mpsc::error::TrySendError::Closed(queued)) => {
                Err(TrySubmitError::Terminated(queued.task))
            }
        }
    }

    /// Blocking form of [`submit`](Self::submit); must not be called from async context
    pub fn blocking_submit(&self, task: Task) -> Result<TaskId, SubmitError> {
        let (id, queued) = self.queue(task);
        self.tasks
            .blocking_send(queued)
            .map_err(|_| self.submit_terminated())?;
        Ok(id)
    }

    /// Send a signal and wait for its acknowledgment
    pub async fn signal(&self, signal: Signal) -> Result<Transition, SignalError> {
        protocol::signal(&self.control, &self.config.name, signal).await
    }

    /// Send a signal and wait at most `wait` for its acknowledgment
    ///
    /// Enqueueing is not bounded; a timed-out signal is still applied.
    pub async fn try_signal(
        &self,
        signal: Signal,
        wait: Duration,
    ) -> Result<SignalOutcome, SignalError> {
        protocol::try_signal(&self.control, &self.config.name, signal, wait).await
    }

    /// [`try_signal`](Self::try_signal) with the configured signal timeout
    pub async fn try_signal_default(&self, signal: Signal) -> Result<SignalOutcome, SignalError> {
        self.try_signal(signal, self.config.signal_timeout).await
    }

    /// Blocking form of [`signal`](Self::signal); must not be called from async context
    pub fn blocking_signal(&self, signal: Signal) -> Result<Transition, SignalError> {
        protocol::blocking_signal(&self.control, &self.config.name, signal)
    }

    /// Send `Report` and return the resulting status
    pub async fn report(&self) -> Result<Status, SignalError> {
        Ok(self.signal(Signal::Report).await?.status())
    }

    /// Last snapshot the worker published to its status slot
    pub fn status(&self) -> StatusReport {
        *self.status.borrow()
    }

    /// Wait until the status slot reads `Terminated`
    pub async fn terminated(&self) -> StatusReport {
        let mut status = self.status.clone();
        if let Ok(report) = status
            .wait_for(|report| report.status == Status::Terminated)
            .await
        {
            return *report;
        }
        // The slot closes only when the worker thread has exited
        let report = *status.borrow();
        report
    }

    /// True once the control inbox is closed
    pub fn is_terminated(&self) -> bool {
        self.control.is_closed()
    }
}

impl std::fmt::Debug for WorkerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerHandle")
            .field("id", &self.config.id)
            .field("name", &self.config.name)
            .finish_non_exhaustive()
    }
}

/// Receiving end of a worker's fault queue
#[derive(Debug)]
pub struct FaultStream {
    rx: mpsc::Receiver<Fault>,
}

impl FaultStream {
    /// Next fault; `None` once the worker has terminated and the queue is drained
    pub async fn recv(&mut self) -> Option<Fault> {
        self.rx.recv().await
    }

    pub fn try_recv(&mut self) -> Option<Fault> {
        self.rx.try_recv().ok()
    }

    /// Blocking form of [`recv`](Self::recv); must not be called from async context
    pub fn blocking_recv(&mut self) -> Option<Fault> {
        self.rx.blocking_recv()
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
