// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `wh run`

use crate::output::{self, OutputFormat};
use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::oneshot;
use wh_engine::{
    Fault, FaultStream, Signal, SignalOutcome, Task, Transition, Worker, WorkerHandle,
    WorkerState, WorkerStats,
};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Worker config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of tasks to submit
    #[arg(long, default_value_t = 100)]
    pub tasks: u32,

    /// Every K-th task panics (0 = none)
    #[arg(long, default_value_t = 0)]
    pub fail_every: u32,

    /// Simulated work per task, in milliseconds
    #[arg(long, default_value_t = 1)]
    pub task_ms: u64,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

/// Outcome of a `wh run`
#[derive(Debug, Serialize)]
struct RunReport {
    worker_id: u64,
    worker_name: String,
    /// Tasks submitted, not counting the barrier
    submitted: u32,
    transitions: Vec<Transition>,
    /// Bounded-wait reports that got no reply in time
    timeouts: u32,
    faults: Vec<Fault>,
    stats: WorkerStats,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for transition in &self.transitions {
            writeln!(f, "{transition}")?;
        }
        for fault in &self.faults {
            writeln!(f, "fault: {fault}")?;
        }
        if self.timeouts > 0 {
            writeln!(f, "reports timed out: {}", self.timeouts)?;
        }
        write!(
            f,
            "worker {} ({}): {} tasks and a barrier submitted, {} completed, {} faulted",
            self.worker_id,
            self.worker_name,
            self.submitted,
            self.stats.completed,
            self.stats.faulted
        )
    }
}

pub async fn run(args: RunArgs) -> Result<()> {
    let config = super::load_config(args.config.as_deref(), "runner")?;
    let poll = config.signal_timeout;

    let mut worker = Worker::spawn(config)?;
    let handle = worker.handle().clone();
    let collector = worker.take_faults().map(|faults| tokio::spawn(collect(faults)));

    // The queue may be smaller than the batch; submit alongside the polling
    let (done, mut drained) = oneshot::channel();
    let producer = tokio::spawn(produce(
        handle.clone(),
        args.tasks,
        args.fail_every,
        args.task_ms,
        done,
    ));

    let mut report = RunReport {
        worker_id: handle.id(),
        worker_name: handle.name().to_string(),
        submitted: args.tasks,
        transitions: Vec::new(),
        timeouts: 0,
        faults: Vec::new(),
        stats: WorkerStats::default(),
    };

    report.transitions.push(handle.signal(Signal::Work).await?);

    loop {
        tokio::select! {
            _ = &mut drained => break,
            _ = tokio::time::sleep(poll) => {
                poll_once(&handle, &mut report).await?;
            }
        }
    }

    producer.await??;

    report.transitions.push(handle.signal(Signal::Pause).await?);
    report.transitions.push(handle.signal(Signal::Report).await?);
    let quit = handle.signal(Signal::Quit).await?;
    report.stats = quit.stats;
    report.transitions.push(quit);

    drop(handle);
    super::join(worker).await?;
    if let Some(collector) = collector {
        report.faults = collector.await?;
    }

    output::print(&report, args.format)
}

/// Bounded-wait `Report`; a worker resting after a fault is put back to work
async fn poll_once(handle: &WorkerHandle, report: &mut RunReport) -> Result<()> {
    match handle.try_signal_default(Signal::Report).await? {
        SignalOutcome::Acknowledged(transition) => {
            report.transitions.push(transition);
            if transition.to == WorkerState::Idle {
                tracing::info!("worker rested after a fault, resuming");
                report.transitions.push(handle.signal(Signal::Work).await?);
            }
        }
        SignalOutcome::TimedOut => report.timeouts += 1,
    }
    Ok(())
}

/// Submit the batch followed by a barrier that fires once everything
/// before it has been invoked
async fn produce(
    handle: WorkerHandle,
    count: u32,
    fail_every: u32,
    task_ms: u64,
    done: oneshot::Sender<()>,
) -> Result<()> {
    let pause = Duration::from_millis(task_ms);
    for n in 1..=count {
        let fails = fail_every > 0 && n % fail_every == 0;
        let task = Task::new(move || {
            std::thread::sleep(pause);
            if fails {
                fail(n);
            }
        })
        .with_label(format!("job-{n}"));
        handle.submit(task).await?;
    }

    let barrier = Task::new(move || {
        let _ = done.send(());
    })
    .with_label("barrier");
    handle.submit(barrier).await?;
    Ok(())
}

#[allow(clippy::panic)]
fn fail(n: u32) {
    panic!("job {n} gave up");
}

async fn collect(mut faults: FaultStream) -> Vec<Fault> {
    let mut seen = Vec::new();
    while let Some(fault) = faults.recv().await {
        tracing::debug!(%fault, "fault received");
        seen.push(fault);
    }
    seen
}
