// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `wh demo`

use anyhow::Result;
use clap::Args;
use std::hint::black_box;
use wh_engine::{Signal, Task, Worker, WorkerConfig, WorkerHandle};

#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Tasks queued before the worker starts
    #[arg(long, default_value_t = 1000)]
    pub tasks: u32,
}

/// Queue work, then report before starting, while draining, after pausing
/// and on quit. Prints one status per line.
pub async fn demo(args: DemoArgs) -> Result<()> {
    let worker = Worker::spawn(WorkerConfig::new(11, "hard-worker"))?;
    let handle = worker.handle().clone();

    queue_arithmetic(&handle, args.tasks).await?;
    println!("{}", handle.report().await?);

    handle.signal(Signal::Work).await?;
    println!("{}", handle.report().await?);

    handle.signal(Signal::Pause).await?;
    println!("{}", handle.report().await?);

    // Resume with more work queued behind; Quit cuts it short
    handle.signal(Signal::Work).await?;
    queue_arithmetic(&handle, args.tasks).await?;

    let quit = handle.signal(Signal::Quit).await?;
    println!("{}", quit.status());
    tracing::info!(%quit, "demo finished");

    drop(handle);
    super::join(worker).await
}

async fn queue_arithmetic(handle: &WorkerHandle, count: u32) -> Result<()> {
    for n in 0..count {
        let task = Task::new(move || {
            let sum = (0..=u64::from(n % 64)).fold(0u64, |acc, k| acc.wrapping_add(k * k));
            black_box(sum);
        });
        handle.submit(task).await?;
    }
    Ok(())
}
