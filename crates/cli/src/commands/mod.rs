// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod config;
pub mod demo;
pub mod run;

use anyhow::{Context, Result};
use std::path::Path;
use wh_engine::{Worker, WorkerConfig};

/// Load `path`, or fall back to defaults named `name`
pub fn load_config(path: Option<&Path>, name: &str) -> Result<WorkerConfig> {
    match path {
        Some(path) => WorkerConfig::load(path)
            .with_context(|| format!("invalid worker config {}", path.display())),
        None => Ok(WorkerConfig {
            name: name.to_string(),
            ..WorkerConfig::default()
        }),
    }
}

/// Join the worker thread without blocking the runtime
pub async fn join(worker: Worker) -> Result<()> {
    tokio::task::spawn_blocking(move || worker.join()).await??;
    Ok(())
}
