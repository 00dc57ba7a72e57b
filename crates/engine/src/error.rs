// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the worker engine

use crate::task::Task;
use thiserror::Error;
use wh_core::ConfigError;

/// Errors returned to a signal issuer
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignalError {
    /// The control inbox is closed, or the request was dropped unanswered
    #[error("worker {name} already terminated")]
    Terminated { name: String },
}

/// Errors returned by a blocking task submission
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("worker {name} already terminated")]
    Terminated { name: String },
}

/// Errors returned by a non-blocking task submission; the task is handed back
#[derive(Debug, Error)]
pub enum TrySubmitError {
    #[error("task queue is full")]
    Full(Task),
    #[error("worker already terminated")]
    Terminated(Task),
}

impl TrySubmitError {
    /// Recover the task that could not be queued
    pub fn into_task(self) -> Task {
        match self {
            Self::Full(task) | Self::Terminated(task) => task,
        }
    }
}

/// Errors that can occur starting a worker
#[derive(Debug, Error)]
pub enum SpawnError {
    #[error("invalid worker config: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to build worker runtime: {0}")]
    Runtime(#[source] std::io::Error),
    #[error("failed to spawn worker thread: {0}")]
    Thread(#[source] std::io::Error),
}

/// Errors returned when joining the worker thread
#[derive(Debug, Error)]
pub enum JoinError {
    #[error("worker thread panicked: {0}")]
    Panicked(String),
}
