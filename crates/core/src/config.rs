// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker configuration
//!
//! Fixed at construction; a spawned worker never observes a change.
//!
//! ```toml
//! id = 11
//! name = "hard-worker"
//! task_capacity = 1024
//! fault_capacity = 64
//! fault_policy = "pause"
//! signal_timeout = "250ms"
//! ```

use crate::fault::FaultPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("worker name must not be empty")]
    EmptyName,
    #[error("{0} must be greater than zero")]
    ZeroCapacity(&'static str),
    #[error("signal timeout must be greater than zero")]
    ZeroTimeout,
}

/// Identity and queue sizing of a single worker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkerConfig {
    /// Caller-assigned worker id
    pub id: u64,
    /// Caller-assigned worker name
    pub name: String,
    /// Bound of the task queue; submitters wait when it is full
    pub task_capacity: usize,
    /// Bound of the control inbox
    pub control_capacity: usize,
    /// Bound of the fault queue; the worker waits when it is full
    pub fault_capacity: usize,
    pub fault_policy: FaultPolicy,
    /// Default deadline for bounded-wait signalling
    #[serde(with = "humantime_serde")]
    pub signal_timeout: Duration,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            id: 0,
            name: "worker".to_string(),
            task_capacity: 1024,
            control_capacity: 8,
            fault_capacity: 64,
            fault_policy: FaultPolicy::Continue,
            signal_timeout: Duration::from_millis(250),
        }
    }
}

impl WorkerConfig {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_task_capacity(self, task_capacity: usize) -> Self {
        Self {
            task_capacity,
            ..self
        }
    }

    pub fn with_control_capacity(self, control_capacity: usize) -> Self {
        Self {
            control_capacity,
            ..self
        }
    }

    pub fn with_fault_capacity(self, fault_capacity: usize) -> Self {
        Self {
            fault_capacity,
            ..self
        }
    }

    pub fn with_fault_policy(self, fault_policy: FaultPolicy) -> Self {
        Self {
            fault_policy,
            ..self
        }
    }

    pub fn with_signal_timeout(self, signal_timeout: Duration) -> Self {
        Self {
            signal_timeout,
            ..self
        }
    }

    /// Reject configurations a worker cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if self.task_capacity == 0 {
            return Err(ConfigError::ZeroCapacity("task_capacity"));
        }
        if self.control_capacity == 0 {
            return Err(ConfigError::ZeroCapacity("control_capacity"));
        }
        if self.fault_capacity == 0 {
            return Err(ConfigError::ZeroCapacity("fault_capacity"));
        }
        if self.signal_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    /// Parse and validate a TOML document; absent keys take defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: WorkerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
