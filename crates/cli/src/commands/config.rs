// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `wh config`

use crate::output::{self, OutputFormat};
use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use wh_engine::WorkerConfig;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Worker config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

pub fn config(args: ConfigArgs) -> Result<()> {
    let config = super::load_config(args.config.as_deref(), "worker")?;
    output::print(&ConfigView(config), args.format)
}

#[derive(Serialize)]
#[serde(transparent)]
struct ConfigView(WorkerConfig);

impl fmt::Display for ConfigView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.0;
        writeln!(f, "id:               {}", c.id)?;
        writeln!(f, "name:             {}", c.name)?;
        writeln!(f, "task_capacity:    {}", c.task_capacity)?;
        writeln!(f, "control_capacity: {}", c.control_capacity)?;
        writeln!(f, "fault_capacity:   {}", c.fault_capacity)?;
        writeln!(f, "fault_policy:     {}", c.fault_policy)?;
        write!(
            f,
            "signal_timeout:   {}",
            humantime::format_duration(c.signal_timeout)
        )
    }
}
