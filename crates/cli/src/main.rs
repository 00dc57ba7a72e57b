// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! wh - workaholic CLI

mod commands;
mod completions;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, demo, run};
use completions::CompletionsArgs;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "wh",
    version,
    about = "workaholic - a single worker driven by control signals"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk one worker through its lifecycle
    Demo(demo::DemoArgs),
    /// Drain a batch of tasks while polling the worker
    Run(run::RunArgs),
    /// Show the effective worker configuration
    Config(config::ConfigArgs),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging();
    quiet_worker_panics();

    match cli.command {
        Commands::Demo(args) => demo::demo(args).await,
        Commands::Run(args) => run::run(args).await,
        Commands::Config(args) => config::config(args),
        Commands::Completions(args) => {
            completions::generate_completions::<Cli>(args.shell);
            Ok(())
        }
    }
}

/// Log to stderr, filtered by `WH_LOG` (default `warn`)
fn setup_logging() {
    let filter = EnvFilter::try_from_env("WH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Task panics on worker threads are reported as faults, so keep them off
/// stderr. Panics anywhere else still reach the default hook.
fn quiet_worker_panics() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let on_worker = std::thread::current()
            .name()
            .is_some_and(|name| name.starts_with("wh-"));
        if on_worker {
            tracing::debug!(%info, "task panicked");
        } else {
            default_hook(info);
        }
    }));
}
