// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # Agent Manager CLI
//!
//! The `agent-manager` binary serves the build callback API and renders
//! workload templates offline.
//!
//! ## Commands
//!
//! - `agent-manager serve` - Run the HTTP service
//! - `agent-manager render` - Render a workload specification file to YAML
//! - `agent-manager config show|validate|generate` - Configuration management

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

use commands::{ConfigCommand, RenderArgs, ServeArgs};

/// Agent Manager - build callback service for platform-built agents
#[derive(Parser)]
#[command(name = "agent-manager")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(
        short,
        long,
        global = true,
        env = "AGENT_MANAGER_CONFIG_PATH",
        value_name = "FILE"
    )]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); defaults to the config file value
    #[arg(long, global = true, env = "AGENT_MANAGER_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the build callback HTTP service
    #[command(name = "serve")]
    Serve(ServeArgs),

    /// Render a workload specification file into a Workload template
    #[command(name = "render")]
    Render(RenderArgs),

    /// Configuration management
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => commands::serve::run(args, cli.config, cli.log_level).await,
        Commands::Render(args) => {
            init_logging(cli.log_level.as_deref().unwrap_or("warn"))?;
            commands::render::run(args)
        }
        Commands::Config { command } => {
            init_logging(cli.log_level.as_deref().unwrap_or("warn"))?;
            commands::config::handle_command(command, cli.config)
        }
    }
}

/// Log level from `--log-level` / `AGENT_MANAGER_LOG_LEVEL`, then the config
/// file, then `info`. `RUST_LOG` still wins inside `init_logging`.
pub(crate) fn resolve_log_level(cli_level: Option<String>, file_level: Option<String>) -> String {
    cli_level
        .filter(|level| !level.is_empty())
        .or(file_level)
        .unwrap_or_else(|| "info".to_string())
}

/// Initialize tracing subscriber for logging
pub(crate) fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    Ok(())
}
