// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `msv`: the command-line client for `msvd`, the local MCP server
//! supervisor daemon.

mod client;
mod color;
mod commands;
mod exit_error;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use commands::install::InstallCommand;
use commands::server::ServerCommand;
use commands::supervisor::SupervisorCommand;
use exit_error::ExitError;
use msv_registry::PathLayout;
use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "msv", version, about = "Local supervisor for MCP servers", styles = color::styles())]
struct Cli {
    #[arg(long, value_enum, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Drive the installation job engine.
    #[command(subcommand)]
    Install(InstallCommand),
    /// Drive the process supervisor for a single server.
    #[command(subcommand)]
    Server(ServerCommand),
    /// Fleet-wide counters and shutdown.
    #[command(subcommand)]
    Supervisor(SupervisorCommand),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("msv: {err}");
            ExitCode::from(err.code.clamp(0, 255) as u8)
        }
    }
}

async fn run(cli: Cli) -> Result<(), ExitError> {
    let layout = PathLayout::discover().map_err(|err| ExitError::new(1, err.to_string()))?;
    layout.ensure_root().map_err(|err| ExitError::new(1, err.to_string()))?;

    match cli.command {
        Command::Install(command) => commands::install::run(command, &layout, cli.format).await,
        Command::Server(command) => commands::server::run(command, &layout, cli.format).await,
        Command::Supervisor(command) => commands::supervisor::run(command, &layout, cli.format).await,
    }
}
