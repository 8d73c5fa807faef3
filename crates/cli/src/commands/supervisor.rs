// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `msv supervisor ...`: fleet-wide counters and shutdown (`§6`).

use clap::Subcommand;
use msv_daemon::{Request, Response};
use msv_registry::PathLayout;

use crate::client::DaemonClient;
use crate::exit_error::ExitError;
use crate::output::{format_or_json, OutputFormat};

#[derive(Debug, Subcommand)]
pub enum SupervisorCommand {
    /// Fleet-wide counters.
    Stats,
    /// Stop every supervised process and exit `msvd`.
    Shutdown {
        #[arg(long, default_value_t = 5000)]
        deadline_ms: u64,
    },
}

pub async fn run(command: SupervisorCommand, layout: &PathLayout, format: OutputFormat) -> Result<(), ExitError> {
    match command {
        SupervisorCommand::Stats => stats(layout, format).await,
        SupervisorCommand::Shutdown { deadline_ms } => shutdown(deadline_ms, layout, format).await,
    }
}

async fn stats(layout: &PathLayout, format: OutputFormat) -> Result<(), ExitError> {
    match call(layout, Request::SupervisorStats).await? {
        Response::SupervisorStats { stats } => format_or_json(format, &stats, || {
            println!(
                "total={} running={} stopped={} failed={} starts={} stops={} restarts={}",
                stats.total_processes,
                stats.running,
                stats.stopped,
                stats.failed,
                stats.total_starts,
                stats.total_stops,
                stats.total_restarts
            );
        })
        .map_err(|err| ExitError::new(1, err.to_string())),
        other => Err(unexpected(other)),
    }
}

async fn shutdown(deadline_ms: u64, layout: &PathLayout, format: OutputFormat) -> Result<(), ExitError> {
    match call(layout, Request::SupervisorShutdown { deadline_ms }).await? {
        Response::Ok => format_or_json(format, &(), || println!("msvd shutting down"))
            .map_err(|err| ExitError::new(1, err.to_string())),
        other => Err(unexpected(other)),
    }
}

async fn call(layout: &PathLayout, request: Request) -> Result<Response, ExitError> {
    let client = DaemonClient::connect(layout).await.map_err(|err| ExitError::new(1, err.to_string()))?;
    client.call(request).await.map_err(|err| ExitError::new(1, err.to_string()))
}

fn unexpected(response: Response) -> ExitError {
    match response {
        Response::Error { message } => ExitError::new(1, message),
        other => ExitError::new(1, format!("unexpected response: {other:?}")),
    }
}
