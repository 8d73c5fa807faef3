// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `msv server ...`: drives the process supervisor (`§6` "Supervisor surface").

use std::collections::HashMap;
use std::io::Write as _;

use clap::Subcommand;
use msv_daemon::{Request, Response};
use msv_registry::PathLayout;

use crate::client::DaemonClient;
use crate::exit_error::ExitError;
use crate::output::{format_or_json, handle_list, OutputFormat};

#[derive(Debug, Subcommand)]
pub enum ServerCommand {
    /// Start a registered server.
    Start { slug: String },
    /// Stop a running server, terminating forcibly after the grace period.
    Stop {
        slug: String,
        #[arg(long)]
        grace_ms: Option<u64>,
    },
    /// Stop then start a server.
    Restart { slug: String },
    /// List every known server with its lifecycle and health summary.
    Summary,
    /// Detailed snapshot for one server.
    Info { slug: String },
    /// Replace a server's environment, effective on its next start.
    SetEnv {
        slug: String,
        /// `KEY=VALUE`, repeatable.
        #[arg(long = "env", value_parser = parse_env_pair)]
        env: Vec<(String, String)>,
    },
}

pub async fn run(command: ServerCommand, layout: &PathLayout, format: OutputFormat) -> Result<(), ExitError> {
    match command {
        ServerCommand::Start { slug } => start(slug, layout, format).await,
        ServerCommand::Stop { slug, grace_ms } => stop(slug, grace_ms, layout, format).await,
        ServerCommand::Restart { slug } => restart(slug, layout, format).await,
        ServerCommand::Summary => summary(layout, format).await,
        ServerCommand::Info { slug } => info(slug, layout, format).await,
        ServerCommand::SetEnv { slug, env } => set_env(slug, env, layout, format).await,
    }
}

async fn start(slug: String, layout: &PathLayout, format: OutputFormat) -> Result<(), ExitError> {
    let slug = parse_slug(&slug)?;
    ok_or_error(call(layout, Request::ServerStart { slug: slug.clone() }).await?, format, || {
        println!("started {slug}")
    })
}

async fn stop(slug: String, grace_ms: Option<u64>, layout: &PathLayout, format: OutputFormat) -> Result<(), ExitError> {
    let slug = parse_slug(&slug)?;
    ok_or_error(call(layout, Request::ServerStop { slug: slug.clone(), grace_ms }).await?, format, || {
        println!("stopped {slug}")
    })
}

async fn restart(slug: String, layout: &PathLayout, format: OutputFormat) -> Result<(), ExitError> {
    let slug = parse_slug(&slug)?;
    ok_or_error(call(layout, Request::ServerRestart { slug: slug.clone() }).await?, format, || {
        println!("restarted {slug}")
    })
}

async fn summary(layout: &PathLayout, format: OutputFormat) -> Result<(), ExitError> {
    match call(layout, Request::ServerSummary).await? {
        Response::ServerSummary { rows } => {
            handle_list(format, &rows, "no servers", |rows, out| {
                for row in rows {
                    let _ = writeln!(
                        out,
                        "{}\t{}\t{}\tpid={:?}\trestarts={}",
                        row.slug, row.lifecycle, row.health, row.pid, row.restarts
                    );
                }
            })
            .map_err(|err| ExitError::new(1, err.to_string()))
        }
        other => Err(unexpected(other)),
    }
}

async fn info(slug: String, layout: &PathLayout, format: OutputFormat) -> Result<(), ExitError> {
    let slug = parse_slug(&slug)?;
    match call(layout, Request::ServerInfo { slug }).await? {
        Response::ServerInfo { detail } => format_or_json(format, &detail, || {
            println!(
                "{}\t{}\t{}\tpid={:?}\tuptime={:?}s\trestarts={}\tcpu={:.1}%\tram={}B",
                detail.slug,
                detail.lifecycle,
                detail.health,
                detail.pid,
                detail.uptime_sec,
                detail.restarts,
                detail.cpu_percent,
                detail.ram_bytes
            );
        })
        .map_err(|err| ExitError::new(1, err.to_string())),
        other => Err(unexpected(other)),
    }
}

async fn set_env(
    slug: String,
    env: Vec<(String, String)>,
    layout: &PathLayout,
    format: OutputFormat,
) -> Result<(), ExitError> {
    let slug = parse_slug(&slug)?;
    let env: HashMap<String, String> = env.into_iter().collect();
    ok_or_error(call(layout, Request::ServerSetEnv { slug: slug.clone(), env }).await?, format, || {
        println!("updated env for {slug}")
    })
}

fn ok_or_error(response: Response, format: OutputFormat, text_fn: impl FnOnce()) -> Result<(), ExitError> {
    match response {
        Response::Ok => {
            format_or_json(format, &(), text_fn).map_err(|err| ExitError::new(1, err.to_string()))
        }
        other => Err(unexpected(other)),
    }
}

fn parse_slug(raw: &str) -> Result<msv_core::Slug, ExitError> {
    msv_core::Slug::new(raw).map_err(|err| ExitError::new(2, err.to_string()))
}

fn parse_env_pair(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got {raw:?}"))
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
