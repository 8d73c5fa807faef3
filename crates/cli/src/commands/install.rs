// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `msv install ...`: drives the installation job engine (`§6` "Installation
//! surface").

use std::io::Write as _;
use std::time::Duration;

use clap::{Args, Subcommand, ValueEnum};
use msv_core::{JobId, RuntimeKind, Slug, SourceKind};
use msv_daemon::{InstallLogsView, Request, Response, ValidateView};
use msv_registry::PathLayout;

use crate::client::DaemonClient;
use crate::exit_error::ExitError;
use crate::output::{format_or_json, handle_list, OutputFormat};

const POLL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Subcommand)]
pub enum InstallCommand {
    /// Start an installation job.
    Start(StartArgs),
    /// Show a job's logs and progress; `--follow` polls until it finishes.
    Logs {
        job_id: String,
        #[arg(long)]
        follow: bool,
    },
    /// Cancel a running (or pending) installation job.
    Cancel { job_id: String },
    /// Register a completed job's result as a server entry.
    Finalize { job_id: String },
    /// List known installation jobs.
    List,
    /// Stateless pre-flight check, mirroring the installer's first steps.
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
pub struct StartArgs {
    #[arg(long, value_enum)]
    source_kind: SourceKindArg,
    #[arg(long)]
    uri: String,
    #[arg(long)]
    slug: String,
    #[arg(long)]
    name: Option<String>,
    #[arg(long, value_enum)]
    runtime_hint: Option<RuntimeKindArg>,
    #[arg(long)]
    manager_hint: Option<String>,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[arg(long, value_enum)]
    source_kind: SourceKindArg,
    #[arg(long)]
    uri: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SourceKindArg {
    Git,
    JsPkg,
    PyPkg,
    ContainerImage,
    ContainerCompose,
}

impl From<SourceKindArg> for SourceKind {
    fn from(value: SourceKindArg) -> Self {
        match value {
            SourceKindArg::Git => SourceKind::Git,
            SourceKindArg::JsPkg => SourceKind::JsPkg,
            SourceKindArg::PyPkg => SourceKind::PyPkg,
            SourceKindArg::ContainerImage => SourceKind::ContainerImage,
            SourceKindArg::ContainerCompose => SourceKind::ContainerCompose,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RuntimeKindArg {
    Node,
    Python,
    Go,
    Rust,
    Binary,
    Container,
}

impl From<RuntimeKindArg> for RuntimeKind {
    fn from(value: RuntimeKindArg) -> Self {
        match value {
            RuntimeKindArg::Node => RuntimeKind::Node,
            RuntimeKindArg::Python => RuntimeKind::Python,
            RuntimeKindArg::Go => RuntimeKind::Go,
            RuntimeKindArg::Rust => RuntimeKind::Rust,
            RuntimeKindArg::Binary => RuntimeKind::Binary,
            RuntimeKindArg::Container => RuntimeKind::Container,
        }
    }
}

pub async fn run(
    command: InstallCommand,
    layout: &PathLayout,
    format: OutputFormat,
) -> Result<(), ExitError> {
    match command {
        InstallCommand::Start(args) => start(args, layout, format).await,
        InstallCommand::Logs { job_id, follow } => logs(job_id, follow, layout, format).await,
        InstallCommand::Cancel { job_id } => cancel(job_id, layout, format).await,
        InstallCommand::Finalize { job_id } => finalize(job_id, layout, format).await,
        InstallCommand::List => list(layout, format).await,
        InstallCommand::Validate(args) => validate(args, layout, format).await,
    }
}

async fn start(args: StartArgs, layout: &PathLayout, format: OutputFormat) -> Result<(), ExitError> {
    let slug = parse_slug(&args.slug)?;
    let request = Request::InstallStart {
        source_kind: args.source_kind.into(),
        uri: args.uri,
        slug,
        name: args.name,
        runtime_hint: args.runtime_hint.map(Into::into),
        manager_hint: args.manager_hint,
    };
    match call(layout, request).await? {
        Response::JobCreated { job_id } => {
            format_or_json(format, &job_id, || println!("started job {job_id}"))
                .map_err(|err| ExitError::new(1, err.to_string()))
        }
        other => Err(unexpected(other)),
    }
}

async fn logs(job_id: String, follow: bool, layout: &PathLayout, format: OutputFormat) -> Result<(), ExitError> {
    let job_id = parse_job_id(&job_id);
    let mut printed = 0usize;
    loop {
        let view = match call(layout, Request::InstallLogs { job_id }).await? {
            Response::InstallLogs(view) => view,
            other => return Err(unexpected(other)),
        };
        if follow && format == OutputFormat::Text {
            for entry in view.logs.iter().skip(printed) {
                println!("[{}] {} {}", entry.stage, entry.level, entry.message);
            }
            printed = view.logs.len();
            if !view.done {
                tokio::time::sleep(POLL_INTERVAL).await;
                continue;
            }
            println!(
                "stage={} progress={}% done success={:?}",
                view.stage, view.overall_progress, view.success
            );
            return Ok(());
        }
        return print_logs_view(view, format);
    }
}

fn print_logs_view(view: InstallLogsView, format: OutputFormat) -> Result<(), ExitError> {
    format_or_json(format, &view, || {
        for entry in &view.logs {
            println!("[{}] {} {}", entry.stage, entry.level, entry.message);
        }
        println!(
            "stage={} progress={}% done={} success={:?}",
            view.stage, view.overall_progress, view.done, view.success
        );
    })
    .map_err(|err| ExitError::new(1, err.to_string()))
}

async fn cancel(job_id: String, layout: &PathLayout, format: OutputFormat) -> Result<(), ExitError> {
    let job_id = parse_job_id(&job_id);
    match call(layout, Request::InstallCancel { job_id }).await? {
        Response::Ok => format_or_json(format, &(), || println!("cancelled {job_id}"))
            .map_err(|err| ExitError::new(1, err.to_string())),
        other => Err(unexpected(other)),
    }
}

async fn finalize(job_id: String, layout: &PathLayout, format: OutputFormat) -> Result<(), ExitError> {
    let job_id = parse_job_id(&job_id);
    match call(layout, Request::InstallFinalize { job_id }).await? {
        Response::ServerEntry { entry } => format_or_json(format, &entry, || {
            println!("registered {} ({})", entry.slug, entry.name);
        })
        .map_err(|err| ExitError::new(1, err.to_string())),
        other => Err(unexpected(other)),
    }
}

async fn list(layout: &PathLayout, format: OutputFormat) -> Result<(), ExitError> {
    match call(layout, Request::InstallList).await? {
        Response::InstallList { jobs } => {
            handle_list(format, &jobs, "no installation jobs", |jobs, out| {
                for job in jobs {
                    let _ = writeln!(out, "{}\t{}\t{}\t{}%", job.id, job.slug, job.status, job.overall_progress);
                }
            })
            .map_err(|err| ExitError::new(1, err.to_string()))
        }
        other => Err(unexpected(other)),
    }
}

async fn validate(args: ValidateArgs, layout: &PathLayout, format: OutputFormat) -> Result<(), ExitError> {
    let request = Request::InstallValidate { source_kind: args.source_kind.into(), uri: args.uri };
    match call(layout, request).await? {
        Response::InstallValidate(view) => print_validate_view(view, format),
        other => Err(unexpected(other)),
    }
}

fn print_validate_view(view: ValidateView, format: OutputFormat) -> Result<(), ExitError> {
    format_or_json(format, &view, || {
        println!("ok={}", view.ok);
        for problem in &view.problems {
            println!("  - {problem}");
        }
        if let Some(slug) = &view.suggested_slug {
            println!("suggested slug: {slug}");
        }
    })
    .map_err(|err| ExitError::new(1, err.to_string()))
}

fn parse_slug(raw: &str) -> Result<Slug, ExitError> {
    Slug::new(raw).map_err(|err| ExitError::new(2, err.to_string()))
}

fn parse_job_id(raw: &str) -> JobId {
    JobId::from_string(raw)
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
