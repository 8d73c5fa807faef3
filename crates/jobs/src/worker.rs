// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The job worker: drives one [`Installer`] to completion (or cancellation)
//! against a single [`JobEntry`]. Owned entirely by [`crate::manager`] — the
//! worker only ever sees an `Arc<JobEntry>`, never the job map itself.

use std::sync::Arc;

use msv_core::{Clock, JobLogEntry, JobStatus, LogLevel, Source, Stage};
use msv_installer::{InstallContext, Installer};
use msv_registry::PathLayout;
use msv_shell::CommandRunner;

use crate::job::JobEntry;
use crate::log_sink::JobLogSink;

/// Run `installer` against `job`, racing it against the job's cancellation
/// token. Terminal state (`Completed`/`Failed`/`Cancelled`) is always set
/// before this returns — the caller (the manager) only needs to decrement
/// its running-job count.
pub(crate) async fn run<C: Clock>(
    job: Arc<JobEntry>,
    installer: Box<dyn Installer>,
    runner: Arc<dyn CommandRunner>,
    layout: PathLayout,
    clock: C,
) {
    {
        let mut state = job.state.lock();
        state.status = JobStatus::Running;
    }

    let source = Source { kind: job.source_kind, uri: job.uri.clone() };
    let ctx = InstallContext {
        slug: job.slug.clone(),
        source,
        install_dir: layout.install_dir(&job.slug),
        cancel: job.cancel.clone(),
    };
    let sink = JobLogSink { job: job.as_ref(), clock: &clock };

    let install_fut = installer.install(&ctx, runner.as_ref(), &sink);
    tokio::pin!(install_fut);

    let outcome = tokio::select! {
        biased;
        _ = job.cancel.cancelled() => None,
        result = &mut install_fut => Some(result),
    };

    let mut state = job.state.lock();
    state.ended_at_ms = Some(clock.epoch_ms());
    match outcome {
        None => {
            state.status = JobStatus::Cancelled;
            state.logs.push(JobLogEntry {
                timestamp_ms: clock.epoch_ms(),
                level: LogLevel::Warning,
                stage: state.stage,
                message: "job cancelled".to_string(),
            });
        }
        Some(Ok(result)) => {
            state.status = JobStatus::Completed;
            state.stage = Stage::Completed;
            state.progress.complete_all();
            state.result = Some(result);
        }
        Some(Err(err)) => {
            let message = err.to_string();
            state.status = JobStatus::Failed;
            state.stage = Stage::Failed;
            state.error = Some(message.clone());
            state.logs.push(JobLogEntry {
                timestamp_ms: clock.epoch_ms(),
                level: LogLevel::Error,
                stage: Stage::Failed,
                message,
            });
        }
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
