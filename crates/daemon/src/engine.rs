// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dispatches one [`Request`] at a time against the supervisor's in-process
//! state: the job manager (`H`), the registry (`A`/`I`), and the process
//! supervisor (`J`). One [`AppState`] is shared by every connection.

use std::sync::Arc;
use std::time::Duration;

use msv_core::SystemClock;
use msv_health::LiveHealthProber;
use msv_installer::validate::validate;
use msv_jobs::JobManager;
use msv_registry::{PathLayout, RegistryError, RegistryStore};
use msv_shell::TokioCommandRunner;
use msv_supervisor::ProcessSupervisor;

use crate::protocol::{InstallLogsView, Request, Response, ValidateView};

pub struct AppState {
    pub layout: PathLayout,
    pub jobs: JobManager<SystemClock>,
    pub supervisor: ProcessSupervisor<SystemClock>,
}

impl AppState {
    pub fn new(layout: PathLayout) -> Self {
        let runner = Arc::new(TokioCommandRunner);
        let jobs = JobManager::new(runner.clone(), layout.clone());
        let supervisor =
            ProcessSupervisor::new(layout.clone(), runner, Arc::new(LiveHealthProber::default()));
        Self { layout, jobs, supervisor }
    }
}

/// Handle one request to completion. Never panics: every fallible path is
/// folded into `Response::Error` (`§7`) rather than propagated to the
/// connection loop.
pub async fn dispatch(state: &AppState, request: Request) -> Response {
    match request {
        Request::Ping => Response::Pong,

        Request::InstallStart { source_kind, uri, slug, name, .. } => {
            let job_id = state.jobs.create(slug, source_kind, uri, name);
            match state.jobs.start(job_id) {
                Ok(()) => Response::JobCreated { job_id },
                Err(err) => Response::Error { message: err.to_string() },
            }
        }
        Request::InstallLogs { job_id } => match state.jobs.get(job_id) {
            Some(snapshot) => Response::InstallLogs(InstallLogsView::from(&snapshot)),
            None => Response::Error { message: format!("unknown job {job_id}") },
        },
        Request::InstallCancel { job_id } => match state.jobs.cancel(job_id) {
            Ok(()) => Response::Ok,
            Err(err) => Response::Error { message: err.to_string() },
        },
        Request::InstallFinalize { job_id } => match state.jobs.finalize(job_id) {
            Ok(entry) => Response::ServerEntry { entry },
            Err(err) => Response::Error { message: err.to_string() },
        },
        Request::InstallList => Response::InstallList { jobs: state.jobs.list() },
        Request::InstallValidate { source_kind, uri } => {
            let report = validate(source_kind, &uri);
            Response::InstallValidate(ValidateView {
                ok: report.ok,
                problems: report.problems,
                suggested_slug: report.suggested_slug,
                runtime_hint: report.runtime_hint,
                manager_hint: report.manager_hint,
            })
        }

        Request::ServerStart { slug } => match state.supervisor.start(&slug) {
            Ok(()) => Response::Ok,
            Err(err) => Response::Error { message: err.to_string() },
        },
        Request::ServerStop { slug, grace_ms } => {
            let grace = grace_ms.map(Duration::from_millis).unwrap_or(msv_supervisor::DEFAULT_STOP_GRACE);
            match state.supervisor.stop(&slug, grace).await {
                Ok(()) => Response::Ok,
                Err(err) => Response::Error { message: err.to_string() },
            }
        }
        Request::ServerRestart { slug } => match state.supervisor.restart(&slug).await {
            Ok(()) => Response::Ok,
            Err(err) => Response::Error { message: err.to_string() },
        },
        Request::ServerSummary => Response::ServerSummary { rows: state.supervisor.summary() },
        Request::ServerInfo { slug } => match state.supervisor.info(&slug) {
            Ok(detail) => Response::ServerInfo { detail },
            Err(err) => Response::Error { message: err.to_string() },
        },
        Request::ServerSetEnv { slug, env } => match state.supervisor.set_env(&slug, env) {
            Ok(()) => Response::Ok,
            Err(err) => Response::Error { message: err.to_string() },
        },

        Request::SupervisorStats => Response::SupervisorStats { stats: state.supervisor.stats() },
        Request::SupervisorShutdown { deadline_ms } => {
            state.supervisor.shutdown(Duration::from_millis(deadline_ms)).await;
            Response::Ok
        }
    }
}

/// Open (creating if absent) the registry at `layout`, surfacing IO errors
/// the same way `§7` classifies every other registry failure.
pub fn load_registry(layout: &PathLayout) -> Result<RegistryStore, RegistryError> {
    layout.ensure_root()?;
    RegistryStore::load(layout.clone())
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
