// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use msv_core::{JobId, JobLogEntry, RuntimeKind, ServerEntry, Stage};
use msv_jobs::JobSnapshot;
use msv_supervisor::{ProcessSnapshot, SupervisorStats};
use serde::{Deserialize, Serialize};

/// Reply from `msvd` to a [`super::Request`]. `Error` is the one variant
/// every operation can return in place of its success shape (`§7`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op")]
pub enum Response {
    Pong,
    Ok,
    Error { message: String },

    JobCreated { job_id: JobId },
    InstallLogs(InstallLogsView),
    InstallList { jobs: Vec<JobSnapshot> },
    InstallValidate(ValidateView),
    ServerEntry { entry: ServerEntry },

    ServerSummary { rows: Vec<ProcessSnapshot> },
    ServerInfo { detail: ProcessSnapshot },

    SupervisorStats { stats: SupervisorStats },
}

/// `install.logs(jobId) → {stage, overallProgress, logs[], done, success?, message?}` (`§6`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InstallLogsView {
    pub stage: Stage,
    pub overall_progress: u8,
    pub logs: Vec<JobLogEntry>,
    pub done: bool,
    pub success: Option<bool>,
    pub message: Option<String>,
}

impl From<&JobSnapshot> for InstallLogsView {
    fn from(snapshot: &JobSnapshot) -> Self {
        Self {
            stage: snapshot.stage,
            overall_progress: snapshot.overall_progress,
            logs: snapshot.logs.clone(),
            done: snapshot.done(),
            success: snapshot.done().then_some(snapshot.error.is_none()),
            message: snapshot.error.clone(),
        }
    }
}

/// `install.validate({sourceKind, uri}) → {ok, problems[], suggestedSlug, runtimeHint?, managerHint?}` (`§6`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidateView {
    pub ok: bool,
    pub problems: Vec<String>,
    pub suggested_slug: Option<String>,
    pub runtime_hint: Option<RuntimeKind>,
    pub manager_hint: Option<String>,
}

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;
