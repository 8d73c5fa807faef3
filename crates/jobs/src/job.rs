// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The job engine is the sole owner of a [`JobEntry`]: the worker holds only
//! its `JobId` and looks the entry up through the manager, avoiding the
//! cyclic job/worker ownership the design notes call out.

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use msv_core::{JobId, Slug, SourceKind};

use crate::state::{JobSnapshot, JobState};

pub struct JobEntry {
    pub id: JobId,
    pub slug: Slug,
    pub name: String,
    pub source_kind: SourceKind,
    pub uri: String,
    pub state: Mutex<JobState>,
    pub cancel: CancellationToken,
}

impl JobEntry {
    pub fn new(
        id: JobId,
        slug: Slug,
        name: String,
        source_kind: SourceKind,
        uri: String,
        started_at_ms: u64,
    ) -> Self {
        Self {
            id,
            slug,
            name,
            source_kind,
            uri,
            state: Mutex::new(JobState::new(started_at_ms)),
            cancel: CancellationToken::new(),
        }
    }

    pub fn snapshot(&self) -> JobSnapshot {
        let state = self.state.lock();
        JobSnapshot {
            id: self.id,
            slug: self.slug.clone(),
            source_kind: self.source_kind,
            uri: self.uri.clone(),
            status: state.status,
            stage: state.stage,
            overall_progress: state.progress.overall(),
            per_stage_progress: state.progress.as_slice().to_vec(),
            logs: state.logs.clone(),
            result: state.result.clone(),
            error: state.error.clone(),
            started_at_ms: state.started_at_ms,
            ended_at_ms: state.ended_at_ms,
        }
    }
}
