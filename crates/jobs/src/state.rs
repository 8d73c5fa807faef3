// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mutable state of a single installation job, and the read-only snapshot
//! handed back to callers of [`crate::manager::JobManager::get`].

use msv_core::{InstallationResult, JobLogEntry, JobStatus, Stage, STAGE_WEIGHTS};
use serde::{Deserialize, Serialize};

/// Per-stage completion, 0-100, for every weighted stage (`§4.8`). Only the
/// stages in [`STAGE_WEIGHTS`] carry a slot; `Completed`/`Failed` are
/// terminal pseudo-stages with no progress of their own.
#[derive(Debug, Clone)]
pub struct StageProgress {
    entries: Vec<(Stage, u8)>,
}

impl StageProgress {
    pub fn new() -> Self {
        Self { entries: STAGE_WEIGHTS.iter().map(|(stage, _)| (*stage, 0)).collect() }
    }

    pub fn set(&mut self, stage: Stage, pct: u8) {
        if let Some(slot) = self.entries.iter_mut().find(|(s, _)| *s == stage) {
            slot.1 = pct.min(100);
        }
    }

    pub fn complete_through(&mut self, stage: Stage) {
        let mut reached = false;
        for (s, pct) in self.entries.iter_mut() {
            if *s == stage {
                reached = true;
                continue;
            }
            if !reached {
                *pct = 100;
            }
        }
    }

    pub fn complete_all(&mut self) {
        for (_, pct) in self.entries.iter_mut() {
            *pct = 100;
        }
    }

    /// Weighted sum of per-stage completion, in `[0, 100]`.
    pub fn overall(&self) -> u8 {
        let weighted: u32 = self
            .entries
            .iter()
            .map(|(stage, pct)| stage.weight() as u32 * *pct as u32)
            .sum();
        (weighted / 100).min(100) as u8
    }

    pub fn as_slice(&self) -> &[(Stage, u8)] {
        &self.entries
    }
}

impl Default for StageProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Mutable fields of an in-flight or terminal [`crate::job::JobEntry`].
/// Locked by a single mutex and read out via [`JobSnapshot`] — callers never
/// see a partially-updated view.
pub struct JobState {
    pub status: JobStatus,
    pub stage: Stage,
    pub progress: StageProgress,
    pub logs: Vec<JobLogEntry>,
    pub result: Option<InstallationResult>,
    pub error: Option<String>,
    pub started_at_ms: u64,
    pub ended_at_ms: Option<u64>,
    pub finalized: bool,
}

impl JobState {
    pub fn new(started_at_ms: u64) -> Self {
        Self {
            status: JobStatus::Pending,
            stage: Stage::Validation,
            progress: StageProgress::new(),
            logs: Vec::new(),
            result: None,
            error: None,
            started_at_ms,
            ended_at_ms: None,
            finalized: false,
        }
    }
}

/// A consistent, deep-copied view of a job at a point in time (`§4.8`:
/// "a consistent snapshot (deep copy of logs and mutable fields)").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSnapshot {
    pub id: msv_core::JobId,
    pub slug: msv_core::Slug,
    pub source_kind: msv_core::SourceKind,
    pub uri: String,
    pub status: JobStatus,
    pub stage: Stage,
    pub overall_progress: u8,
    pub per_stage_progress: Vec<(Stage, u8)>,
    pub logs: Vec<JobLogEntry>,
    pub result: Option<InstallationResult>,
    pub error: Option<String>,
    pub started_at_ms: u64,
    pub ended_at_ms: Option<u64>,
}

impl JobSnapshot {
    pub fn done(&self) -> bool {
        self.status.is_terminal()
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
