// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Adapts a [`JobEntry`]'s mutable state to the installer's
//! [`InstallLogSink`] seam, translating each logged stage transition into a
//! progress update without the installer crate knowing anything about jobs.

use msv_core::{Clock, LogLevel, Stage};
use msv_installer::InstallLogSink;

use crate::job::JobEntry;

pub struct JobLogSink<'a, C: Clock> {
    pub job: &'a JobEntry,
    pub clock: &'a C,
}

impl<'a, C: Clock> InstallLogSink for JobLogSink<'a, C> {
    fn log(&self, stage: Stage, level: LogLevel, message: &str) {
        let mut state = self.job.state.lock();
        if state.stage != stage {
            state.progress.complete_through(stage);
            state.stage = stage;
        }
        state.logs.push(msv_core::JobLogEntry {
            timestamp_ms: self.clock.epoch_ms(),
            level,
            stage,
            message: message.to_string(),
        });
        tracing::debug!(job_id = %self.job.id, %stage, %level, message, "job log");
    }
}

#[cfg(test)]
#[path = "log_sink_tests.rs"]
mod tests;
