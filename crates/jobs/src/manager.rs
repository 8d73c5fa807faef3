// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job manager: holds every in-flight and recently-terminal
//! [`InstallationJob`](msv_core) in memory, bounds how many run
//! concurrently, and reaps old ones on a timer.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;

use msv_core::{Clock, JobId, JobStatus, ServerEntry, Slug, SourceKind, SystemClock, TransportKind};
use msv_registry::PathLayout;
use msv_shell::CommandRunner;

use crate::error::JobError;
use crate::job::JobEntry;
use crate::state::JobSnapshot;
use crate::worker;

/// Default cap on simultaneously running installation jobs (`§4.8`).
pub const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Default retention window for terminal jobs before the reaper drops them.
pub const DEFAULT_RETENTION: Duration = Duration::from_secs(24 * 60 * 60);

pub struct JobManager<C: Clock = SystemClock> {
    jobs: RwLock<HashMap<JobId, Arc<JobEntry>>>,
    running: Arc<AtomicUsize>,
    max_concurrent: usize,
    retention: Duration,
    runner: Arc<dyn CommandRunner>,
    layout: PathLayout,
    clock: C,
}

impl JobManager<SystemClock> {
    pub fn new(runner: Arc<dyn CommandRunner>, layout: PathLayout) -> Self {
        Self::with_clock(runner, layout, SystemClock)
    }
}

impl<C: Clock + 'static> JobManager<C> {
    pub fn with_clock(runner: Arc<dyn CommandRunner>, layout: PathLayout, clock: C) -> Self {
        Self {
            jobs: RwLock::new(HashMap::new()),
            running: Arc::new(AtomicUsize::new(0)),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            retention: DEFAULT_RETENTION,
            runner,
            layout,
            clock,
        }
    }

    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent;
        self
    }

    pub fn with_retention(mut self, retention: Duration) -> Self {
        self.retention = retention;
        self
    }

    /// Create a new `Pending` job. Always succeeds (`§4.8`).
    pub fn create(&self, slug: Slug, source_kind: SourceKind, uri: String, name: Option<String>) -> JobId {
        let id = JobId::new();
        let name = name.unwrap_or_else(|| slug.as_str().to_string());
        let entry = Arc::new(JobEntry::new(id, slug, name, source_kind, uri, self.clock.epoch_ms()));
        self.jobs.write().insert(id, entry);
        id
    }

    /// Transition a `Pending` job to `Running` and launch its worker, unless
    /// the engine is already at its concurrency cap.
    pub fn start(&self, job_id: JobId) -> Result<(), JobError> {
        let entry = self.lookup(job_id)?;
        {
            let state = entry.state.lock();
            if state.status != JobStatus::Pending {
                return Err(JobError::AlreadyStarted(job_id));
            }
        }

        let installer = msv_installer::dispatch::for_source(entry.source_kind)
            .ok_or(JobError::UnsupportedSource(entry.source_kind))?;

        loop {
            let current = self.running.load(Ordering::SeqCst);
            if current >= self.max_concurrent {
                return Err(JobError::AtCapacity { max: self.max_concurrent });
            }
            if self.running.compare_exchange(current, current + 1, Ordering::SeqCst, Ordering::SeqCst).is_ok() {
                break;
            }
        }

        let running = self.running.clone();
        let runner = self.runner.clone();
        let layout = self.layout.clone();
        let clock = self.clock.clone();

        tokio::spawn(async move {
            worker::run(entry, installer, runner, layout, clock).await;
            running.fetch_sub(1, Ordering::SeqCst);
        });

        Ok(())
    }

    /// Cancel a job. Idempotent: cancelling an already-terminal job is a
    /// no-op success. Cancelling a `Pending` job (one whose worker never
    /// started) transitions it directly to `Cancelled`.
    pub fn cancel(&self, job_id: JobId) -> Result<(), JobError> {
        let entry = self.lookup(job_id)?;
        let mut state = entry.state.lock();
        if state.status.is_terminal() {
            return Ok(());
        }
        if state.status == JobStatus::Pending {
            state.status = JobStatus::Cancelled;
            state.ended_at_ms = Some(self.clock.epoch_ms());
        }
        entry.cancel.cancel();
        Ok(())
    }

    pub fn get(&self, job_id: JobId) -> Option<JobSnapshot> {
        self.jobs.read().get(&job_id).map(|entry| entry.snapshot())
    }

    pub fn list(&self) -> Vec<JobSnapshot> {
        self.jobs.read().values().map(|entry| entry.snapshot()).collect()
    }

    /// Turn a successfully completed job into a registered [`ServerEntry`].
    pub fn finalize(&self, job_id: JobId) -> Result<ServerEntry, JobError> {
        let entry = self.lookup(job_id)?;
        let (source, result) = {
            let mut state = entry.state.lock();
            if state.finalized {
                return Err(JobError::AlreadyFinalized(job_id));
            }
            match state.status {
                JobStatus::Completed => {}
                s if s.is_terminal() => return Err(JobError::NotSuccessful(job_id)),
                _ => return Err(JobError::NotTerminal(job_id)),
            }
            let result = state.result.clone().ok_or(JobError::NotSuccessful(job_id))?;
            state.finalized = true;
            (msv_core::Source { kind: entry.source_kind, uri: entry.uri.clone() }, result)
        };

        let transport =
            if result.metadata.contains_key("health_endpoint") { TransportKind::Http } else { TransportKind::Stdio };

        msv_registry::register(&self.layout, &entry.slug, &entry.name, source, transport, entry.id, result)
            .map_err(JobError::from)
    }

    /// Drop terminal jobs older than the retention window.
    pub fn reap(&self) {
        let now = self.clock.epoch_ms();
        let retention_ms = self.retention.as_millis() as u64;
        self.jobs.write().retain(|_, entry| {
            let state = entry.state.lock();
            match state.ended_at_ms {
                Some(ended) => now.saturating_sub(ended) < retention_ms,
                None => true,
            }
        });
    }

    fn lookup(&self, job_id: JobId) -> Result<Arc<JobEntry>, JobError> {
        self.jobs.read().get(&job_id).cloned().ok_or(JobError::NotFound(job_id))
    }
}

/// Spawn the hourly reaper task. Returns its handle so the daemon can abort
/// it on shutdown.
pub fn spawn_reaper<C: Clock + 'static>(
    manager: Arc<JobManager<C>>,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            manager.reap();
        }
    })
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
