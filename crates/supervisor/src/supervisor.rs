// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! [`ProcessSupervisor`]: the fleet-level API (`§4.11`/`§6`). Holds a
//! `slug -> ProcessHandle` map, a shutdown latch, and the global
//! start/stop/restart counters; reloads the registry on demand for every
//! operation rather than caching it, so a concurrent `install.finalize` or
//! `setEnv` is always visible on the next `start()`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use msv_core::{Clock, ProcessLifecycleState, ServerEntry, Slug, SystemClock};
use msv_health::HealthProber;
use msv_registry::{PathLayout, RegistryStore};
use msv_shell::CommandRunner;

use crate::error::SupervisorError;
use crate::process::{ProcessHandle, DEFAULT_STOP_GRACE};
use crate::runloop;
use crate::state::ProcessSnapshot;

/// Fleet-wide counters exposed by `stats()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupervisorStats {
    pub total_processes: usize,
    pub running: usize,
    pub stopped: usize,
    pub failed: usize,
    pub total_starts: u64,
    pub total_stops: u64,
    pub total_restarts: u64,
}

pub struct ProcessSupervisor<C: Clock = SystemClock> {
    procs: RwLock<HashMap<Slug, Arc<ProcessHandle>>>,
    layout: PathLayout,
    runner: Arc<dyn CommandRunner>,
    prober: Arc<dyn HealthProber>,
    clock: C,
    shutting_down: Arc<AtomicBool>,
    total_starts: Arc<AtomicU64>,
    total_stops: Arc<AtomicU64>,
    total_restarts: Arc<AtomicU64>,
}

impl ProcessSupervisor<SystemClock> {
    pub fn new(layout: PathLayout, runner: Arc<dyn CommandRunner>, prober: Arc<dyn HealthProber>) -> Self {
        Self::with_clock(layout, runner, prober, SystemClock)
    }
}

impl<C: Clock + 'static> ProcessSupervisor<C> {
    pub fn with_clock(
        layout: PathLayout,
        runner: Arc<dyn CommandRunner>,
        prober: Arc<dyn HealthProber>,
        clock: C,
    ) -> Self {
        Self {
            procs: RwLock::new(HashMap::new()),
            layout,
            runner,
            prober,
            clock,
            shutting_down: Arc::new(AtomicBool::new(false)),
            total_starts: Arc::new(AtomicU64::new(0)),
            total_stops: Arc::new(AtomicU64::new(0)),
            total_restarts: Arc::new(AtomicU64::new(0)),
        }
    }

    fn lookup_registry_entry(&self, slug: &Slug) -> Result<ServerEntry, SupervisorError> {
        let store = RegistryStore::load(self.layout.clone())?;
        store.get(slug).cloned().ok_or_else(|| SupervisorError::UnknownSlug(slug.clone()))
    }

    fn handle_for(&self, slug: &Slug, name: &str) -> Arc<ProcessHandle> {
        self.procs
            .write()
            .entry(slug.clone())
            .or_insert_with(|| Arc::new(ProcessHandle::new(slug.clone(), name.to_string())))
            .clone()
    }

    /// `§4.11`: idempotent. No-op success if already `Running`/`Starting`.
    pub fn start(&self, slug: &Slug) -> Result<(), SupervisorError> {
        if self.shutting_down.load(Ordering::SeqCst) {
            return Err(SupervisorError::ShuttingDown(slug.clone()));
        }
        let entry = self.lookup_registry_entry(slug)?;
        if entry.entry.command.as_os_str().is_empty() {
            return Err(SupervisorError::UnresolvedEntryCommand(slug.clone()));
        }

        let handle = self.handle_for(slug, &entry.name);
        {
            let state = handle.state.lock();
            if matches!(state.lifecycle, ProcessLifecycleState::Running | ProcessLifecycleState::Starting) {
                return Ok(());
            }
        }
        handle.state.lock().stopping = false;

        let token = handle.new_generation();
        let layout = self.layout.clone();
        let runner = self.runner.clone();
        let prober = self.prober.clone();
        let clock = self.clock.clone();
        let loop_handle = handle.clone();

        let task = tokio::spawn(async move {
            runloop::run(loop_handle, token, layout, runner, prober, clock).await;
        });
        handle.set_task(task);
        self.total_starts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    /// `§4.11`: idempotent, graceful terminate with `grace` before a forced
    /// kill. No-op success for an unknown or already-stopped slug.
    pub async fn stop(&self, slug: &Slug, grace: Duration) -> Result<(), SupervisorError> {
        let handle = match self.procs.read().get(slug).cloned() {
            Some(handle) => handle,
            None => return Ok(()),
        };
        {
            let mut state = handle.state.lock();
            if matches!(state.lifecycle, ProcessLifecycleState::Stopped | ProcessLifecycleState::Failed) {
                return Ok(());
            }
            state.stopping = true;
            state.lifecycle = ProcessLifecycleState::Stopping;
        }
        handle.request_stop(grace);
        if let Some(task) = handle.take_task() {
            let _ = tokio::time::timeout(grace + Duration::from_secs(1), task).await;
        }
        handle.state.lock().lifecycle = ProcessLifecycleState::Stopped;
        self.total_stops.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    /// `§4.11`: `stop(slug, 10s)` then `start(slug)` with a 100ms gap.
    pub async fn restart(&self, slug: &Slug) -> Result<(), SupervisorError> {
        self.stop(slug, DEFAULT_STOP_GRACE).await?;
        tokio::time::sleep(Duration::from_millis(100)).await;
        self.start(slug)?;
        self.total_restarts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    /// `§4.11`: closes the shutdown latch, stops every known process
    /// concurrently sharing `deadline`, and force-kills any survivor.
    pub async fn shutdown(&self, deadline: Duration) {
        self.shutting_down.store(true, Ordering::SeqCst);
        let slugs: Vec<Slug> = self.procs.read().keys().cloned().collect();
        if slugs.is_empty() {
            return;
        }
        let share = deadline / slugs.len() as u32;
        join_all(slugs.iter().map(|slug| self.stop(slug, share))).await;
    }

    pub fn summary(&self) -> Vec<ProcessSnapshot> {
        self.procs.read().values().map(|handle| self.snapshot_of(handle)).collect()
    }

    pub fn info(&self, slug: &Slug) -> Result<ProcessSnapshot, SupervisorError> {
        let handle = self
            .procs
            .read()
            .get(slug)
            .cloned()
            .ok_or_else(|| SupervisorError::UnknownSlug(slug.clone()))?;
        Ok(self.snapshot_of(&handle))
    }

    pub fn stats(&self) -> SupervisorStats {
        let procs = self.procs.read();
        let mut stats = SupervisorStats {
            total_processes: procs.len(),
            total_starts: self.total_starts.load(Ordering::SeqCst),
            total_stops: self.total_stops.load(Ordering::SeqCst),
            total_restarts: self.total_restarts.load(Ordering::SeqCst),
            ..Default::default()
        };
        for handle in procs.values() {
            match handle.state.lock().lifecycle {
                ProcessLifecycleState::Running | ProcessLifecycleState::Starting => stats.running += 1,
                ProcessLifecycleState::Failed => stats.failed += 1,
                _ => stats.stopped += 1,
            }
        }
        stats
    }

    /// Updates `entry.env` in the registry; takes effect on the process's
    /// next `start()`, not the currently-running instance.
    pub fn set_env(&self, slug: &Slug, env: HashMap<String, String>) -> Result<(), SupervisorError> {
        let (mut store, _guard) = RegistryStore::lock_and_load(self.layout.clone())?;
        let mut entry =
            store.get(slug).cloned().ok_or_else(|| SupervisorError::UnknownSlug(slug.clone()))?;
        entry.entry.env = env;
        msv_registry::write_launcher(&self.layout, slug, &entry.entry)?;
        store.upsert(entry);
        store.save()?;
        Ok(())
    }

    fn snapshot_of(&self, handle: &Arc<ProcessHandle>) -> ProcessSnapshot {
        let state = handle.state.lock();
        let uptime_sec = match (state.lifecycle, state.started_at_ms) {
            (ProcessLifecycleState::Running, Some(started)) => {
                Some(self.clock.epoch_ms().saturating_sub(started) / 1000)
            }
            _ => None,
        };
        let restarts_in_window = msv_core::restart_window::count_within(
            &state.restart_timestamps_ms,
            self.clock.epoch_ms(),
            10 * 60 * 1000,
        );
        ProcessSnapshot {
            slug: handle.slug.clone(),
            name: handle.name.clone(),
            lifecycle: state.lifecycle,
            health: state.health,
            pid: state.pid,
            uptime_sec,
            restarts: state.restarts,
            restarts_in_window,
            last_ping_ms: state.last_ping_ms,
            cpu_percent: state.cpu_percent,
            ram_bytes: state.rss_bytes,
            last_error: state.last_error.clone(),
        }
    }
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
