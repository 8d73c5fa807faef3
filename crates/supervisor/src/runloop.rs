// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The per-process run loop (`§4.11`): Stopped → Starting → Running →
//! Stopping → Stopped, with Failed/Restarting branches on the way. One of
//! these runs per supervised process for as long as the process is known to
//! the supervisor; `start()`/`stop()` drive it purely through the handle's
//! state and cancellation token. Spawns `layout.bin_path(slug)`, the
//! generated launcher script (`§4.2`), not `entry.command` directly.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use msv_core::{backoff, restart_window, Clock, ProcessLifecycleState, RestartPolicy};
use msv_health::HealthProber;
use msv_registry::{PathLayout, RegistryStore};
use msv_shell::{CommandRunner, CommandSpec};

use crate::metrics;
use crate::monitor;
use crate::process::ProcessHandle;

const RESTART_BACKOFF_BASE: Duration = Duration::from_secs(1);
const RESTART_BACKOFF_CAP: Duration = Duration::from_secs(60);
const RESTART_WINDOW_MS: u64 = 10 * 60 * 1000;

/// Drives one process from the moment `start()` spawns this loop until the
/// loop observes `cancel` and the process has fully stopped, or the policy
/// gives up and the process lands in `Failed`.
pub(crate) async fn run<C: Clock + 'static>(
    handle: Arc<ProcessHandle>,
    cancel: CancellationToken,
    layout: PathLayout,
    runner: Arc<dyn CommandRunner>,
    prober: Arc<dyn HealthProber>,
    clock: C,
) {
    loop {
        let entry = match RegistryStore::load(layout.clone()).ok().and_then(|store| store.get(&handle.slug).cloned())
        {
            Some(entry) => entry,
            None => {
                let mut state = handle.state.lock();
                state.lifecycle = ProcessLifecycleState::Failed;
                state.last_error = Some("server no longer registered".into());
                return;
            }
        };

        // `maxRestarts` is checked only after an exit, never before the next
        // spawn attempt (`§8`): the first unexpected exit must always be
        // allowed to happen before the policy can give up.
        let restarts = handle.state.lock().restarts;

        if restarts > 0 {
            handle.state.lock().lifecycle = ProcessLifecycleState::Restarting;
            let delay = backoff::next(restarts - 1, RESTART_BACKOFF_BASE, RESTART_BACKOFF_CAP);
            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = cancel.cancelled() => {
                    handle.state.lock().lifecycle = ProcessLifecycleState::Stopped;
                    return;
                }
            }
        }

        handle.state.lock().lifecycle = ProcessLifecycleState::Starting;

        let server_dir = layout.server_dir(&handle.slug);
        // Exec the generated launcher (`§4.2`) rather than `entry.command`
        // directly, so the recorded environment and entry point stay in
        // lockstep with whatever an operator inspects under `bin/<slug>`.
        let spec = CommandSpec::new(layout.bin_path(&handle.slug)).cwd(server_dir);
        let spec = entry.entry.env.iter().fold(spec, |spec, (k, v)| spec.env(k.clone(), v.clone()));

        let stdout_log = layout.stdout_log(&handle.slug);
        let stderr_log = layout.stderr_log(&handle.slug);

        let spawned = match runner.spawn(&spec, &stdout_log, &stderr_log).await {
            Ok(spawned) => spawned,
            Err(err) => {
                let mut state = handle.state.lock();
                state.restarts += 1;
                state.restart_timestamps_ms.push(clock.epoch_ms());
                state.last_error = Some(err.to_string());
                tracing::warn!(slug = %handle.slug, error = %err, "spawn failed");
                if entry.health.max_restarts >= 0 && state.restarts as i64 >= entry.health.max_restarts {
                    state.lifecycle = ProcessLifecycleState::Failed;
                    tracing::warn!(slug = %handle.slug, restarts = state.restarts, "exhausted max restarts, giving up");
                    return;
                }
                continue;
            }
        };

        let pid = spawned.pid();
        {
            let mut state = handle.state.lock();
            state.lifecycle = ProcessLifecycleState::Running;
            state.pid = Some(pid);
            state.started_at_ms = Some(clock.epoch_ms());
            state.stopped_at_ms = None;
        }

        let exited = CancellationToken::new();
        let monitor_handle = tokio::spawn(monitor::run(
            handle.clone(),
            entry.entry.clone(),
            entry.health.clone(),
            stdout_log.clone(),
            prober.clone(),
            clock.clone(),
            cancel.clone(),
            exited.clone(),
        ));
        let metrics_handle =
            tokio::spawn(metrics::run(handle.clone(), pid, cancel.clone(), exited.clone()));

        let unexpected_exit = tokio::select! {
            status = spawned.wait() => {
                exited.cancel();
                match status {
                    Ok(status) => Some(status.success()),
                    Err(_) => Some(false),
                }
            }
            _ = cancel.cancelled() => {
                let grace = handle.stop_grace();
                let _ = spawned.terminate(grace).await;
                exited.cancel();
                None
            }
        };

        let _ = monitor_handle.await;
        let _ = metrics_handle.await;

        let mut state = handle.state.lock();
        state.pid = None;
        state.stopped_at_ms = Some(clock.epoch_ms());

        let stopping = state.stopping;
        match unexpected_exit {
            None => {
                state.lifecycle = ProcessLifecycleState::Stopped;
                return;
            }
            Some(_) if stopping => {
                state.lifecycle = ProcessLifecycleState::Stopped;
                return;
            }
            Some(clean_exit) => {
                state.restarts += 1;
                let now = clock.epoch_ms();
                state.restart_timestamps_ms.push(now);
                state.restart_timestamps_ms =
                    restart_window::prune(&state.restart_timestamps_ms, now, RESTART_WINDOW_MS);

                let gives_up = match entry.health.restart_policy {
                    RestartPolicy::Never => true,
                    RestartPolicy::OnFailure => clean_exit,
                    RestartPolicy::Always => false,
                };
                if gives_up {
                    state.lifecycle = ProcessLifecycleState::Stopped;
                    return;
                }
                if entry.health.max_restarts >= 0 && state.restarts as i64 >= entry.health.max_restarts {
                    state.lifecycle = ProcessLifecycleState::Failed;
                    tracing::warn!(slug = %handle.slug, restarts = state.restarts, "exhausted max restarts, giving up");
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "runloop_tests.rs"]
mod tests;
