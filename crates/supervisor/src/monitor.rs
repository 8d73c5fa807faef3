// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Health monitor (`§4.11`): scoped to one process's `Running` lifetime,
//! polls [`HealthProber`] on the policy's configured interval and updates
//! `state.health`/`state.last_ping_ms`. Never itself triggers a restart —
//! only the process exiting does that; this task just keeps the fleet
//! snapshot honest between exits.

use std::path::PathBuf;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use msv_core::{restart_window, Clock, Entry, HealthPolicy};
use msv_health::{classify, probe_hit, HealthProber};

use crate::process::ProcessHandle;

pub(crate) async fn run<C: Clock>(
    handle: Arc<ProcessHandle>,
    entry: Entry,
    policy: HealthPolicy,
    stdout_log: PathBuf,
    prober: Arc<dyn HealthProber>,
    clock: C,
    cancel: CancellationToken,
    exited: CancellationToken,
) {
    let interval = std::time::Duration::from_secs(policy.interval_sec.max(1));
    loop {
        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = cancel.cancelled() => return,
            _ = exited.cancelled() => return,
        }

        let signal = match prober.probe(&entry, &stdout_log).await {
            Ok(signal) => signal,
            Err(err) => {
                tracing::debug!(slug = %handle.slug, error = %err, "health probe failed");
                continue;
            }
        };

        let mut state = handle.state.lock();
        state.missed_pings =
            if probe_hit(&signal, interval) { 0 } else { state.missed_pings.saturating_add(1) };
        let restarts_last_10m =
            restart_window::count_within(&state.restart_timestamps_ms, clock.epoch_ms(), 10 * 60 * 1000);

        state.health = classify(&signal, state.missed_pings, restarts_last_10m);
        state.last_ping_ms = Some(clock.epoch_ms());
    }
}

#[cfg(test)]
#[path = "monitor_tests.rs"]
mod tests;
