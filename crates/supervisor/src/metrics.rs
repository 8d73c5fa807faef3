// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Metrics sampler (`§4.11`): every 5s, shell out to the platform process
//! inspector for CPU% and RSS of the supervised pid. Any read failure is
//! swallowed — the process may have exited between the check and the read.

use std::sync::Arc;
use std::time::Duration;

use sysinfo::{Pid, ProcessRefreshKind, System};
use tokio_util::sync::CancellationToken;

use crate::process::ProcessHandle;

const SAMPLE_INTERVAL: Duration = Duration::from_secs(5);

pub(crate) async fn run(
    handle: Arc<ProcessHandle>,
    pid: u32,
    cancel: CancellationToken,
    exited: CancellationToken,
) {
    let mut system = System::new();
    let pid = Pid::from_u32(pid);
    loop {
        tokio::select! {
            _ = tokio::time::sleep(SAMPLE_INTERVAL) => {}
            _ = cancel.cancelled() => return,
            _ = exited.cancelled() => return,
        }

        if !system.refresh_process_specifics(pid, ProcessRefreshKind::new().with_cpu().with_memory()) {
            continue;
        }
        if let Some(process) = system.process(pid) {
            let mut state = handle.state.lock();
            state.cpu_percent = process.cpu_usage();
            state.rss_bytes = process.memory();
        }
    }
}

#[cfg(test)]
#[path = "metrics_tests.rs"]
mod tests;
