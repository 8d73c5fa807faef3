// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-process mutable state (`§4.11`) and the read-only snapshot handed out
//! by `summary()`/`info()`.

use msv_core::{HealthStatus, ProcessLifecycleState, Slug};
use serde::{Deserialize, Serialize};

/// Everything the run loop, health monitor, and metrics sampler mutate for
/// one supervised process. Held behind a single per-process mutex; every
/// lock is taken only for O(1) field reads/writes (`§5`).
#[derive(Debug, Clone)]
pub struct ProcessState {
    pub lifecycle: ProcessLifecycleState,
    pub pid: Option<u32>,
    pub started_at_ms: Option<u64>,
    pub stopped_at_ms: Option<u64>,
    pub restarts: u32,
    /// Compacted sliding window of restart timestamps; pruned via
    /// [`msv_core::restart_window`] whenever read.
    pub restart_timestamps_ms: Vec<u64>,
    pub stopping: bool,
    pub health: HealthStatus,
    /// Consecutive failed/stale health probes (`§4.6`'s `missedPings`); reset
    /// to 0 on a hit, fed into [`msv_health::classify`].
    pub missed_pings: u32,
    pub last_ping_ms: Option<u64>,
    pub cpu_percent: f32,
    pub rss_bytes: u64,
    pub last_error: Option<String>,
}

impl ProcessState {
    pub fn new() -> Self {
        Self {
            lifecycle: ProcessLifecycleState::Stopped,
            pid: None,
            started_at_ms: None,
            stopped_at_ms: None,
            restarts: 0,
            restart_timestamps_ms: Vec::new(),
            stopping: false,
            health: HealthStatus::Down,
            missed_pings: 0,
            last_ping_ms: None,
            cpu_percent: 0.0,
            rss_bytes: 0,
            last_error: None,
        }
    }
}

impl Default for ProcessState {
    fn default() -> Self {
        Self::new()
    }
}

/// Detailed, point-in-time view of a supervised process. `summary()` and
/// `info()` both hand this shape back — a fleet listing is just every
/// process's snapshot, and a detail view is one of them — rather than
/// maintaining two parallel structs for the same fields (`§4.11`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessSnapshot {
    pub slug: Slug,
    pub name: String,
    pub lifecycle: ProcessLifecycleState,
    pub health: HealthStatus,
    pub pid: Option<u32>,
    pub uptime_sec: Option<u64>,
    pub restarts: u32,
    pub restarts_in_window: usize,
    pub last_ping_ms: Option<u64>,
    pub cpu_percent: f32,
    pub ram_bytes: u64,
    pub last_error: Option<String>,
}
