// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::path::PathBuf;
use std::time::Duration;

use msv_registry::PathLayout;

/// Path to the control socket: `$MSV_SOCKET_PATH`, or `<data>/msvd.sock`.
pub fn socket_path(layout: &PathLayout) -> PathBuf {
    std::env::var("MSV_SOCKET_PATH").map(PathBuf::from).unwrap_or_else(|_| layout.root().join("msvd.sock"))
}

/// `supervisor.shutdown`'s default deadline when a client doesn't specify
/// one: `$MSV_SHUTDOWN_DEADLINE_MS`, or 5s.
pub fn shutdown_deadline() -> Duration {
    std::env::var("MSV_SHUTDOWN_DEADLINE_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(5))
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
