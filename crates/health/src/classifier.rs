// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pure classification of a [`ProbeSignal`] into a [`HealthStatus`] (`§4.6`).
//!
//! `missedPings` and `restartsLast10m` are counters the caller tracks across
//! ticks — [`crate::monitor`]'s caller in `msv-supervisor` owns
//! `missed_pings`, bumped each tick via [`probe_hit`], and the sliding
//! restart window already computed for `stats()`.

use std::time::Duration;

use msv_core::HealthStatus;

use crate::signal::ProbeSignal;

/// `missedPings` at or above this threshold is `Degraded`.
const DEGRADED_MISSED_PINGS: u32 = 2;
/// `missedPings` at or above this threshold collapses straight to `Down`.
const DOWN_MISSED_PINGS: u32 = 4;
/// Restarts within the last 10 minutes at or above this threshold force
/// `Degraded` regardless of ping outcome.
const DEGRADED_RESTARTS_LAST_10M: usize = 3;

/// Did this tick's probe count as a hit — HTTP 2xx, or the stdio log having
/// advanced within the last `interval`? The caller resets its `missedPings`
/// counter on a hit and increments it otherwise.
pub fn probe_hit(signal: &ProbeSignal, interval: Duration) -> bool {
    match signal {
        ProbeSignal::Http { status: Some(code) } => (200..300).contains(code),
        ProbeSignal::Http { status: None } => false,
        ProbeSignal::StdioLog { age_since_write, .. } => *age_since_write <= interval,
    }
}

/// Classify a probe signal given the caller's tracked `missed_pings` and
/// `restarts_last_10m` counters.
pub fn classify(signal: &ProbeSignal, missed_pings: u32, restarts_last_10m: usize) -> HealthStatus {
    let base = match signal {
        ProbeSignal::Http { status: None } => HealthStatus::Down,
        _ if missed_pings >= DOWN_MISSED_PINGS => HealthStatus::Down,
        _ if missed_pings >= DEGRADED_MISSED_PINGS => HealthStatus::Degraded,
        _ if restarts_last_10m >= DEGRADED_RESTARTS_LAST_10M => HealthStatus::Degraded,
        _ => HealthStatus::Ready,
    };

    let handshake_ready = match signal {
        ProbeSignal::StdioLog { handshake_seen, .. } => *handshake_seen,
        ProbeSignal::Http { .. } => true,
    };

    // Final gate: absence of the handshake only ever downgrades a `Ready`
    // verdict to `Degraded` — it never turns a `Degraded`/`Down` into
    // something worse.
    if !handshake_ready && base == HealthStatus::Ready {
        HealthStatus::Degraded
    } else {
        base
    }
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;
