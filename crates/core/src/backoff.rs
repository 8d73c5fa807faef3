// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Restart backoff schedule (`§4.4`).
//!
//! Pure function: given how many consecutive restarts a process has already
//! burned through, how long should the supervisor wait before trying again.
//! `attempt <= 1` both hold at `base`; doubling starts from `attempt == 2`,
//! capped at `cap`. Callers own the 10-minute sliding window that decides
//! when `attempt` resets to zero.

use std::time::Duration;

/// Returns the delay before the `attempt`-th restart (0-indexed: `attempt = 0`
/// is the delay before the first retry after the initial failure).
///
/// `next(0, base, cap) == next(1, base, cap) == base`; each attempt from
/// `2` onward doubles the previous delay until `cap` is reached, after which
/// it holds at `cap`.
pub fn next(attempt: u32, base: Duration, cap: Duration) -> Duration {
    if base.is_zero() {
        return Duration::ZERO;
    }
    let exponent = attempt.saturating_sub(1);
    match base.checked_mul(1u32.checked_shl(exponent).unwrap_or(u32::MAX)) {
        Some(delay) => delay.min(cap),
        None => cap,
    }
}

#[cfg(test)]
#[path = "backoff_tests.rs"]
mod tests;
