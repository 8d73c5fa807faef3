//! Sliding-window restart-rate tracking (`§4.11`): a compacted list of
//! restart timestamps, pruned of anything older than the window on every
//! read. Pure, no I/O — the caller owns the actual `Vec` and timing source.

/// Returns `timestamps` with every entry older than `now_ms - window_ms`
/// dropped. Order is preserved; entries within the window are unchanged.
pub fn prune(timestamps: &[u64], now_ms: u64, window_ms: u64) -> Vec<u64> {
    let cutoff = now_ms.saturating_sub(window_ms);
    timestamps.iter().copied().filter(|&ts| ts >= cutoff).collect()
}

/// Number of restarts still inside the window as of `now_ms`.
pub fn count_within(timestamps: &[u64], now_ms: u64, window_ms: u64) -> usize {
    prune(timestamps, now_ms, window_ms).len()
}

#[cfg(test)]
#[path = "restart_window_tests.rs"]
mod tests;
