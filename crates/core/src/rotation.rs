// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log rotation trim planner (`§4.5`).
//!
//! Pure function over a snapshot of log file sizes: decide how many bytes to
//! trim from the head of each file so that (a) no single file exceeds
//! `per_file_cap` and (b) the sum across all files does not exceed
//! `global_cap`. The plan never grows a file — every returned value is a
//! non-negative number of bytes to drop from the front of the corresponding
//! input file.

/// Returns, for each input size, the number of bytes to trim from the start
/// of that log file.
///
/// Two passes:
/// 1. Per-file: any file over `per_file_cap` is trimmed down to it.
/// 2. Global: if the post-pass-1 total still exceeds `global_cap`, the excess
///    is trimmed proportionally to each file's remaining size, so a file that
///    is contributing more to the overage gives up more bytes.
///
/// Proportional shares are rounded down and any remainder (at most
/// `sizes.len() - 1` bytes, from truncation) is assigned to the files with
/// the largest remaining fractional share, so the returned trims always sum
/// to exactly `total - global_cap` when a second pass is needed.
pub fn plan(sizes: &[u64], per_file_cap: u64, global_cap: u64) -> Vec<u64> {
    if sizes.is_empty() {
        return Vec::new();
    }

    let mut trim: Vec<u64> = sizes.iter().map(|&s| s.saturating_sub(per_file_cap)).collect();
    let remaining: Vec<u64> = sizes.iter().zip(&trim).map(|(&s, &t)| s - t).collect();
    let total: u64 = remaining.iter().sum();

    if total <= global_cap {
        return trim;
    }

    let excess = total - global_cap;
    let mut shares = vec![0u64; sizes.len()];
    let mut fractional: Vec<(usize, u128)> = Vec::with_capacity(sizes.len());
    let mut assigned: u64 = 0;

    for (i, &r) in remaining.iter().enumerate() {
        let numerator = excess as u128 * r as u128;
        let share = (numerator / total as u128) as u64;
        let remainder = numerator % total as u128;
        shares[i] = share;
        assigned += share;
        fractional.push((i, remainder));
    }

    fractional.sort_by(|a, b| b.1.cmp(&a.1));
    let mut leftover = excess - assigned;
    for (i, _) in fractional {
        if leftover == 0 {
            break;
        }
        shares[i] += 1;
        leftover -= 1;
    }

    for (i, extra) in shares.into_iter().enumerate() {
        trim[i] += extra.min(remaining[i]);
    }
    trim
}

#[cfg(test)]
#[path = "rotation_tests.rs"]
mod tests;
