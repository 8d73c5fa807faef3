// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;

fn final_sizes(sizes: &[u64], trim: &[u64]) -> Vec<u64> {
    sizes.iter().zip(trim).map(|(&s, &t)| s - t).collect()
}

#[test]
fn empty_input_produces_empty_plan() {
    assert!(plan(&[], 1024, 2048).is_empty());
}

#[test]
fn under_both_caps_trims_nothing() {
    let trim = plan(&[100, 200, 300], 1024, 2048);
    assert_eq!(trim, vec![0, 0, 0]);
}

#[test]
fn per_file_cap_alone_is_enough() {
    // 1500 trimmed to the 1024 cap, others untouched; total after is 1024+800+900=2724,
    // which fits inside a generous global cap.
    let trim = plan(&[1500, 800, 900], 1024, 10_000);
    assert_eq!(trim, vec![476, 0, 0]);
    assert_eq!(final_sizes(&[1500, 800, 900], &trim), vec![1024, 800, 900]);
}

#[test]
fn global_cap_forces_a_second_pass() {
    let sizes = [1500u64, 800, 900];
    let trim = plan(&sizes, 1024, 2048);
    let finals = final_sizes(&sizes, &trim);
    assert_eq!(finals.iter().sum::<u64>(), 2048);
    // File 0 already absorbed the most trim in pass one and still has the
    // largest remaining share, so it gives up the most in pass two as well.
    assert!(trim[0] > trim[1]);
    assert!(trim[0] > trim[2]);
}

#[test]
fn no_file_ever_exceeds_per_file_cap() {
    let trim = plan(&[5000, 1, 3000], 1024, 100_000);
    let finals = final_sizes(&[5000, 1, 3000], &trim);
    assert!(finals.iter().all(|&f| f <= 1024));
}

#[test]
fn trims_never_negative_or_oversized() {
    let sizes = [10u64, 20, 30];
    let trim = plan(&sizes, 15, 5);
    for (s, t) in sizes.iter().zip(&trim) {
        assert!(*t <= *s);
    }
}

proptest! {
    /// Law: the plan never asks to trim more than a file has.
    #[test]
    fn trim_never_exceeds_size(sizes in prop::collection::vec(0u64..10_000, 1..8), per_file_cap in 1u64..10_000, global_cap in 1u64..20_000) {
        let trim = plan(&sizes, per_file_cap, global_cap);
        for (s, t) in sizes.iter().zip(&trim) {
            prop_assert!(t <= s);
        }
    }

    /// Law: every file respects the per-file cap after the plan, and the
    /// total respects the global cap whenever the per-file caps alone leave
    /// enough slack to reach it (`sizes.len() * per_file_cap >= global_cap`).
    #[test]
    fn caps_are_respected_when_feasible(sizes in prop::collection::vec(0u64..10_000, 1..8), per_file_cap in 1u64..10_000, global_cap in 1u64..20_000) {
        let trim = plan(&sizes, per_file_cap, global_cap);
        let finals = final_sizes(&sizes, &trim);
        prop_assert!(finals.iter().all(|&f| f <= per_file_cap));
        if per_file_cap.saturating_mul(sizes.len() as u64) >= global_cap {
            let total: u64 = finals.iter().sum();
            prop_assert!(total <= global_cap);
        }
    }
}
