// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn fresh_progress_is_all_zero() {
    let progress = StageProgress::new();
    assert_eq!(progress.overall(), 0);
}

#[test]
fn completing_every_stage_reaches_100() {
    let mut progress = StageProgress::new();
    progress.complete_all();
    assert_eq!(progress.overall(), 100);
}

#[test]
fn complete_through_marks_earlier_stages_full_and_leaves_current_untouched() {
    let mut progress = StageProgress::new();
    progress.complete_through(Stage::Installing);
    // Validation(5) + Downloading(20) + Extracting(10) = 35, Installing still 0.
    assert_eq!(progress.overall(), 35);
}

#[test]
fn overall_is_the_weighted_sum_within_tolerance() {
    let mut progress = StageProgress::new();
    progress.complete_through(Stage::Installing);
    progress.set(Stage::Installing, 50);
    // 35 (prior stages) + 40 * 0.5 = 55
    assert_eq!(progress.overall(), 55);
}

#[test]
fn set_clamps_to_100() {
    let mut progress = StageProgress::new();
    progress.set(Stage::Validation, 250);
    assert_eq!(progress.as_slice()[0], (Stage::Validation, 100));
}
