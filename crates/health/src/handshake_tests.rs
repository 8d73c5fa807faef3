// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn detects_notifications_initialized() {
    let log = b"server starting\n{\"method\":\"notifications/initialized\"}\n";
    assert!(seen_in(log));
}

#[test]
fn detects_bare_initialized_field() {
    let log = b"{\"result\":{\"initialized\":true}}";
    assert!(seen_in(log));
}

#[test]
fn detects_initialized_outside_any_quotes() {
    let log = b"Server initialized and ready\n";
    assert!(seen_in(log));
}

#[test]
fn quiet_startup_banner_is_not_mistaken_for_handshake() {
    let log = b"listening on stdio\nready for requests\n";
    assert!(!seen_in(log));
}

#[test]
fn empty_log_has_no_handshake() {
    assert!(!seen_in(b""));
}

#[test]
fn tolerates_non_utf8_bytes() {
    let mut log = vec![0xff, 0xfe, 0x00];
    log.extend_from_slice(b"notifications/initialized");
    assert!(seen_in(&log));
}
