// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Handshake gating for the stdio log-activity proxy: before a stdio server
//! has completed its MCP initialize handshake, log activity alone isn't
//! trustworthy evidence of readiness (a server can print a banner and then
//! hang). We scan for the handshake markers so a quiet-but-initialized
//! server isn't confused with a noisy-but-stuck one.

/// How much of the tail of a log file we scan for handshake markers.
pub const SCAN_WINDOW_BYTES: usize = 64 * 1024;

/// The bare substring subsumes `notifications/initialized` as well, so one
/// check covers both forms the spec names.
const MARKER: &str = "initialized";

/// True if the handshake marker appears in `tail` (normally the last
/// [`SCAN_WINDOW_BYTES`] of a server's combined stdout/stderr log).
pub fn seen_in(tail: &[u8]) -> bool {
    String::from_utf8_lossy(tail).contains(MARKER)
}

#[cfg(test)]
#[path = "handshake_tests.rs"]
mod tests;
