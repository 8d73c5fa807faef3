// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Raw evidence a prober gathers, before classification.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProbeSignal {
    /// HTTP transport: the GET either completed with a status code or
    /// didn't complete at all (connection refused, timed out, ...).
    Http { status: Option<u16> },

    /// Stdio transport: how long ago the log file was last written to, and
    /// whether the initialize handshake has been observed in its tail.
    StdioLog { age_since_write: Duration, handshake_seen: bool },
}
