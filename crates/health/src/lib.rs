// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! msv-health: turns a running server into a [`msv_core::HealthStatus`].
//!
//! HTTP-transport servers are probed with a direct GET; stdio-transport
//! servers have no request/response channel to poll, so we proxy health
//! through log activity — gated on having seen the MCP initialize
//! handshake, so a chatty-but-stuck server doesn't read as healthy.

pub mod classifier;
pub mod error;
pub mod handshake;
pub mod prober;
pub mod signal;

pub use classifier::{classify, probe_hit};
pub use error::HealthError;
pub use prober::{HealthProber, LiveHealthProber};
pub use signal::ProbeSignal;
