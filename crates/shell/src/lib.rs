// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! msv-shell: the one place this workspace is allowed to call
//! [`tokio::process::Command`]. Installers run short commands to completion
//! through [`CommandRunner::run`]; the supervisor starts long-lived server
//! processes through [`CommandRunner::spawn`] and owns the returned
//! [`SpawnedProcess`] for the server's whole lifetime.
//!
//! Everything above this crate talks to the trait, never to `tokio::process`
//! directly, so installer and supervisor logic can be tested against
//! [`fake::FakeCommandRunner`] without touching a real shell.

pub mod error;
pub mod fake;
pub mod runner;

pub use error::RunnerError;
pub use fake::FakeCommandRunner;
pub use runner::{
    CommandOutput, CommandRunner, CommandSpec, SpawnedProcess, TokioCommandRunner, DEFAULT_CANCEL_GRACE,
};
