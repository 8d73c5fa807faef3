// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! msv-core: shared domain model and pure leaf utilities for the MCP server
//! supervisor.
//!
//! This crate owns nothing that touches the filesystem, the network, or a
//! child process. Everything here is data plus pure functions so it can be
//! exercised with plain unit tests from every other crate in the workspace.

pub mod backoff;
pub mod clock;
pub mod id;
pub mod macros;
pub mod model;
pub mod restart_window;
pub mod rotation;

pub use clock::{Clock, FakeClock, SystemClock};
pub use id::{short, IdBuf, ID_MAX_LEN};
pub use model::{
    Entry, HealthPolicy, HealthStatus, InstallationResult, JobId, JobLogEntry, JobStatus,
    LogLevel, ProcessLifecycleState, RestartPolicy, RuntimeInfo, RuntimeKind, ServerEntry, Slug,
    SlugError, Source, SourceKind, Stage, TransportKind, STAGE_WEIGHTS,
};
