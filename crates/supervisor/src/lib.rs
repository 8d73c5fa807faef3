// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! msv-supervisor: keeps installed servers running. One run loop per
//! process drives it through `Stopped`/`Starting`/`Running`/`Stopping`/
//! `Failed`/`Restarting`; a health monitor and a metrics sampler ride along
//! for the process's `Running` lifetime.

mod error;
mod metrics;
mod monitor;
mod process;
mod runloop;
mod state;
mod supervisor;

pub use error::SupervisorError;
pub use process::DEFAULT_STOP_GRACE;
pub use state::{ProcessSnapshot, ProcessState};
pub use supervisor::{ProcessSupervisor, SupervisorStats};
