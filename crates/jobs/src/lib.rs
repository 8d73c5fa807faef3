// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! msv-jobs: the cancellable, staged, progress-reporting installation job
//! engine (`§4.8`). Drives one [`msv_installer::Installer`] per job through
//! to an [`msv_core::InstallationResult`], then hands it to
//! [`msv_registry::register`] on `finalize`.

pub mod error;
pub mod job;
pub mod log_sink;
pub mod manager;
pub mod state;
mod worker;

pub use error::JobError;
pub use manager::{spawn_reaper, JobManager, DEFAULT_MAX_CONCURRENT, DEFAULT_RETENTION};
pub use state::{JobSnapshot, StageProgress};
