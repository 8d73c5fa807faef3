// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A single supervised process: its mutable [`ProcessState`] plus the
//! cancellation plumbing the run loop, health monitor, and metrics sampler
//! all key off of.

use std::time::Duration;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use msv_core::Slug;

use crate::state::ProcessState;

/// Default grace period for `stop()`/`shutdown()` when the caller doesn't
/// specify one — matches `restart()`'s own `10s` per `§4.11`.
pub const DEFAULT_STOP_GRACE: Duration = Duration::from_secs(10);

/// One entry in the supervisor's `slug -> ProcessHandle` map. Survives
/// across restarts of the underlying child; only the run loop's
/// [`CancellationToken`] is replaced each time `start()` spins up a fresh
/// generation of the loop.
pub struct ProcessHandle {
    pub slug: Slug,
    pub name: String,
    pub state: Mutex<ProcessState>,
    cancel: Mutex<CancellationToken>,
    grace: Mutex<Duration>,
    task: Mutex<Option<tokio::task::JoinHandle<()>>>,
}

impl ProcessHandle {
    pub fn new(slug: Slug, name: String) -> Self {
        Self {
            slug,
            name,
            state: Mutex::new(ProcessState::new()),
            cancel: Mutex::new(CancellationToken::new()),
            grace: Mutex::new(DEFAULT_STOP_GRACE),
            task: Mutex::new(None),
        }
    }

    /// Replace the cancellation token for a fresh run-loop generation,
    /// returning the new token for the spawned loop to hold onto.
    pub fn new_generation(&self) -> CancellationToken {
        let token = CancellationToken::new();
        *self.cancel.lock() = token.clone();
        token
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.lock().clone()
    }

    pub fn request_stop(&self, grace: Duration) {
        *self.grace.lock() = grace;
        self.cancel.lock().cancel();
    }

    pub fn stop_grace(&self) -> Duration {
        *self.grace.lock()
    }

    pub fn set_task(&self, handle: tokio::task::JoinHandle<()>) {
        *self.task.lock() = Some(handle);
    }

    pub fn take_task(&self) -> Option<tokio::task::JoinHandle<()>> {
        self.task.lock().take()
    }
}
