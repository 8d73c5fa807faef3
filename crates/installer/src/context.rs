// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use msv_core::{LogLevel, Slug, Source, Stage};
use tokio_util::sync::CancellationToken;

/// Everything an installer needs to run: where to put things, and what to
/// install. Installers never touch the registry directly — they return an
/// [`msv_core::InstallationResult`] and let the caller (the job engine) hand
/// it to `msv-registry`'s integrator.
#[derive(Debug, Clone)]
pub struct InstallContext {
    pub slug: Slug,
    pub source: Source,
    /// The server's install directory, already created by the caller.
    pub install_dir: PathBuf,
    /// Cancelled when the job is cancelled; installers thread this into
    /// [`msv_shell::CommandRunner::run_cancellable`] so an in-flight command
    /// gets a terminate signal and a grace period instead of an instant kill.
    pub cancel: CancellationToken,
}

/// Sink for an installer to report progress without depending on the job
/// engine's concrete log/channel types.
pub trait InstallLogSink: Send + Sync {
    fn log(&self, stage: Stage, level: LogLevel, message: &str);
}

/// Discards everything — useful in tests and one-off CLI installs where
/// nobody is watching job progress.
pub struct NullLogSink;

impl InstallLogSink for NullLogSink {
    fn log(&self, _stage: Stage, _level: LogLevel, _message: &str) {}
}
