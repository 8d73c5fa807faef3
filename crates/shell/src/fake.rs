// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test double for [`crate::CommandRunner`]. Scripts `run` responses by exact
//! argv match so installer and supervisor tests never touch a real shell.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use crate::error::RunnerError;
use crate::runner::{CommandOutput, CommandRunner, CommandSpec, SpawnedProcess};

fn key(spec: &CommandSpec) -> String {
    format!("{} {}", spec.program.display(), spec.args.join(" "))
}

#[derive(Default)]
pub struct FakeCommandRunner {
    scripted: Mutex<HashMap<String, Result<CommandOutput, RunnerErrorKind>>>,
    calls: Mutex<Vec<CommandSpec>>,
}

/// [`RunnerError`] doesn't implement `Clone`, so scripted failures are
/// recorded in this smaller shape and converted back on the way out.
#[derive(Clone)]
enum RunnerErrorKind {
    Spawn(String),
    Timeout(u64),
}

impl FakeCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a successful response for an exact `program` + `args` match.
    pub fn script(&self, spec: &CommandSpec, output: CommandOutput) {
        self.scripted.lock().insert(key(spec), Ok(output));
    }

    /// Register a spawn failure for an exact `program` + `args` match.
    pub fn script_failure(&self, spec: &CommandSpec, message: impl Into<String>) {
        self.scripted.lock().insert(key(spec), Err(RunnerErrorKind::Spawn(message.into())));
    }

    /// Register a timeout for an exact `program` + `args` match.
    pub fn script_timeout(&self, spec: &CommandSpec, timeout_secs: u64) {
        self.scripted.lock().insert(key(spec), Err(RunnerErrorKind::Timeout(timeout_secs)));
    }

    /// All `run` calls observed so far, in order.
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl CommandRunner for FakeCommandRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, RunnerError> {
        self.calls.lock().push(spec.clone());
        match self.scripted.lock().get(&key(spec)).cloned() {
            Some(Ok(output)) => Ok(output),
            Some(Err(RunnerErrorKind::Spawn(message))) => Err(RunnerError::Spawn {
                command: key(spec),
                source: std::io::Error::other(message),
            }),
            Some(Err(RunnerErrorKind::Timeout(timeout_secs))) => {
                Err(RunnerError::Timeout { command: key(spec), timeout_secs })
            }
            None => Ok(CommandOutput { status: Some(0), stdout: String::new(), stderr: String::new() }),
        }
    }

    async fn run_cancellable(
        &self,
        spec: &CommandSpec,
        _cancel: CancellationToken,
        _grace: Duration,
    ) -> Result<CommandOutput, RunnerError> {
        // Scripted responses resolve instantly; there's no real child to
        // terminate, so cancellation plumbing is a no-op here.
        self.run(spec).await
    }

    async fn spawn(
        &self,
        _spec: &CommandSpec,
        _stdout_path: &Path,
        _stderr_path: &Path,
    ) -> Result<SpawnedProcess, RunnerError> {
        unimplemented!(
            "FakeCommandRunner cannot fake a long-lived SpawnedProcess (it wraps a real tokio::process::Child); \
             supervisor tests should inject a supervised-process abstraction at a higher seam instead"
        )
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
