// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command execution: run-to-completion for installers, spawn-and-hold for
//! the supervisor.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use tokio::sync::{oneshot, Mutex};
use tokio_util::sync::CancellationToken;

use crate::error::RunnerError;

/// Grace period between terminate signal and forced kill for a cancelled
/// one-shot command (`§4.8`, `§5`).
pub const DEFAULT_CANCEL_GRACE: Duration = Duration::from_secs(5);

/// Everything needed to launch a process: an installer step or a supervised
/// server. `timeout` only applies to [`CommandRunner::run`] — a spawned
/// server is expected to run indefinitely.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub env: HashMap<String, String>,
    pub timeout: Option<Duration>,
}

impl CommandSpec {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into(), args: Vec::new(), cwd: None, env: HashMap::new(), timeout: None }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn label(&self) -> String {
        format!("{} {}", self.program.display(), self.args.join(" "))
    }
}

/// Captured output of a completed, run-to-completion command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` if the process was killed by a signal rather than exiting.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// A long-lived process the supervisor owns for the server's run.
///
/// Stdout/stderr are redirected straight to files on disk — the health
/// prober tails those for stdio-transport log activity — rather than piped
/// into this process, so a misbehaving server can't back-pressure the
/// supervisor by filling an unread pipe.
pub struct SpawnedProcess {
    pid: u32,
    child: Mutex<tokio::process::Child>,
    label: String,
}

impl SpawnedProcess {
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Blocks until the process exits, reaping it. Safe to call from a
    /// dedicated background task; concurrent calls serialize on the
    /// internal lock and all observe the same exit status.
    pub async fn wait(&self) -> Result<std::process::ExitStatus, RunnerError> {
        let mut child = self.child.lock().await;
        child.wait().await.map_err(|source| RunnerError::Wait { command: self.label.clone(), source })
    }

    pub fn try_wait(&self) -> Result<Option<std::process::ExitStatus>, RunnerError> {
        self.child
            .try_lock()
            .ok()
            .and_then(|mut guard| guard.try_wait().transpose())
            .transpose()
            .map_err(|source| RunnerError::Wait { command: self.label.clone(), source })
    }

    /// SIGTERM, then SIGKILL if the process hasn't exited within `grace`.
    #[cfg(unix)]
    pub async fn terminate(&self, grace: Duration) -> Result<(), RunnerError> {
        use nix::sys::signal::{self, Signal};
        use nix::unistd::Pid;

        let _ = signal::kill(Pid::from_raw(self.pid as i32), Signal::SIGTERM);
        if tokio::time::timeout(grace, self.wait()).await.is_err() {
            let mut child = self.child.lock().await;
            let _ = child.start_kill();
        }
        Ok(())
    }
}

/// Abstraction over process execution so installers and the supervisor can
/// be tested against [`crate::fake::FakeCommandRunner`].
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run a command to completion, capturing its output.
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, RunnerError>;

    /// Like [`Self::run`], but a cancelled `cancel` token sends the terminate
    /// signal and only force-kills after `grace` has elapsed with the
    /// process still alive, instead of the instant `kill_on_drop` a plain
    /// future cancellation would otherwise trigger.
    async fn run_cancellable(
        &self,
        spec: &CommandSpec,
        cancel: CancellationToken,
        grace: Duration,
    ) -> Result<CommandOutput, RunnerError>;

    /// Start a long-lived process with stdout/stderr redirected to the given
    /// files, returning a handle the caller supervises.
    async fn spawn(
        &self,
        spec: &CommandSpec,
        stdout_path: &Path,
        stderr_path: &Path,
    ) -> Result<SpawnedProcess, RunnerError>;
}

/// Production [`CommandRunner`] backed by [`tokio::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioCommandRunner;

impl TokioCommandRunner {
    fn build(spec: &CommandSpec) -> Result<tokio::process::Command, RunnerError> {
        if let Some(cwd) = &spec.cwd {
            if !cwd.exists() {
                return Err(RunnerError::MissingCwd(cwd.clone()));
            }
        }
        let mut cmd = tokio::process::Command::new(&spec.program);
        // Dropping the run future (e.g. a job cancellation racing the
        // command) must not leave an orphaned child behind.
        cmd.kill_on_drop(true);
        cmd.args(&spec.args);
        if let Some(cwd) = &spec.cwd {
            cmd.current_dir(cwd);
        }
        for (key, value) in &spec.env {
            cmd.env(key, value);
        }
        Ok(cmd)
    }
}

#[async_trait]
impl CommandRunner for TokioCommandRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, RunnerError> {
        let mut cmd = Self::build(spec)?;
        cmd.stdin(Stdio::null()).stdout(Stdio::piped()).stderr(Stdio::piped());

        let run_once = async {
            let mut child =
                cmd.spawn().map_err(|source| RunnerError::Spawn { command: spec.label(), source })?;
            let mut stdout = String::new();
            let mut stderr = String::new();
            if let Some(mut out) = child.stdout.take() {
                let _ = out.read_to_string(&mut stdout).await;
            }
            if let Some(mut err) = child.stderr.take() {
                let _ = err.read_to_string(&mut stderr).await;
            }
            let status = child
                .wait()
                .await
                .map_err(|source| RunnerError::Wait { command: spec.label(), source })?;
            Ok(CommandOutput { status: status.code(), stdout, stderr })
        };

        match spec.timeout {
            Some(timeout) => tokio::time::timeout(timeout, run_once).await.map_err(|_| {
                RunnerError::Timeout { command: spec.label(), timeout_secs: timeout.as_secs() }
            })?,
            None => run_once.await,
        }
    }

    async fn run_cancellable(
        &self,
        spec: &CommandSpec,
        cancel: CancellationToken,
        grace: Duration,
    ) -> Result<CommandOutput, RunnerError> {
        let mut cmd = Self::build(spec)?;
        // Cancellation is handled explicitly by `terminate_on_cancel` below;
        // an instant kill on drop would race the terminate signal and
        // defeat the grace period.
        cmd.kill_on_drop(false);
        cmd.stdin(Stdio::null()).stdout(Stdio::piped()).stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|source| RunnerError::Spawn { command: spec.label(), source })?;
        let (done_tx, done_rx) = oneshot::channel();
        if let Some(pid) = child.id() {
            tokio::spawn(terminate_on_cancel(pid, cancel, grace, done_rx));
        }

        let run_once = async {
            let mut stdout = String::new();
            let mut stderr = String::new();
            if let Some(mut out) = child.stdout.take() {
                let _ = out.read_to_string(&mut stdout).await;
            }
            if let Some(mut err) = child.stderr.take() {
                let _ = err.read_to_string(&mut stderr).await;
            }
            let status = child
                .wait()
                .await
                .map_err(|source| RunnerError::Wait { command: spec.label(), source })?;
            Ok(CommandOutput { status: status.code(), stdout, stderr })
        };

        let result = match spec.timeout {
            Some(timeout) => tokio::time::timeout(timeout, run_once).await.map_err(|_| {
                RunnerError::Timeout { command: spec.label(), timeout_secs: timeout.as_secs() }
            })?,
            None => run_once.await,
        };
        let _ = done_tx.send(());
        result
    }

    async fn spawn(
        &self,
        spec: &CommandSpec,
        stdout_path: &Path,
        stderr_path: &Path,
    ) -> Result<SpawnedProcess, RunnerError> {
        let mut cmd = Self::build(spec)?;
        let stdout_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(stdout_path)
            .map_err(|source| RunnerError::Spawn { command: spec.label(), source })?;
        let stderr_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(stderr_path)
            .map_err(|source| RunnerError::Spawn { command: spec.label(), source })?;

        cmd.stdin(Stdio::null()).stdout(Stdio::from(stdout_file)).stderr(Stdio::from(stderr_file));

        let child = cmd.spawn().map_err(|source| RunnerError::Spawn { command: spec.label(), source })?;
        let pid = child.id().unwrap_or(0);
        tracing::info!(pid, command = %spec.label(), "spawned supervised process");
        Ok(SpawnedProcess { pid, child: Mutex::new(child), label: spec.label() })
    }
}

/// Watches `cancel` independently of whatever future is driving the
/// command's stdout/wait loop, so that loop being dropped (e.g. by the
/// caller's own cancellation race) can't skip the grace period.
async fn terminate_on_cancel(
    pid: u32,
    cancel: CancellationToken,
    grace: Duration,
    mut done: oneshot::Receiver<()>,
) {
    tokio::select! {
        _ = cancel.cancelled() => {}
        _ = &mut done => return,
    }

    #[cfg(unix)]
    {
        use nix::sys::signal::{self, Signal};
        use nix::unistd::Pid;

        let target = Pid::from_raw(pid as i32);
        let _ = signal::kill(target, Signal::SIGTERM);
        tokio::select! {
            _ = tokio::time::sleep(grace) => {
                if signal::kill(target, None).is_ok() {
                    let _ = signal::kill(target, Signal::SIGKILL);
                }
            }
            _ = &mut done => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = (pid, grace);
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
