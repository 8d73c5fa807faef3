// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn run_captures_stdout() {
    let runner = TokioCommandRunner;
    let spec = CommandSpec::new("echo").arg("hello");
    let output = runner.run(&spec).await.unwrap();
    assert!(output.success());
    assert_eq!(output.stdout.trim(), "hello");
}

#[tokio::test]
async fn run_reports_nonzero_exit() {
    let runner = TokioCommandRunner;
    let spec = CommandSpec::new("sh").arg("-c").arg("exit 3");
    let output = runner.run(&spec).await.unwrap();
    assert_eq!(output.status, Some(3));
    assert!(!output.success());
}

#[tokio::test]
async fn run_rejects_missing_cwd() {
    let runner = TokioCommandRunner;
    let spec = CommandSpec::new("echo").cwd("/no/such/directory/msv-test");
    let err = runner.run(&spec).await.unwrap_err();
    assert!(matches!(err, RunnerError::MissingCwd(_)));
}

#[tokio::test]
async fn run_times_out_long_running_command() {
    let runner = TokioCommandRunner;
    let spec = CommandSpec::new("sleep").arg("5").timeout(Duration::from_millis(50));
    let err = runner.run(&spec).await.unwrap_err();
    assert!(matches!(err, RunnerError::Timeout { .. }));
}

#[tokio::test]
async fn spawn_redirects_output_to_files() {
    let dir = tempfile::tempdir().unwrap();
    let stdout_path = dir.path().join("stdout.log");
    let stderr_path = dir.path().join("stderr.log");
    let runner = TokioCommandRunner;
    let spec = CommandSpec::new("sh").arg("-c").arg("echo out; echo err 1>&2");
    let proc = runner.spawn(&spec, &stdout_path, &stderr_path).await.unwrap();
    assert!(proc.pid() > 0);
    proc.wait().await.unwrap();
    assert_eq!(std::fs::read_to_string(&stdout_path).unwrap().trim(), "out");
    assert_eq!(std::fs::read_to_string(&stderr_path).unwrap().trim(), "err");
}

#[tokio::test]
async fn run_cancellable_returns_normally_when_never_cancelled() {
    let runner = TokioCommandRunner;
    let spec = CommandSpec::new("echo").arg("hello");
    let output =
        runner.run_cancellable(&spec, CancellationToken::new(), Duration::from_secs(5)).await.unwrap();
    assert!(output.success());
    assert_eq!(output.stdout.trim(), "hello");
}

#[cfg(unix)]
#[tokio::test]
async fn run_cancellable_kills_the_child_once_cancelled() {
    let runner = TokioCommandRunner;
    let spec = CommandSpec::new("sleep").arg("30");
    let cancel = CancellationToken::new();

    let cancel_clone = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        cancel_clone.cancel();
    });

    let started = tokio::time::Instant::now();
    let output = runner.run_cancellable(&spec, cancel, Duration::from_secs(2)).await.unwrap();
    assert!(!output.success());
    // Killed well before the 30s sleep would have finished on its own, and
    // without waiting out the full grace period (sleep exits on SIGTERM).
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[cfg(unix)]
#[tokio::test]
async fn terminate_sends_sigterm_then_waits() {
    let dir = tempfile::tempdir().unwrap();
    let stdout_path = dir.path().join("stdout.log");
    let stderr_path = dir.path().join("stderr.log");
    let runner = TokioCommandRunner;
    let spec = CommandSpec::new("sleep").arg("30");
    let proc = runner.spawn(&spec, &stdout_path, &stderr_path).await.unwrap();
    proc.terminate(Duration::from_secs(2)).await.unwrap();
    let status = proc.wait().await.unwrap();
    assert!(!status.success());
}
