// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::runner::CommandSpec;

#[tokio::test]
async fn unscripted_command_defaults_to_success() {
    let runner = FakeCommandRunner::new();
    let spec = CommandSpec::new("npm").arg("install");
    let output = runner.run(&spec).await.unwrap();
    assert!(output.success());
}

#[tokio::test]
async fn scripted_output_is_returned_for_exact_match() {
    let runner = FakeCommandRunner::new();
    let spec = CommandSpec::new("npm").arg("install");
    runner.script(
        &spec,
        CommandOutput { status: Some(1), stdout: String::new(), stderr: "boom".into() },
    );
    let output = runner.run(&spec).await.unwrap();
    assert!(!output.success());
    assert_eq!(output.stderr, "boom");
}

#[tokio::test]
async fn scripted_response_does_not_leak_across_different_args() {
    let runner = FakeCommandRunner::new();
    runner.script(
        &CommandSpec::new("npm").arg("install"),
        CommandOutput { status: Some(1), stdout: String::new(), stderr: "boom".into() },
    );
    let output = runner.run(&CommandSpec::new("npm").arg("ci")).await.unwrap();
    assert!(output.success());
}

#[tokio::test]
async fn scripted_failure_surfaces_as_spawn_error() {
    let runner = FakeCommandRunner::new();
    let spec = CommandSpec::new("git").arg("clone");
    runner.script_failure(&spec, "no such file or directory");
    let err = runner.run(&spec).await.unwrap_err();
    assert!(matches!(err, RunnerError::Spawn { .. }));
}

#[tokio::test]
async fn scripted_timeout_surfaces_as_timeout_error() {
    let runner = FakeCommandRunner::new();
    let spec = CommandSpec::new("pip").arg("install");
    runner.script_timeout(&spec, 30);
    let err = runner.run(&spec).await.unwrap_err();
    assert!(matches!(err, RunnerError::Timeout { timeout_secs: 30, .. }));
}

#[tokio::test]
async fn calls_are_recorded_in_order() {
    let runner = FakeCommandRunner::new();
    runner.run(&CommandSpec::new("a")).await.unwrap();
    runner.run(&CommandSpec::new("b")).await.unwrap();
    let calls = runner.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].program.to_str(), Some("a"));
    assert_eq!(calls[1].program.to_str(), Some("b"));
}
