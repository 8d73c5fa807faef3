// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::context::NullLogSink;
use msv_core::{Slug, Source, SourceKind};
use msv_shell::FakeCommandRunner;

fn ctx(install_dir: &std::path::Path) -> InstallContext {
    InstallContext {
        slug: Slug::new("weather-mcp").unwrap(),
        source: Source { kind: SourceKind::Git, uri: "https://example.com/weather.git".into() },
        install_dir: install_dir.to_path_buf(),
        cancel: tokio_util::sync::CancellationToken::new(),
    }
}

#[tokio::test]
async fn clone_failure_surfaces_as_step_failed() {
    let dir = tempfile::tempdir().unwrap();
    let runner = FakeCommandRunner::new();
    let clone = CommandSpec::new("git")
        .args(["clone", "--depth", "1", "https://example.com/weather.git"])
        .arg(dir.path().to_string_lossy().into_owned());
    runner.script_failure(&clone, "repository not found");

    let err = GitInstaller.install(&ctx(dir.path()), &runner, &NullLogSink).await.unwrap_err();
    assert!(matches!(err, InstallError::Runner(_)) || matches!(err, InstallError::StepFailed { .. }));
}

#[tokio::test]
async fn binary_checkout_without_manifests_needs_an_entry_point() {
    let dir = tempfile::tempdir().unwrap();
    let runner = FakeCommandRunner::new();
    // No files created: clone "succeeds" (default fake behavior) but the
    // checkout is empty, so no entry point can be found.
    let err = GitInstaller.install(&ctx(dir.path()), &runner, &NullLogSink).await.unwrap_err();
    assert!(matches!(err, InstallError::NoEntryPoint(_)));
}

#[tokio::test]
async fn detects_node_project_and_runs_npm_install() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("package.json"), "{}").unwrap();
    std::fs::write(dir.path().join("index.js"), "// server").unwrap();
    let runner = FakeCommandRunner::new();

    let result = GitInstaller.install(&ctx(dir.path()), &runner, &NullLogSink).await.unwrap();
    assert_eq!(result.runtime_kind, Some(RuntimeKind::Node));
    assert_eq!(result.package_manager_kind, Some("npm".into()));
    assert!(result.entry_args[0].ends_with("index.js"));

    let calls = runner.calls();
    assert!(calls.iter().any(|c| c.program.to_string_lossy() == "npm"));
}

#[tokio::test]
async fn detects_python_project_and_creates_a_venv() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("requirements.txt"), "mcp==1.0").unwrap();
    std::fs::write(dir.path().join("main.py"), "# server").unwrap();
    let runner = FakeCommandRunner::new();

    let result = GitInstaller.install(&ctx(dir.path()), &runner, &NullLogSink).await.unwrap();
    assert_eq!(result.runtime_kind, Some(RuntimeKind::Python));
    assert!(result.entry_command.to_string_lossy().contains("venv"));

    let calls = runner.calls();
    assert!(calls.iter().any(|c| c.program.to_string_lossy() == "python3"));
}
