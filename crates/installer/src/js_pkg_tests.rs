// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::context::NullLogSink;
use msv_core::{Slug, Source, SourceKind};
use msv_shell::FakeCommandRunner;

#[test]
fn package_name_strips_version_pin() {
    assert_eq!(JsPkgInstaller::package_name("weather-mcp@1.2.3"), "weather-mcp");
    assert_eq!(JsPkgInstaller::package_name("weather-mcp"), "weather-mcp");
}

#[tokio::test]
async fn installs_and_finds_entry_point_under_node_modules() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = InstallContext {
        slug: Slug::new("weather-mcp").unwrap(),
        source: Source { kind: SourceKind::JsPkg, uri: "weather-mcp".into() },
        install_dir: dir.path().to_path_buf(),
        cancel: tokio_util::sync::CancellationToken::new(),
    };
    let package_dir = dir.path().join("node_modules").join("weather-mcp");
    std::fs::create_dir_all(&package_dir).unwrap();
    std::fs::write(package_dir.join("index.js"), "// server").unwrap();

    let runner = FakeCommandRunner::new();
    let result = JsPkgInstaller.install(&ctx, &runner, &NullLogSink).await.unwrap();

    assert_eq!(result.entry_command.to_str(), Some("node"));
    assert!(result.entry_args[0].ends_with("node_modules/weather-mcp/index.js"));
}

#[tokio::test]
async fn missing_entry_point_errors() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = InstallContext {
        slug: Slug::new("weather-mcp").unwrap(),
        source: Source { kind: SourceKind::JsPkg, uri: "weather-mcp".into() },
        install_dir: dir.path().to_path_buf(),
        cancel: tokio_util::sync::CancellationToken::new(),
    };
    let runner = FakeCommandRunner::new();
    let err = JsPkgInstaller.install(&ctx, &runner, &NullLogSink).await.unwrap_err();
    assert!(matches!(err, InstallError::NoEntryPoint(_)));
}
