// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Installs an npm package by name into a local, scoped `node_modules`
//! (`npm install --prefix <install_dir>`), then locates its entry point
//! under `node_modules/<package>`.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use msv_core::{InstallationResult, LogLevel, RuntimeKind, Stage};
use msv_shell::{CommandRunner, CommandSpec, DEFAULT_CANCEL_GRACE};

use crate::context::{InstallContext, InstallLogSink};
use crate::entrypoint;
use crate::error::InstallError;
use crate::installer::Installer;

const INSTALL_TIMEOUT: Duration = Duration::from_secs(10 * 60);

pub struct JsPkgInstaller;

impl JsPkgInstaller {
    fn package_name(uri: &str) -> &str {
        // `uri` may carry a version pin (`name@1.2.3`); npm accepts that
        // directly, but the on-disk node_modules dir uses the bare name.
        uri.split('@').next().unwrap_or(uri)
    }
}

#[async_trait]
impl Installer for JsPkgInstaller {
    async fn install(
        &self,
        ctx: &InstallContext,
        runner: &dyn CommandRunner,
        log: &dyn InstallLogSink,
    ) -> Result<InstallationResult, InstallError> {
        tokio::fs::create_dir_all(&ctx.install_dir)
            .await
            .map_err(|source| InstallError::Io { path: ctx.install_dir.clone(), source })?;

        log.log(Stage::Downloading, LogLevel::Info, &format!("npm install {}", ctx.source.uri));
        let install = CommandSpec::new("npm")
            .args(["install", "--omit=dev", "--prefix"])
            .arg(ctx.install_dir.to_string_lossy().into_owned())
            .arg(ctx.source.uri.clone())
            .timeout(INSTALL_TIMEOUT);
        let output = runner.run_cancellable(&install, ctx.cancel.clone(), DEFAULT_CANCEL_GRACE).await?;
        if !output.success() {
            return Err(InstallError::StepFailed {
                step: "npm install",
                code: output.status,
                stderr: output.stderr,
            });
        }

        let package_dir =
            ctx.install_dir.join("node_modules").join(Self::package_name(&ctx.source.uri));
        let entry_point = entrypoint::find(&package_dir)
            .or_else(|| entrypoint::find_by_glob(&package_dir))
            .ok_or_else(|| InstallError::NoEntryPoint(package_dir.clone()))?;

        Ok(InstallationResult {
            install_path: ctx.install_dir.clone(),
            runtime_path: ctx.install_dir.join("node_modules"),
            bin_path: entry_point.clone(),
            entry_command: "node".into(),
            entry_args: vec![entry_point.to_string_lossy().into_owned()],
            environment: HashMap::new(),
            runtime_kind: Some(RuntimeKind::Node),
            package_manager_kind: Some("npm".into()),
            installed_version: None,
            metadata: HashMap::new(),
        })
    }
}

#[cfg(test)]
#[path = "js_pkg_tests.rs"]
mod tests;
