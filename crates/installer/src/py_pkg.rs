// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Installs a PyPI package into a private venv and launches it through the
//! console-script entry point pip installs under `venv/bin/<package>`.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use msv_core::{InstallationResult, LogLevel, RuntimeKind, Stage};
use msv_shell::{CommandRunner, CommandSpec, DEFAULT_CANCEL_GRACE};

use crate::context::{InstallContext, InstallLogSink};
use crate::error::InstallError;
use crate::installer::Installer;

const INSTALL_TIMEOUT: Duration = Duration::from_secs(10 * 60);

pub struct PyPkgInstaller;

impl PyPkgInstaller {
    fn package_name(uri: &str) -> &str {
        uri.split(|c| matches!(c, '=' | '>' | '<')).next().unwrap_or(uri).trim()
    }
}

#[async_trait]
impl Installer for PyPkgInstaller {
    async fn install(
        &self,
        ctx: &InstallContext,
        runner: &dyn CommandRunner,
        log: &dyn InstallLogSink,
    ) -> Result<InstallationResult, InstallError> {
        let venv_dir = ctx.install_dir.join("venv");
        log.log(Stage::Installing, LogLevel::Info, "creating venv");
        let venv = CommandSpec::new("python3")
            .args(["-m".to_string(), "venv".to_string(), venv_dir.to_string_lossy().into_owned()]);
        let output = runner.run_cancellable(&venv, ctx.cancel.clone(), DEFAULT_CANCEL_GRACE).await?;
        if !output.success() {
            return Err(InstallError::StepFailed {
                step: "python -m venv",
                code: output.status,
                stderr: output.stderr,
            });
        }

        log.log(Stage::Installing, LogLevel::Info, &format!("pip install {}", ctx.source.uri));
        let pip = venv_dir.join("bin").join("pip");
        let install =
            CommandSpec::new(pip).args(["install", ctx.source.uri.as_str()]).timeout(INSTALL_TIMEOUT);
        let output = runner.run_cancellable(&install, ctx.cancel.clone(), DEFAULT_CANCEL_GRACE).await?;
        if !output.success() {
            return Err(InstallError::StepFailed {
                step: "pip install",
                code: output.status,
                stderr: output.stderr,
            });
        }

        let package_name = Self::package_name(&ctx.source.uri);
        let console_script = venv_dir.join("bin").join(package_name);

        Ok(InstallationResult {
            install_path: ctx.install_dir.clone(),
            runtime_path: venv_dir.clone(),
            bin_path: console_script.clone(),
            entry_command: console_script,
            entry_args: Vec::new(),
            environment: HashMap::new(),
            runtime_kind: Some(RuntimeKind::Python),
            package_manager_kind: Some("pip".into()),
            installed_version: None,
            metadata: HashMap::new(),
        })
    }
}

#[cfg(test)]
#[path = "py_pkg_tests.rs"]
mod tests;
