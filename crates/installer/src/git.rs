// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clones a git repository and detects its runtime by the manifest files it
//! finds (`package.json` → npm, `requirements.txt`/`pyproject.toml` → pip).

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use msv_core::{InstallationResult, LogLevel, RuntimeKind, Stage};
use msv_shell::{CommandRunner, CommandSpec, DEFAULT_CANCEL_GRACE};

use crate::context::{InstallContext, InstallLogSink};
use crate::entrypoint;
use crate::error::InstallError;
use crate::installer::Installer;

const CLONE_TIMEOUT: Duration = Duration::from_secs(5 * 60);
const INSTALL_TIMEOUT: Duration = Duration::from_secs(10 * 60);

pub struct GitInstaller;

#[async_trait]
impl Installer for GitInstaller {
    async fn install(
        &self,
        ctx: &InstallContext,
        runner: &dyn CommandRunner,
        log: &dyn InstallLogSink,
    ) -> Result<InstallationResult, InstallError> {
        log.log(Stage::Downloading, LogLevel::Info, &format!("cloning {}", ctx.source.uri));
        let clone = CommandSpec::new("git")
            .args(["clone", "--depth", "1", ctx.source.uri.as_str()])
            .arg(ctx.install_dir.to_string_lossy().into_owned())
            .timeout(CLONE_TIMEOUT);
        let output = runner.run_cancellable(&clone, ctx.cancel.clone(), DEFAULT_CANCEL_GRACE).await?;
        if !output.success() {
            return Err(InstallError::StepFailed {
                step: "git clone",
                code: output.status,
                stderr: output.stderr,
            });
        }

        let runtime_kind = if ctx.install_dir.join("package.json").is_file() {
            log.log(Stage::Installing, LogLevel::Info, "detected package.json, running npm install");
            let install = CommandSpec::new("npm")
                .args(["install", "--omit=dev"])
                .cwd(ctx.install_dir.clone())
                .timeout(INSTALL_TIMEOUT);
            let output = runner.run_cancellable(&install, ctx.cancel.clone(), DEFAULT_CANCEL_GRACE).await?;
            if !output.success() {
                return Err(InstallError::StepFailed {
                    step: "npm install",
                    code: output.status,
                    stderr: output.stderr,
                });
            }
            RuntimeKind::Node
        } else if ctx.install_dir.join("requirements.txt").is_file()
            || ctx.install_dir.join("pyproject.toml").is_file()
        {
            log.log(Stage::Installing, LogLevel::Info, "detected a Python project, creating a venv");
            install_python_deps(ctx, runner).await?;
            RuntimeKind::Python
        } else {
            RuntimeKind::Binary
        };

        log.log(Stage::Configuring, LogLevel::Info, "locating entry point");
        let entry_point = entrypoint::find(&ctx.install_dir)
            .or_else(|| entrypoint::find_by_glob(&ctx.install_dir))
            .ok_or_else(|| InstallError::NoEntryPoint(ctx.install_dir.clone()))?;

        let (entry_command, entry_args) = match runtime_kind {
            RuntimeKind::Node => ("node".into(), vec![entry_point.to_string_lossy().into_owned()]),
            RuntimeKind::Python => {
                let venv_python = ctx.install_dir.join("venv").join("bin").join("python");
                (venv_python.to_string_lossy().into_owned(), vec![entry_point.to_string_lossy().into_owned()])
            }
            _ => (entry_point.to_string_lossy().into_owned(), Vec::new()),
        };

        Ok(InstallationResult {
            install_path: ctx.install_dir.clone(),
            runtime_path: ctx.install_dir.clone(),
            bin_path: entry_point.clone(),
            entry_command: entry_command.into(),
            entry_args,
            environment: HashMap::new(),
            runtime_kind: Some(runtime_kind),
            package_manager_kind: match runtime_kind {
                RuntimeKind::Node => Some("npm".into()),
                RuntimeKind::Python => Some("pip".into()),
                _ => None,
            },
            installed_version: None,
            metadata: HashMap::new(),
        })
    }
}

async fn install_python_deps(ctx: &InstallContext, runner: &dyn CommandRunner) -> Result<(), InstallError> {
    let venv_dir = ctx.install_dir.join("venv");
    let venv = CommandSpec::new("python3")
        .args(["-m".to_string(), "venv".to_string(), venv_dir.to_string_lossy().into_owned()]);
    let output = runner.run_cancellable(&venv, ctx.cancel.clone(), DEFAULT_CANCEL_GRACE).await?;
    if !output.success() {
        return Err(InstallError::StepFailed { step: "python -m venv", code: output.status, stderr: output.stderr });
    }

    let pip = venv_dir.join("bin").join("pip");
    let requirements = ctx.install_dir.join("requirements.txt");
    let install = if requirements.is_file() {
        CommandSpec::new(pip)
            .args(["install".to_string(), "-r".to_string(), requirements.to_string_lossy().into_owned()])
            .timeout(INSTALL_TIMEOUT)
    } else {
        CommandSpec::new(pip).args(["install", "."]).cwd(ctx.install_dir.clone()).timeout(INSTALL_TIMEOUT)
    };
    let output = runner.run_cancellable(&install, ctx.cancel.clone(), DEFAULT_CANCEL_GRACE).await?;
    if !output.success() {
        return Err(InstallError::StepFailed { step: "pip install", code: output.status, stderr: output.stderr });
    }
    Ok(())
}

#[cfg(test)]
#[path = "git_tests.rs"]
mod tests;
