// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

use async_trait::async_trait;
use msv_core::{InstallationResult, SystemClock};
use msv_installer::{InstallContext, InstallError, InstallLogSink, Installer};
use msv_shell::FakeCommandRunner;

use super::*;

struct SlowInstaller;

#[async_trait]
impl Installer for SlowInstaller {
    async fn install(
        &self,
        _ctx: &InstallContext,
        _runner: &dyn CommandRunner,
        log: &dyn InstallLogSink,
    ) -> Result<InstallationResult, InstallError> {
        log.log(Stage::Downloading, LogLevel::Info, "fetching");
        tokio::time::sleep(Duration::from_secs(10)).await;
        Ok(InstallationResult::default())
    }
}

struct FastInstaller;

#[async_trait]
impl Installer for FastInstaller {
    async fn install(
        &self,
        _ctx: &InstallContext,
        _runner: &dyn CommandRunner,
        _log: &dyn InstallLogSink,
    ) -> Result<InstallationResult, InstallError> {
        Ok(InstallationResult::default())
    }
}

struct FailingInstaller;

#[async_trait]
impl Installer for FailingInstaller {
    async fn install(
        &self,
        _ctx: &InstallContext,
        _runner: &dyn CommandRunner,
        _log: &dyn InstallLogSink,
    ) -> Result<InstallationResult, InstallError> {
        Err(InstallError::NoEntryPoint("/tmp/nope".into()))
    }
}

fn job() -> Arc<JobEntry> {
    Arc::new(JobEntry::new(
        msv_core::JobId::new(),
        msv_core::Slug::new("demo").unwrap(),
        "demo".into(),
        msv_core::SourceKind::Git,
        "https://example/demo".into(),
        0,
    ))
}

#[tokio::test]
async fn successful_install_completes_the_job() {
    let dir = tempfile::tempdir().unwrap();
    let layout = PathLayout::at(dir.path());
    layout.ensure_root().unwrap();
    let job = job();
    layout.ensure_server_dirs(&job.slug).unwrap();

    run(job.clone(), Box::new(FastInstaller), Arc::new(FakeCommandRunner::new()), layout, SystemClock)
        .await;

    let snap = job.snapshot();
    assert_eq!(snap.status, JobStatus::Completed);
    assert_eq!(snap.overall_progress, 100);
    assert!(snap.ended_at_ms.is_some());
}

#[tokio::test]
async fn failing_install_fails_the_job_with_a_message() {
    let dir = tempfile::tempdir().unwrap();
    let layout = PathLayout::at(dir.path());
    layout.ensure_root().unwrap();
    let job = job();
    layout.ensure_server_dirs(&job.slug).unwrap();

    run(job.clone(), Box::new(FailingInstaller), Arc::new(FakeCommandRunner::new()), layout, SystemClock)
        .await;

    let snap = job.snapshot();
    assert_eq!(snap.status, JobStatus::Failed);
    assert!(snap.error.is_some());
}

#[tokio::test(start_paused = true)]
async fn cancelling_mid_install_yields_cancelled_not_failed() {
    let dir = tempfile::tempdir().unwrap();
    let layout = PathLayout::at(dir.path());
    layout.ensure_root().unwrap();
    let job = job();
    layout.ensure_server_dirs(&job.slug).unwrap();

    let cancel_job = job.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        cancel_job.cancel.cancel();
    });

    run(job.clone(), Box::new(SlowInstaller), Arc::new(FakeCommandRunner::new()), layout, SystemClock)
        .await;

    let snap = job.snapshot();
    assert_eq!(snap.status, JobStatus::Cancelled);
    assert!(snap.logs.iter().any(|l| l.message.contains("fetching")));
}
