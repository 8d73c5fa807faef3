// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

use msv_core::{JobStatus, Slug, SourceKind};
use msv_shell::FakeCommandRunner;

use super::*;

fn manager(dir: &std::path::Path) -> JobManager {
    let layout = PathLayout::at(dir);
    layout.ensure_root().unwrap();
    JobManager::new(Arc::new(FakeCommandRunner::new()), layout)
}

async fn wait_terminal(mgr: &JobManager, job_id: JobId) -> JobSnapshot {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let snap = mgr.get(job_id).unwrap();
            if snap.done() {
                return snap;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("job did not reach a terminal state in time")
}

#[tokio::test]
async fn create_always_succeeds_and_starts_pending() {
    let dir = tempfile::tempdir().unwrap();
    let mgr = manager(dir.path());
    let id = mgr.create(Slug::new("demo").unwrap(), SourceKind::JsPkg, "demo-pkg".into(), None);
    let snap = mgr.get(id).unwrap();
    assert_eq!(snap.status, JobStatus::Pending);
}

#[tokio::test]
async fn cancelling_a_pending_job_skips_running_entirely() {
    let dir = tempfile::tempdir().unwrap();
    let mgr = manager(dir.path());
    let id = mgr.create(Slug::new("demo").unwrap(), SourceKind::JsPkg, "demo-pkg".into(), None);
    mgr.cancel(id).unwrap();
    let snap = mgr.get(id).unwrap();
    assert_eq!(snap.status, JobStatus::Cancelled);
}

#[tokio::test]
async fn cancel_is_idempotent_on_a_terminal_job() {
    let dir = tempfile::tempdir().unwrap();
    let mgr = manager(dir.path());
    let id = mgr.create(Slug::new("demo").unwrap(), SourceKind::JsPkg, "demo-pkg".into(), None);
    mgr.cancel(id).unwrap();
    mgr.cancel(id).unwrap();
    assert_eq!(mgr.get(id).unwrap().status, JobStatus::Cancelled);
}

#[tokio::test]
async fn cancel_of_unknown_job_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let mgr = manager(dir.path());
    let err = mgr.cancel(JobId::new()).unwrap_err();
    assert!(matches!(err, JobError::NotFound(_)));
}

#[tokio::test]
async fn starting_beyond_capacity_is_rejected_without_changing_state() {
    let dir = tempfile::tempdir().unwrap();
    let layout = PathLayout::at(dir.path());
    layout.ensure_root().unwrap();
    let mgr = JobManager::new(Arc::new(FakeCommandRunner::new()), layout).with_max_concurrent(1);

    let first = mgr.create(Slug::new("one").unwrap(), SourceKind::JsPkg, "one-pkg".into(), None);
    let second = mgr.create(Slug::new("two").unwrap(), SourceKind::JsPkg, "two-pkg".into(), None);

    mgr.start(first).unwrap();
    let err = mgr.start(second).unwrap_err();
    assert!(matches!(err, JobError::AtCapacity { max: 1 }));
    assert_eq!(mgr.get(second).unwrap().status, JobStatus::Pending);
}

#[tokio::test]
async fn starting_twice_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mgr = manager(dir.path());
    let id = mgr.create(Slug::new("demo").unwrap(), SourceKind::JsPkg, "demo-pkg".into(), None);
    mgr.start(id).unwrap();
    let err = mgr.start(id).unwrap_err();
    assert!(matches!(err, JobError::AlreadyStarted(_)));
}

#[tokio::test]
async fn successful_install_can_be_finalized_into_a_registered_entry() {
    let dir = tempfile::tempdir().unwrap();
    let layout = PathLayout::at(dir.path());
    layout.ensure_root().unwrap();
    let mgr = JobManager::new(Arc::new(FakeCommandRunner::new()), layout.clone());
    let slug = Slug::new("weather").unwrap();

    // npm doesn't actually run under the fake runner, so pre-seed the
    // on-disk layout the real installer would have produced.
    let package_dir = layout.install_dir(&slug).join("node_modules").join("weather");
    std::fs::create_dir_all(&package_dir).unwrap();
    std::fs::write(package_dir.join("index.js"), "// entry").unwrap();

    let id = mgr.create(slug.clone(), SourceKind::JsPkg, "weather".into(), Some("Weather".into()));
    mgr.start(id).unwrap();
    let snap = wait_terminal(&mgr, id).await;
    assert_eq!(snap.status, JobStatus::Completed);
    assert_eq!(snap.overall_progress, 100);

    let registered = mgr.finalize(id).unwrap();
    assert_eq!(registered.slug, slug);
    assert_eq!(registered.name, "Weather");

    // Finalizing twice is rejected.
    assert!(matches!(mgr.finalize(id), Err(JobError::AlreadyFinalized(_))));
}

#[tokio::test]
async fn finalize_before_completion_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mgr = manager(dir.path());
    let id = mgr.create(Slug::new("demo").unwrap(), SourceKind::JsPkg, "demo-pkg".into(), None);
    assert!(matches!(mgr.finalize(id), Err(JobError::NotTerminal(_))));
}

#[tokio::test]
async fn finalize_of_a_failed_job_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mgr = manager(dir.path());
    // No entry point ever materializes under the fake runner, so this job
    // fails fast with NoEntryPoint.
    let id = mgr.create(Slug::new("demo").unwrap(), SourceKind::JsPkg, "demo-pkg".into(), None);
    mgr.start(id).unwrap();
    let snap = wait_terminal(&mgr, id).await;
    assert_eq!(snap.status, JobStatus::Failed);
    assert!(matches!(mgr.finalize(id), Err(JobError::NotSuccessful(_))));
}

#[tokio::test]
async fn reap_drops_old_terminal_jobs_but_keeps_fresh_ones() {
    let dir = tempfile::tempdir().unwrap();
    let layout = PathLayout::at(dir.path());
    layout.ensure_root().unwrap();
    let clock = msv_core::FakeClock::new();
    let mgr = JobManager::with_clock(Arc::new(FakeCommandRunner::new()), layout, clock.clone())
        .with_retention(Duration::from_secs(60));

    let old = mgr.create(Slug::new("old").unwrap(), SourceKind::JsPkg, "old-pkg".into(), None);
    mgr.cancel(old).unwrap();
    clock.advance(Duration::from_secs(120));
    let fresh = mgr.create(Slug::new("fresh").unwrap(), SourceKind::JsPkg, "fresh-pkg".into(), None);
    mgr.cancel(fresh).unwrap();

    mgr.reap();

    assert!(mgr.get(old).is_none());
    assert!(mgr.get(fresh).is_some());
}
