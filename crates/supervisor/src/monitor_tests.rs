// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use msv_core::{FakeClock, HealthPolicy, HealthStatus, RestartPolicy, Slug, TransportKind};
use msv_health::{HealthError, ProbeSignal};
use tokio_util::sync::CancellationToken;

use super::*;
use crate::process::ProcessHandle;

struct ScriptedProber;

#[async_trait]
impl HealthProber for ScriptedProber {
    async fn probe(&self, _entry: &Entry, _stdout_log: &std::path::Path) -> Result<ProbeSignal, HealthError> {
        Ok(ProbeSignal::Http { status: Some(200) })
    }
}

fn entry() -> Entry {
    Entry {
        transport: TransportKind::Http,
        command: "/bin/echo".into(),
        args: vec![],
        env: HashMap::new(),
        health_endpoint: Some("http://127.0.0.1:9/health".into()),
    }
}

fn policy() -> HealthPolicy {
    HealthPolicy {
        probe_kind: TransportKind::Http,
        interval_sec: 1,
        timeout_sec: 3,
        restart_policy: RestartPolicy::OnFailure,
        max_restarts: 3,
    }
}

#[tokio::test(start_paused = true)]
async fn a_healthy_probe_marks_the_process_ready() {
    let handle = Arc::new(ProcessHandle::new(Slug::new("svc").unwrap(), "svc".into()));
    let cancel = CancellationToken::new();
    let exited = CancellationToken::new();
    let clock = FakeClock::new();

    let task = tokio::spawn(run(
        handle.clone(),
        entry(),
        policy(),
        std::path::PathBuf::from("/dev/null"),
        Arc::new(ScriptedProber),
        clock,
        cancel.clone(),
        exited.clone(),
    ));

    tokio::time::advance(Duration::from_secs(1)).await;
    exited.cancel();
    task.await.unwrap();

    assert_eq!(handle.state.lock().health, HealthStatus::Ready);
}

#[tokio::test(start_paused = true)]
async fn exited_token_stops_the_monitor_loop() {
    let handle = Arc::new(ProcessHandle::new(Slug::new("svc").unwrap(), "svc".into()));
    let cancel = CancellationToken::new();
    let exited = CancellationToken::new();
    exited.cancel();

    tokio::time::timeout(
        Duration::from_secs(1),
        run(handle, entry(), policy(), std::path::PathBuf::from("/dev/null"), Arc::new(ScriptedProber), FakeClock::new(), cancel, exited),
    )
    .await
    .expect("monitor loop should exit immediately once `exited` is already cancelled");
}
