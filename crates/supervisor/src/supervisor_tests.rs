// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use msv_core::{
    Entry, HealthPolicy, ProcessLifecycleState, RestartPolicy, RuntimeInfo, RuntimeKind, ServerEntry,
    Slug, Source, SourceKind, TransportKind,
};
use msv_health::{HealthError, HealthProber, ProbeSignal};
use msv_registry::{PathLayout, RegistryStore};
use msv_shell::TokioCommandRunner;

use super::*;

struct NeverHealthy;

#[async_trait]
impl HealthProber for NeverHealthy {
    async fn probe(&self, _entry: &Entry, _stdout_log: &std::path::Path) -> Result<ProbeSignal, HealthError> {
        Ok(ProbeSignal::Http { status: None })
    }
}

fn supervisor(dir: &tempfile::TempDir) -> (ProcessSupervisor, PathLayout) {
    let layout = PathLayout::at(dir.path());
    let sup = ProcessSupervisor::new(layout.clone(), Arc::new(TokioCommandRunner), Arc::new(NeverHealthy));
    (sup, layout)
}

fn seed(layout: &PathLayout, slug: &Slug, command: &str, args: &[&str]) {
    layout.ensure_server_dirs(slug).unwrap();
    let mut store = RegistryStore::load(layout.clone()).unwrap();
    store.upsert(ServerEntry {
        slug: slug.clone(),
        name: slug.as_str().to_string(),
        source: Source { kind: SourceKind::Git, uri: "https://example.test/repo".into() },
        runtime: RuntimeInfo { kind: RuntimeKind::Binary, manager_hint: None },
        entry: Entry {
            transport: TransportKind::Stdio,
            command: command.into(),
            args: args.iter().map(|s| s.to_string()).collect(),
            env: HashMap::new(),
            health_endpoint: None,
        },
        health: HealthPolicy {
            probe_kind: TransportKind::Stdio,
            interval_sec: 3600,
            timeout_sec: 10,
            restart_policy: RestartPolicy::Always,
            max_restarts: -1,
        },
    });
    store.save().unwrap();
    let server_entry = store.get(slug).unwrap();
    msv_registry::write_launcher(layout, slug, &server_entry.entry).unwrap();
}

#[tokio::test]
async fn starting_an_unknown_slug_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (sup, _layout) = supervisor(&dir);
    let err = sup.start(&Slug::new("ghost").unwrap()).unwrap_err();
    assert!(matches!(err, SupervisorError::UnknownSlug(_)));
}

#[tokio::test]
async fn stopping_an_unknown_slug_is_a_no_op_success() {
    let dir = tempfile::tempdir().unwrap();
    let (sup, _layout) = supervisor(&dir);
    sup.stop(&Slug::new("ghost").unwrap(), Duration::from_millis(50)).await.unwrap();
}

#[tokio::test]
async fn start_is_idempotent_while_already_running() {
    let dir = tempfile::tempdir().unwrap();
    let (sup, layout) = supervisor(&dir);
    let slug = Slug::new("svc").unwrap();
    seed(&layout, &slug, "sleep", &["5"]);

    sup.start(&slug).unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;
    sup.start(&slug).unwrap();

    assert_eq!(sup.info(&slug).unwrap().lifecycle, ProcessLifecycleState::Running);
    sup.stop(&slug, Duration::from_millis(300)).await.unwrap();
}

#[tokio::test]
async fn start_after_shutdown_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (sup, layout) = supervisor(&dir);
    let slug = Slug::new("svc").unwrap();
    seed(&layout, &slug, "sleep", &["5"]);

    sup.shutdown(Duration::from_millis(300)).await;
    let err = sup.start(&slug).unwrap_err();
    assert!(matches!(err, SupervisorError::ShuttingDown(_)));
}

#[tokio::test]
async fn set_env_persists_into_the_registry_entry() {
    let dir = tempfile::tempdir().unwrap();
    let (sup, layout) = supervisor(&dir);
    let slug = Slug::new("svc").unwrap();
    seed(&layout, &slug, "sleep", &["5"]);

    let mut env = HashMap::new();
    env.insert("API_KEY".to_string(), "secret".to_string());
    sup.set_env(&slug, env).unwrap();

    let store = RegistryStore::load(layout).unwrap();
    let entry = store.get(&slug).unwrap();
    assert_eq!(entry.entry.env.get("API_KEY"), Some(&"secret".to_string()));
}

#[tokio::test]
async fn summary_and_stats_reflect_a_running_process() {
    let dir = tempfile::tempdir().unwrap();
    let (sup, layout) = supervisor(&dir);
    let slug = Slug::new("svc").unwrap();
    seed(&layout, &slug, "sleep", &["5"]);

    sup.start(&slug).unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;

    let summary = sup.summary();
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0].lifecycle, ProcessLifecycleState::Running);

    let stats = sup.stats();
    assert_eq!(stats.total_processes, 1);
    assert_eq!(stats.running, 1);
    assert_eq!(stats.total_starts, 1);

    sup.stop(&slug, Duration::from_millis(300)).await.unwrap();
    assert_eq!(sup.stats().total_stops, 1);
}
