// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;
use std::time::Duration;

use msv_registry::PathLayout;
use tokio::net::UnixStream;
use tokio_util::sync::CancellationToken;

use super::*;
use crate::engine::AppState;
use crate::protocol::Response;

fn app_state(dir: &tempfile::TempDir) -> Arc<AppState> {
    let layout = PathLayout::at(dir.path());
    layout.ensure_root().unwrap();
    Arc::new(AppState::new(layout))
}

#[tokio::test]
async fn serves_a_ping_and_then_stops_on_shutdown() {
    let dir = tempfile::tempdir().unwrap();
    let socket_path = dir.path().join("msvd.sock");
    let shutdown = CancellationToken::new();

    let server_shutdown = shutdown.clone();
    let server_path = socket_path.clone();
    let state = app_state(&dir);
    let server = tokio::spawn(async move { serve(&server_path, state, server_shutdown).await });

    // Give the listener a moment to bind before dialing in.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let mut stream = UnixStream::connect(&socket_path).await.unwrap();
    write_message(&mut stream, &Request::Ping).await.unwrap();
    let response: Response = read_message(&mut stream).await.unwrap().unwrap();
    assert_eq!(response, Response::Pong);

    shutdown.cancel();
    tokio::time::timeout(Duration::from_secs(1), server).await.unwrap().unwrap().unwrap();
    assert!(!socket_path.exists(), "listener should clean up its socket file on shutdown");
}
