// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `msvd`: the supervisor daemon. Binds the control socket, serves
//! requests until told to stop, then drains every supervised process
//! before exiting.

use std::process;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use msv_daemon::engine::AppState;
use msv_daemon::{env, listener};
use msv_registry::PathLayout;

#[tokio::main]
async fn main() {
    let layout = match PathLayout::discover() {
        Ok(layout) => layout,
        Err(err) => {
            eprintln!("msvd: failed to resolve data directory: {err}");
            process::exit(1);
        }
    };
    if let Err(err) = layout.ensure_root() {
        eprintln!("msvd: failed to create data directory: {err}");
        process::exit(1);
    }

    let _guard = init_logging(&layout);
    tracing::info!(pid = process::id(), "--- msvd: starting ---");

    let state = Arc::new(AppState::new(layout.clone()));
    let socket_path = env::socket_path(&layout);
    let shutdown = CancellationToken::new();

    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        wait_for_shutdown_signal().await;
        tracing::info!("received shutdown signal");
        signal_shutdown.cancel();
    });

    if let Err(err) = listener::serve(&socket_path, state.clone(), shutdown).await {
        tracing::error!(error = %err, "listener exited with an error");
    }

    state.supervisor.shutdown(env::shutdown_deadline()).await;
    tracing::info!("msvd: stopped");
}

fn init_logging(layout: &PathLayout) -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::never(layout.root(), "daemon.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    guard
}

#[cfg(unix)]
async fn wait_for_shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};
    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = sigterm.recv() => {}
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to install SIGTERM handler, watching Ctrl-C only");
            let _ = tokio::signal::ctrl_c().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
