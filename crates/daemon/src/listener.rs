// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Accepts client connections on the data directory's Unix socket and
//! serves one [`Request`]/[`Response`] pair per connection.

use std::path::Path;
use std::sync::Arc;

use tokio::net::{UnixListener, UnixStream};
use tokio_util::sync::CancellationToken;

use crate::engine::{dispatch, AppState};
use crate::protocol::{read_message, write_message, Request};

/// Bind `socket_path`, removing a stale socket left behind by a daemon that
/// didn't shut down cleanly. Runs until `shutdown` fires, then stops
/// accepting new connections (in-flight ones are allowed to finish).
pub async fn serve(
    socket_path: &Path,
    state: Arc<AppState>,
    shutdown: CancellationToken,
) -> std::io::Result<()> {
    if socket_path.exists() {
        std::fs::remove_file(socket_path)?;
    }
    let listener = UnixListener::bind(socket_path)?;
    tracing::info!(path = %socket_path.display(), "listening");

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, _addr) = accepted?;
                let state = state.clone();
                tokio::spawn(async move {
                    if let Err(err) = handle_connection(stream, &state).await {
                        tracing::debug!(error = %err, "connection ended with an error");
                    }
                });
            }
            _ = shutdown.cancelled() => {
                tracing::info!("shutting down listener");
                let _ = std::fs::remove_file(socket_path);
                return Ok(());
            }
        }
    }
}

async fn handle_connection(mut stream: UnixStream, state: &AppState) -> std::io::Result<()> {
    let request: Request = match read_message(&mut stream).await {
        Ok(Some(request)) => request,
        Ok(None) => return Ok(()),
        Err(err) => {
            tracing::warn!(error = %err, "malformed request");
            return Ok(());
        }
    };

    let response = dispatch(state, request).await;
    if let Err(err) = write_message(&mut stream, &response).await {
        tracing::warn!(error = %err, "failed writing response");
    }
    Ok(())
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
