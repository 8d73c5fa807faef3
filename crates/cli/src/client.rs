// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Connects to `msvd` over its control socket, spawning the daemon as a
//! detached background process the first time a client needs it.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use msv_daemon::protocol::{read_message, write_message};
use msv_daemon::{Request, Response};
use msv_registry::PathLayout;
use tokio::net::UnixStream;
use tokio::time::sleep;

const SPAWN_POLL_INTERVAL: Duration = Duration::from_millis(100);
const SPAWN_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("could not reach msvd and could not start it: {0}")]
    Spawn(std::io::Error),
    #[error("msvd did not come up within {0:?}")]
    Timeout(Duration),
    #[error(transparent)]
    Protocol(#[from] msv_daemon::protocol::ProtocolError),
    #[error("connection to msvd closed without a response")]
    NoResponse,
}

/// A connection to `msvd`, good for exactly one request/response pair.
pub struct DaemonClient {
    stream: UnixStream,
}

impl DaemonClient {
    /// Connect to the daemon at `layout`'s socket, spawning `msvd` first if
    /// nothing is listening yet.
    pub async fn connect(layout: &PathLayout) -> Result<Self, ClientError> {
        let socket_path = msv_daemon::env::socket_path(layout);
        match UnixStream::connect(&socket_path).await {
            Ok(stream) => Ok(Self { stream }),
            Err(_) => {
                spawn_daemon()?;
                let stream = wait_for_socket(&socket_path).await?;
                Ok(Self { stream })
            }
        }
    }

    pub async fn call(mut self, request: Request) -> Result<Response, ClientError> {
        write_message(&mut self.stream, &request).await?;
        match read_message(&mut self.stream).await? {
            Some(response) => Ok(response),
            None => Err(ClientError::NoResponse),
        }
    }
}

fn spawn_daemon() -> Result<(), ClientError> {
    std::process::Command::new("msvd")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(ClientError::Spawn)?;
    Ok(())
}

async fn wait_for_socket(socket_path: &Path) -> Result<UnixStream, ClientError> {
    let deadline = tokio::time::Instant::now() + SPAWN_TIMEOUT;
    loop {
        if let Ok(stream) = UnixStream::connect(socket_path).await {
            return Ok(stream);
        }
        if tokio::time::Instant::now() >= deadline {
            return Err(ClientError::Timeout(SPAWN_TIMEOUT));
        }
        sleep(SPAWN_POLL_INTERVAL).await;
    }
}
