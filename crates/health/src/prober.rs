// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Gathers the raw [`ProbeSignal`] evidence for a server's configured
//! transport. Classification into a [`msv_core::HealthStatus`] is a separate,
//! pure step — see [`crate::classifier::classify`].

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use msv_core::Entry;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

use crate::error::HealthError;
use crate::handshake;
use crate::signal::ProbeSignal;

const HTTP_PROBE_TIMEOUT: Duration = Duration::from_secs(3);

#[async_trait]
pub trait HealthProber: Send + Sync {
    async fn probe(&self, entry: &Entry, stdout_log: &Path) -> Result<ProbeSignal, HealthError>;
}

/// Production prober: `GET entry.health_endpoint` for HTTP transport, tail
/// the stdout log plus handshake scan for stdio.
#[derive(Debug, Default, Clone)]
pub struct LiveHealthProber {
    client: reqwest::Client,
}

impl LiveHealthProber {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(HTTP_PROBE_TIMEOUT)
                .build()
                .unwrap_or_default(),
        }
    }
}

#[async_trait]
impl HealthProber for LiveHealthProber {
    async fn probe(&self, entry: &Entry, stdout_log: &Path) -> Result<ProbeSignal, HealthError> {
        match entry.transport {
            msv_core::TransportKind::Http => {
                let url = entry.health_endpoint.as_deref().ok_or(HealthError::MissingEndpoint)?;
                let status = match self.client.get(url).send().await {
                    Ok(response) => Some(response.status().as_u16()),
                    Err(_) => None,
                };
                Ok(ProbeSignal::Http { status })
            }
            msv_core::TransportKind::Stdio => probe_stdio_log(stdout_log).await,
        }
    }
}

async fn probe_stdio_log(log_path: &Path) -> Result<ProbeSignal, HealthError> {
    let metadata = match tokio::fs::metadata(log_path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(ProbeSignal::StdioLog { age_since_write: Duration::MAX, handshake_seen: false });
        }
        Err(source) => return Err(HealthError::Io { path: log_path.to_path_buf(), source }),
    };

    let age_since_write = metadata
        .modified()
        .ok()
        .and_then(|m| m.elapsed().ok())
        .unwrap_or(Duration::MAX);

    let tail = read_tail(log_path, handshake::SCAN_WINDOW_BYTES)
        .await
        .map_err(|source| HealthError::Io { path: log_path.to_path_buf(), source })?;

    Ok(ProbeSignal::StdioLog { age_since_write, handshake_seen: handshake::seen_in(&tail) })
}

async fn read_tail(path: &Path, max_bytes: usize) -> std::io::Result<Vec<u8>> {
    let mut file = tokio::fs::File::open(path).await?;
    let len = file.metadata().await?.len();
    let start = len.saturating_sub(max_bytes as u64);
    file.seek(std::io::SeekFrom::Start(start)).await?;
    let mut buf = Vec::with_capacity((len - start) as usize);
    file.read_to_end(&mut buf).await?;
    Ok(buf)
}

#[cfg(test)]
#[path = "prober_tests.rs"]
mod tests;
