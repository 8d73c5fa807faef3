// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#[derive(Debug, thiserror::Error)]
pub enum HealthError {
    #[error("health endpoint not configured for an http-transport server")]
    MissingEndpoint,

    #[error("http probe request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("io error reading log file {path}: {source}")]
    Io { path: std::path::PathBuf, #[source] source: std::io::Error },
}
