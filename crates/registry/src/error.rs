// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use msv_core::Slug;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("io error at {path}: {source}")]
    Io { path: std::path::PathBuf, #[source] source: std::io::Error },

    #[error("malformed registry data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not acquire exclusive lock on {path}: {source}")]
    Lock { path: std::path::PathBuf, #[source] source: std::io::Error },

    #[error("no server registered under slug {0:?}")]
    NotFound(Slug),

    #[error("a server is already registered under slug {0:?}")]
    AlreadyExists(Slug),

    #[error("could not determine a platform data directory")]
    NoDataDir,
}
