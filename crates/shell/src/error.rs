// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("failed to spawn {command:?}: {source}")]
    Spawn { command: String, #[source] source: std::io::Error },

    #[error("command {command:?} timed out after {timeout_secs}s")]
    Timeout { command: String, timeout_secs: u64 },

    #[error("working directory does not exist: {0}")]
    MissingCwd(PathBuf),

    #[error("io error waiting on {command:?}: {source}")]
    Wait { command: String, #[source] source: std::io::Error },
}
