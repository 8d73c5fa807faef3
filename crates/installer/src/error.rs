// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    #[error("command runner error: {0}")]
    Runner(#[from] msv_shell::RunnerError),

    #[error("io error at {path}: {source}")]
    Io { path: std::path::PathBuf, #[source] source: std::io::Error },

    #[error("{step} failed with exit code {code:?}: {stderr}")]
    StepFailed { step: &'static str, code: Option<i32>, stderr: String },

    #[error("could not find an entry point under {0}")]
    NoEntryPoint(std::path::PathBuf),

    #[error("unsupported source kind {0} for this installer")]
    UnsupportedSource(msv_core::SourceKind),
}
