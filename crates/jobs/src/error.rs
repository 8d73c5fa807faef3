// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use msv_core::{JobId, SourceKind};

#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("unknown job {0}")]
    NotFound(JobId),

    #[error("job engine is at capacity ({max} running)")]
    AtCapacity { max: usize },

    #[error("job {0} is not in a terminal state")]
    NotTerminal(JobId),

    #[error("job {0} did not complete successfully and cannot be finalized")]
    NotSuccessful(JobId),

    #[error("job {0} has already been finalized")]
    AlreadyFinalized(JobId),

    #[error("job {0} has already been started")]
    AlreadyStarted(JobId),

    #[error("no installer available for source kind {0}")]
    UnsupportedSource(SourceKind),

    #[error(transparent)]
    Install(#[from] msv_installer::InstallError),

    #[error(transparent)]
    Registry(#[from] msv_registry::RegistryError),
}
