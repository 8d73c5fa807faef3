// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use msv_core::Slug;

#[derive(Debug, thiserror::Error)]
pub enum SupervisorError {
    #[error("no server registered under slug {0:?}")]
    UnknownSlug(Slug),

    #[error("supervisor is shutting down, refusing to start {0:?}")]
    ShuttingDown(Slug),

    #[error("server entry for {0:?} has no resolved entry command")]
    UnresolvedEntryCommand(Slug),

    #[error(transparent)]
    Runner(#[from] msv_shell::RunnerError),

    #[error(transparent)]
    Registry(#[from] msv_registry::RegistryError),
}
