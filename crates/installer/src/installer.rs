// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use async_trait::async_trait;
use msv_core::InstallationResult;
use msv_shell::CommandRunner;

use crate::context::{InstallContext, InstallLogSink};
use crate::error::InstallError;

/// One installation strategy per [`msv_core::SourceKind`]. Installers only
/// ever run short commands to completion through [`CommandRunner::run`] —
/// spawning the long-lived server process itself is the supervisor's job,
/// not the installer's.
#[async_trait]
pub trait Installer: Send + Sync {
    async fn install(
        &self,
        ctx: &InstallContext,
        runner: &dyn CommandRunner,
        log: &dyn InstallLogSink,
    ) -> Result<InstallationResult, InstallError>;
}
