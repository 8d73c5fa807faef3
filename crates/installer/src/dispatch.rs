// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use msv_core::SourceKind;

use crate::git::GitInstaller;
use crate::installer::Installer;
use crate::js_pkg::JsPkgInstaller;
use crate::py_pkg::PyPkgInstaller;

/// Pick the installer for a source kind. Container sources have no
/// installer here — the job engine rejects them at the validation stage,
/// since running arbitrary container images is out of scope for this
/// supervisor.
pub fn for_source(kind: SourceKind) -> Option<Box<dyn Installer>> {
    match kind {
        SourceKind::Git => Some(Box::new(GitInstaller)),
        SourceKind::JsPkg => Some(Box::new(JsPkgInstaller)),
        SourceKind::PyPkg => Some(Box::new(PyPkgInstaller)),
        SourceKind::ContainerImage | SourceKind::ContainerCompose => None,
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
