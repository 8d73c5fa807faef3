// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-server manifest: what an installer actually did, kept alongside the
//! registry entry for provenance and reinstall/upgrade decisions.

use chrono::{DateTime, Utc};
use msv_core::{InstallationResult, JobId, Slug, Source};
use serde::{Deserialize, Serialize};

use crate::error::RegistryError;
use crate::paths::PathLayout;
use crate::persist;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerManifest {
    pub slug: Slug,
    pub job_id: JobId,
    pub source: Source,
    pub installed_at: DateTime<Utc>,
    pub installation: InstallationResult,
}

impl ServerManifest {
    pub fn load(layout: &PathLayout, slug: &Slug) -> Result<Option<Self>, RegistryError> {
        persist::read_json(&layout.manifest_file(slug))
    }

    pub fn save(&self, layout: &PathLayout) -> Result<(), RegistryError> {
        persist::write_atomic(&layout.manifest_file(&self.slug), self)
    }
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
