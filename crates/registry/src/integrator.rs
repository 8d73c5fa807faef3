// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registry integrator: turns a finished installation into a registered,
//! startable server. The job engine hands us an [`InstallationResult`]; we
//! derive a [`ServerEntry`] and [`ServerManifest`] and persist both under the
//! registry's exclusive lock so a concurrent `list`/`register` never
//! observes a half-written state.

use chrono::Utc;
use msv_core::{Entry, InstallationResult, JobId, RuntimeInfo, RuntimeKind, ServerEntry, Slug, Source, TransportKind};

use crate::error::RegistryError;
use crate::launcher;
use crate::manifest::ServerManifest;
use crate::paths::PathLayout;
use crate::store::RegistryStore;

/// Register a completed installation, overwriting any prior entry for the
/// same slug (reinstall/upgrade case).
pub fn register(
    layout: &PathLayout,
    slug: &Slug,
    name: &str,
    source: Source,
    transport: TransportKind,
    job_id: JobId,
    result: InstallationResult,
) -> Result<ServerEntry, RegistryError> {
    layout.ensure_server_dirs(slug)?;

    let (mut store, _guard) = RegistryStore::lock_and_load(layout.clone())?;

    let entry = ServerEntry {
        slug: slug.clone(),
        name: name.to_string(),
        source: source.clone(),
        runtime: RuntimeInfo {
            kind: result.runtime_kind.unwrap_or(RuntimeKind::Binary),
            manager_hint: result.package_manager_kind.clone(),
        },
        entry: Entry {
            transport,
            command: result.entry_command.clone(),
            args: result.entry_args.clone(),
            env: result.environment.clone(),
            health_endpoint: result.metadata.get("health_endpoint").cloned(),
        },
        health: msv_core::HealthPolicy::default_for(transport),
    };

    let manifest = ServerManifest {
        slug: slug.clone(),
        job_id,
        source,
        installed_at: Utc::now(),
        installation: result,
    };
    manifest.save(layout)?;

    launcher::write_launcher(layout, slug, &entry.entry)?;

    store.upsert(entry.clone());
    store.save()?;

    Ok(entry)
}

/// Deregister a server: drop its registry entry. The installed files and
/// manifest on disk are left behind for a subsequent reinstall to reuse or
/// for an operator to inspect; callers that want a clean wipe remove
/// `layout.server_dir(slug)` themselves after this returns.
pub fn deregister(layout: &PathLayout, slug: &Slug) -> Result<ServerEntry, RegistryError> {
    let (mut store, _guard) = RegistryStore::lock_and_load(layout.clone())?;
    let entry = store.remove(slug)?;
    store.save()?;
    Ok(entry)
}

#[cfg(test)]
#[path = "integrator_tests.rs"]
mod tests;
