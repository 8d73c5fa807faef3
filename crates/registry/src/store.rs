// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The registry itself: a `slug -> ServerEntry` map persisted to
//! `registry.json`, single-writer/multi-reader via an advisory file lock.

use std::fs::File;

use indexmap::IndexMap;
use msv_core::{ServerEntry, Slug};
use serde::{Deserialize, Serialize};

use crate::error::RegistryError;
use crate::paths::PathLayout;
use crate::persist;

#[derive(Debug, Default, Serialize, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    servers: IndexMap<Slug, ServerEntry>,
}

/// In-memory view of the registry, backed by `registry.json`.
///
/// Mutating methods (`upsert`, `remove`) update the in-memory map and leave
/// it to the caller to call [`RegistryStore::save`] — batched writes avoid a
/// disk round trip per field change during a multi-step registration.
pub struct RegistryStore {
    layout: PathLayout,
    servers: IndexMap<Slug, ServerEntry>,
}

impl RegistryStore {
    /// Load the registry from disk, starting empty if it doesn't exist yet.
    pub fn load(layout: PathLayout) -> Result<Self, RegistryError> {
        layout.ensure_root()?;
        let file: RegistryFile = persist::read_json(&layout.registry_file())?.unwrap_or_default();
        Ok(Self { servers: file.servers, layout })
    }

    /// Acquire the registry lock, reload from disk, and hand back the store
    /// alongside the lock guard. Callers hold the guard for as long as the
    /// read-modify-write section they're protecting needs.
    pub fn lock_and_load(layout: PathLayout) -> Result<(Self, File), RegistryError> {
        layout.ensure_root()?;
        let guard = persist::acquire_exclusive_lock(&layout.registry_lock_file())?;
        let store = Self::load(layout)?;
        Ok((store, guard))
    }

    pub fn save(&self) -> Result<(), RegistryError> {
        let file = RegistryFile { servers: self.servers.clone() };
        persist::write_atomic(&self.layout.registry_file(), &file)
    }

    pub fn layout(&self) -> &PathLayout {
        &self.layout
    }

    pub fn get(&self, slug: &Slug) -> Option<&ServerEntry> {
        self.servers.get(slug)
    }

    pub fn list(&self) -> impl Iterator<Item = &ServerEntry> {
        self.servers.values()
    }

    pub fn contains(&self, slug: &Slug) -> bool {
        self.servers.contains_key(slug)
    }

    /// Insert or replace a server's registry entry.
    pub fn upsert(&mut self, entry: ServerEntry) {
        self.servers.insert(entry.slug.clone(), entry);
    }

    pub fn remove(&mut self, slug: &Slug) -> Result<ServerEntry, RegistryError> {
        self.servers.shift_remove(slug).ok_or_else(|| RegistryError::NotFound(slug.clone()))
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
