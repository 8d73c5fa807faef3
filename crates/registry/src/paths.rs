// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Layout of the supervisor's on-disk state: one data directory holding the
//! registry, a per-server subtree for installed code, logs, and manifest.

use std::path::{Path, PathBuf};

use msv_core::Slug;

use crate::error::RegistryError;

/// `$MSV_DATA_DIR`, or the platform user-data directory joined with `msv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathLayout {
    root: PathBuf,
}

impl PathLayout {
    /// Resolve the data directory, honoring `MSV_DATA_DIR` for tests and
    /// operator overrides before falling back to [`dirs::data_dir`].
    pub fn discover() -> Result<Self, RegistryError> {
        if let Ok(root) = std::env::var("MSV_DATA_DIR") {
            return Ok(Self { root: PathBuf::from(root) });
        }
        let base = dirs::data_dir().ok_or(RegistryError::NoDataDir)?;
        Ok(Self { root: base.join("msv") })
    }

    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn registry_file(&self) -> PathBuf {
        self.root.join("registry.json")
    }

    pub fn registry_lock_file(&self) -> PathBuf {
        self.root.join("registry.lock")
    }

    pub fn servers_dir(&self) -> PathBuf {
        self.root.join("servers")
    }

    pub fn server_dir(&self, slug: &Slug) -> PathBuf {
        self.servers_dir().join(slug.as_str())
    }

    pub fn install_dir(&self, slug: &Slug) -> PathBuf {
        self.server_dir(slug).join("install")
    }

    pub fn bin_dir(&self, slug: &Slug) -> PathBuf {
        self.server_dir(slug).join("bin")
    }

    /// The generated launcher script execed by the supervisor (`§4.2`).
    pub fn bin_path(&self, slug: &Slug) -> PathBuf {
        self.bin_dir(slug).join(slug.as_str())
    }

    pub fn manifest_file(&self, slug: &Slug) -> PathBuf {
        self.server_dir(slug).join("manifest.json")
    }

    pub fn logs_dir(&self, slug: &Slug) -> PathBuf {
        self.server_dir(slug).join("logs")
    }

    pub fn stdout_log(&self, slug: &Slug) -> PathBuf {
        self.logs_dir(slug).join("stdout.log")
    }

    pub fn stderr_log(&self, slug: &Slug) -> PathBuf {
        self.logs_dir(slug).join("stderr.log")
    }

    /// Create the root and `servers/` directories if they don't exist yet.
    pub fn ensure_root(&self) -> Result<(), RegistryError> {
        std::fs::create_dir_all(self.servers_dir())
            .map_err(|source| RegistryError::Io { path: self.servers_dir(), source })
    }

    /// Create the per-server subtree (install dir + logs dir) for a fresh
    /// installation.
    pub fn ensure_server_dirs(&self, slug: &Slug) -> Result<(), RegistryError> {
        for dir in [self.install_dir(slug), self.logs_dir(slug), self.bin_dir(slug)] {
            std::fs::create_dir_all(&dir).map_err(|source| RegistryError::Io { path: dir, source })?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "paths_tests.rs"]
mod tests;
