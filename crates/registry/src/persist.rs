// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Crash-atomic JSON persistence: write to a sibling `.tmp` file, fsync it,
//! then rename over the destination. A rename within the same directory is
//! atomic on the filesystems this supervisor targets, so readers never see a
//! partially-written registry or manifest.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::RegistryError;

const MAX_BACKUPS: u32 = 3;

fn io_err(path: &Path, source: std::io::Error) -> RegistryError {
    RegistryError::Io { path: path.to_path_buf(), source }
}

/// Serialize `value` as pretty JSON and atomically replace `path` with it.
/// Keeps up to [`MAX_BACKUPS`] rotated copies of the previous contents
/// alongside it (`.bak`, `.bak.2`, `.bak.3`), oldest dropped first.
pub fn write_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), RegistryError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }

    let tmp_path = path.with_extension("tmp");
    let bytes = serde_json::to_vec_pretty(value)?;
    {
        let mut tmp = File::create(&tmp_path).map_err(|e| io_err(&tmp_path, e))?;
        tmp.write_all(&bytes).map_err(|e| io_err(&tmp_path, e))?;
        tmp.sync_all().map_err(|e| io_err(&tmp_path, e))?;
    }

    if path.exists() {
        rotate_backups(path)?;
    }

    fs::rename(&tmp_path, path).map_err(|e| io_err(path, e))?;
    Ok(())
}

fn rotate_backups(path: &Path) -> Result<(), RegistryError> {
    let bak = |n: u32| if n == 1 { path.with_extension("bak") } else { path.with_extension(format!("bak.{n}")) };

    let oldest = bak(MAX_BACKUPS);
    if oldest.exists() {
        fs::remove_file(&oldest).map_err(|e| io_err(&oldest, e))?;
    }
    for n in (1..MAX_BACKUPS).rev() {
        let src = bak(n);
        if src.exists() {
            fs::rename(&src, bak(n + 1)).map_err(|e| io_err(&src, e))?;
        }
    }
    fs::copy(path, bak(1)).map_err(|e| io_err(path, e))?;
    Ok(())
}

/// Read and deserialize JSON from `path`, or `None` if it doesn't exist yet.
pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>, RegistryError> {
    if !path.exists() {
        return Ok(None);
    }
    let bytes = fs::read(path).map_err(|e| io_err(path, e))?;
    Ok(Some(serde_json::from_slice(&bytes)?))
}

/// Acquire an exclusive advisory lock on `lock_path`, creating it if needed.
/// Held for the lifetime of the returned [`File`] — the OS releases it when
/// the handle is dropped, so callers just need to keep it in scope around
/// the read-modify-write section it protects.
pub fn acquire_exclusive_lock(lock_path: &Path) -> Result<File, RegistryError> {
    use fs2::FileExt;

    if let Some(parent) = lock_path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .write(true)
        .open(lock_path)
        .map_err(|e| io_err(lock_path, e))?;
    file.lock_exclusive().map_err(|source| RegistryError::Lock { path: lock_path.to_path_buf(), source })?;
    Ok(file)
}

#[cfg(test)]
#[path = "persist_tests.rs"]
mod tests;
