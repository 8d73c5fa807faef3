// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Generates the `bin/<slug>` launcher script the supervisor execs instead
//! of the raw entry command (`§4.2`): exports the recorded environment,
//! then `exec`s `entry.command` with `entry.args`, forwarding any trailing
//! arguments passed to the script itself.

use std::fs;
use std::io::Write;

use msv_core::{Entry, Slug};

use crate::error::RegistryError;
use crate::paths::PathLayout;

fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

/// Writes an executable shell script at `layout.bin_path(slug)`. When
/// `entry.command` is empty, the script instead prints an error and exits
/// non-zero rather than refusing to be created — the script always exists.
pub fn write_launcher(layout: &PathLayout, slug: &Slug, entry: &Entry) -> Result<(), RegistryError> {
    let path = layout.bin_path(slug);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| RegistryError::Io { path: parent.to_path_buf(), source })?;
    }

    let mut script = String::from("#!/bin/sh\nset -e\n");
    for (key, value) in &entry.env {
        script.push_str(&format!("export {key}={}\n", shell_quote(value)));
    }

    if entry.command.as_os_str().is_empty() {
        script.push_str(&format!(
            "echo 'msv: no entry command resolved for {}' >&2\nexit 1\n",
            slug.as_str()
        ));
    } else {
        let mut exec_line = format!("exec {}", shell_quote(&entry.command.to_string_lossy()));
        for arg in &entry.args {
            exec_line.push(' ');
            exec_line.push_str(&shell_quote(arg));
        }
        exec_line.push_str(" \"$@\"\n");
        script.push_str(&exec_line);
    }

    let tmp_path = path.with_extension("tmp");
    {
        let mut file =
            fs::File::create(&tmp_path).map_err(|source| RegistryError::Io { path: tmp_path.clone(), source })?;
        file.write_all(script.as_bytes())
            .map_err(|source| RegistryError::Io { path: tmp_path.clone(), source })?;
        file.sync_all().map_err(|source| RegistryError::Io { path: tmp_path.clone(), source })?;
    }
    set_executable(&tmp_path)?;
    fs::rename(&tmp_path, &path).map_err(|source| RegistryError::Io { path, source })?;
    Ok(())
}

#[cfg(unix)]
fn set_executable(path: &std::path::Path) -> Result<(), RegistryError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .map_err(|source| RegistryError::Io { path: path.to_path_buf(), source })
}

#[cfg(not(unix))]
fn set_executable(_path: &std::path::Path) -> Result<(), RegistryError> {
    Ok(())
}

#[cfg(test)]
#[path = "launcher_tests.rs"]
mod tests;
