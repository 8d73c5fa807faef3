// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Conventional entry-point detection for installers that don't get an
//! explicit entry point from a package manifest (e.g. a bare git checkout
//! with no `package.json#bin` or `pyproject.toml#scripts`).

use std::path::{Path, PathBuf};

/// Search order mirrors the most common MCP server layouts: an explicit
/// `bin/` wrapper first, then the conventional single-file entry names for
/// each runtime.
const CANDIDATES: &[&str] = &[
    "bin/server",
    "bin/run",
    "dist/index.js",
    "build/index.js",
    "index.js",
    "main.js",
    "src/index.js",
    "main.py",
    "server.py",
    "src/main.py",
    "__main__.py",
];

/// Look for the first candidate entry point that exists under `root`.
pub fn find(root: &Path) -> Option<PathBuf> {
    CANDIDATES.iter().map(|rel| root.join(rel)).find(|p| p.is_file())
}

/// Glob-based fallback for layouts the fixed candidate list misses: any
/// single `*.js` or `*.py` file directly under `root`.
pub fn find_by_glob(root: &Path) -> Option<PathBuf> {
    for pattern in ["*.js", "*.py"] {
        let full_pattern = root.join(pattern);
        let Some(pattern_str) = full_pattern.to_str() else { continue };
        if let Ok(matches) = glob::glob(pattern_str) {
            if let Some(Ok(first)) = matches.into_iter().next() {
                return Some(first);
            }
        }
    }
    None
}

#[cfg(test)]
#[path = "entrypoint_tests.rs"]
mod tests;
