// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `install.validate` (`§6`): a stateless pre-flight that mirrors the first
//! steps of the chosen installer (source kind is supported, the URI looks
//! well-formed, a slug can be derived) without touching disk or the
//! registry.

use msv_core::{RuntimeKind, Slug, SourceKind};

use crate::dispatch;

/// Result of [`validate`]. `ok` is true iff `problems` is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub ok: bool,
    pub problems: Vec<String>,
    pub suggested_slug: Option<String>,
    pub runtime_hint: Option<RuntimeKind>,
    pub manager_hint: Option<String>,
}

/// Run the pre-flight for `(kind, uri)`. Never touches disk or the
/// registry — it only checks what [`dispatch::for_source`] and [`suggest_slug`]
/// can tell from the strings alone.
pub fn validate(kind: SourceKind, uri: &str) -> ValidationReport {
    let mut problems = Vec::new();

    if dispatch::for_source(kind).is_none() {
        problems.push(format!("no installer is registered for source kind {kind}"));
    }
    if uri.trim().is_empty() {
        problems.push("uri must not be empty".to_string());
    }

    let suggested_slug = suggest_slug(uri);
    if suggested_slug.is_none() {
        problems.push("could not derive a slug candidate from the uri".to_string());
    }

    ValidationReport {
        ok: problems.is_empty(),
        problems,
        suggested_slug,
        runtime_hint: None,
        manager_hint: None,
    }
}

/// Derive a registry-legal [`Slug`] candidate from a source URI: take the
/// last path segment, strip a trailing `.git`, lowercase it, and collapse
/// every run of non-alphanumeric characters into a single dash.
pub fn suggest_slug(uri: &str) -> Option<String> {
    let last = uri.trim_end_matches('/').rsplit('/').next()?;
    let last = last.strip_suffix(".git").unwrap_or(last);
    if last.is_empty() {
        return None;
    }

    let mut candidate = String::with_capacity(last.len());
    let mut prev_dash = false;
    for c in last.chars() {
        if c.is_ascii_alphanumeric() {
            candidate.push(c.to_ascii_lowercase());
            prev_dash = false;
        } else if !prev_dash && !candidate.is_empty() {
            candidate.push('-');
            prev_dash = true;
        }
    }
    let candidate = candidate.trim_end_matches('-').to_string();

    Slug::new(candidate.clone()).ok().map(|_| candidate)
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
