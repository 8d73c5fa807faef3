// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persistent and in-memory domain types shared by every component:
//! the registry's [`ServerEntry`], the installation job's [`Stage`]/[`JobStatus`],
//! and the handful of small enums both lean on.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

crate::define_id! {
    /// Identifier for an installation job run.
    pub struct JobId("job-");
}

/// Stable, URL-safe identifier for a server in the registry.
///
/// Must be non-empty, lowercase ASCII alphanumerics and dashes only, and may
/// not start or end with a dash. This is the registry's primary key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlugError {
    #[error("slug must not be empty")]
    Empty,
    #[error("slug {0:?} contains characters other than lowercase alphanumerics and dashes")]
    InvalidChars(String),
    #[error("slug {0:?} must not start or end with a dash")]
    EdgeDash(String),
}

impl Slug {
    pub fn new(s: impl Into<String>) -> Result<Self, SlugError> {
        let s = s.into();
        if s.is_empty() {
            return Err(SlugError::Empty);
        }
        if !s.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
            return Err(SlugError::InvalidChars(s));
        }
        if s.starts_with('-') || s.ends_with('-') {
            return Err(SlugError::EdgeDash(s));
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Slug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::borrow::Borrow<str> for Slug {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Slug::new(value)
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

impl std::ops::Deref for Slug {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

/// Where the source artifact for an installation comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    Git,
    JsPkg,
    PyPkg,
    ContainerImage,
    ContainerCompose,
}

crate::simple_display! {
    SourceKind {
        Git => "git",
        JsPkg => "js-pkg",
        PyPkg => "py-pkg",
        ContainerImage => "container-image",
        ContainerCompose => "container-compose",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub kind: SourceKind,
    pub uri: String,
}

/// The language/runtime an installed server executes under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeKind {
    Node,
    Python,
    Go,
    Rust,
    Binary,
    Container,
}

crate::simple_display! {
    RuntimeKind {
        Node => "node",
        Python => "python",
        Go => "go",
        Rust => "rust",
        Binary => "binary",
        Container => "container",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeInfo {
    pub kind: RuntimeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_hint: Option<String>,
}

/// How a server communicates, and — for `stdio` — how health is proxied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    Stdio,
    Http,
}

crate::simple_display! {
    TransportKind {
        Stdio => "stdio",
        Http => "http",
    }
}

/// Launch recipe for a server's entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub transport: TransportKind,
    /// Absolute path to the executable. Empty means "not yet resolved" — the
    /// generated launcher script refuses to exec and the supervisor refuses
    /// to start the server.
    pub command: PathBuf,
    pub args: Vec<String>,
    #[serde(default)]
    pub env: HashMap<String, String>,
    /// `http://127.0.0.1:{port}/...` health endpoint. Only meaningful when
    /// `transport == Http`; the stdio prober never reads this field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_endpoint: Option<String>,
}

/// Restart behavior on process exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RestartPolicy {
    Always,
    OnFailure,
    Never,
}

crate::simple_display! {
    RestartPolicy {
        Always => "always",
        OnFailure => "on-failure",
        Never => "never",
    }
}

/// Health and restart policy for a registered server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthPolicy {
    pub probe_kind: TransportKind,
    pub interval_sec: u64,
    pub timeout_sec: u64,
    pub restart_policy: RestartPolicy,
    /// Negative means unlimited restarts.
    pub max_restarts: i64,
}

impl HealthPolicy {
    /// `§4.6` default used by the integrator when registering a fresh install.
    pub fn default_for(transport: TransportKind) -> Self {
        Self {
            probe_kind: transport,
            interval_sec: 30,
            timeout_sec: 10,
            restart_policy: RestartPolicy::OnFailure,
            max_restarts: 3,
        }
    }
}

/// A server known to the supervisor: launch recipe plus health policy.
///
/// The registry is a `slug -> ServerEntry` mapping with `slug` as the key;
/// `slug` is also carried inline so a `ServerEntry` remains meaningful once
/// detached from the map (e.g. in a CLI response).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerEntry {
    pub slug: Slug,
    pub name: String,
    pub source: Source,
    pub runtime: RuntimeInfo,
    pub entry: Entry,
    pub health: HealthPolicy,
}

/// Health classification exposed by the prober.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ready,
    Degraded,
    Down,
}

crate::simple_display! {
    HealthStatus {
        Ready => "ready",
        Degraded => "degraded",
        Down => "down",
    }
}

/// States of the per-process run loop (`§4.11`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessLifecycleState {
    Stopped,
    Starting,
    Running,
    Stopping,
    Failed,
    Restarting,
}

crate::simple_display! {
    ProcessLifecycleState {
        Stopped => "stopped",
        Starting => "starting",
        Running => "running",
        Stopping => "stopping",
        Failed => "failed",
        Restarting => "restarting",
    }
}

/// Lifecycle of an installation job (`§3`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Cancelled,
}

crate::simple_display! {
    JobStatus {
        Pending => "pending",
        Running => "running",
        Completed => "completed",
        Failed => "failed",
        Cancelled => "cancelled",
    }
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed | JobStatus::Cancelled)
    }
}

/// Installation stages, in the fixed order the job engine drives them (`§4.8`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Validation,
    Downloading,
    Extracting,
    Installing,
    Configuring,
    PostInstall,
    Registering,
    Completed,
    Failed,
}

crate::simple_display! {
    Stage {
        Validation => "validation",
        Downloading => "downloading",
        Extracting => "extracting",
        Installing => "installing",
        Configuring => "configuring",
        PostInstall => "post_install",
        Registering => "registering",
        Completed => "completed",
        Failed => "failed",
    }
}

/// Fixed stage weights (sum to 100) used to compute overall progress (`§4.8`).
/// The two terminal pseudo-stages carry no weight of their own.
pub const STAGE_WEIGHTS: &[(Stage, u8)] = &[
    (Stage::Validation, 5),
    (Stage::Downloading, 20),
    (Stage::Extracting, 10),
    (Stage::Installing, 40),
    (Stage::Configuring, 15),
    (Stage::PostInstall, 5),
    (Stage::Registering, 5),
];

impl Stage {
    pub fn weight(&self) -> u8 {
        STAGE_WEIGHTS.iter().find(|(s, _)| s == self).map(|(_, w)| *w).unwrap_or(0)
    }
}

/// Severity of a job log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

crate::simple_display! {
    LogLevel {
        Debug => "debug",
        Info => "info",
        Warning => "warning",
        Error => "error",
    }
}

/// One append-only entry in a job's log (`§4.8`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobLogEntry {
    pub timestamp_ms: u64,
    pub level: LogLevel,
    pub stage: Stage,
    pub message: String,
}

/// What an installer hands back to the job engine on success (`§3`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InstallationResult {
    pub install_path: PathBuf,
    pub runtime_path: PathBuf,
    pub bin_path: PathBuf,
    pub entry_command: PathBuf,
    pub entry_args: Vec<String>,
    pub environment: HashMap<String, String>,
    pub runtime_kind: Option<RuntimeKind>,
    pub package_manager_kind: Option<String>,
    pub installed_version: Option<String>,
    pub metadata: HashMap<String, String>,
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
