// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::collections::HashMap;

use msv_core::{JobId, RuntimeKind, Slug, SourceKind};
use serde::{Deserialize, Serialize};

/// Request from a client to `msvd` (`§6`, "Exact encoding is
/// implementation-defined"). One request per connection, answered by
/// exactly one [`super::Response`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op")]
pub enum Request {
    /// Health check; always answered `Response::Pong`.
    Ping,

    InstallStart {
        source_kind: SourceKind,
        uri: String,
        slug: Slug,
        name: Option<String>,
        #[serde(default)]
        runtime_hint: Option<RuntimeKind>,
        #[serde(default)]
        manager_hint: Option<String>,
    },
    InstallLogs {
        job_id: JobId,
    },
    InstallCancel {
        job_id: JobId,
    },
    InstallFinalize {
        job_id: JobId,
    },
    InstallList,
    InstallValidate {
        source_kind: SourceKind,
        uri: String,
    },

    ServerStart {
        slug: Slug,
    },
    ServerStop {
        slug: Slug,
        grace_ms: Option<u64>,
    },
    ServerRestart {
        slug: Slug,
    },
    ServerSummary,
    ServerInfo {
        slug: Slug,
    },
    ServerSetEnv {
        slug: Slug,
        env: HashMap<String, String>,
    },

    SupervisorStats,
    SupervisorShutdown {
        deadline_ms: u64,
    },
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
