// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! msv-installer: turns a [`msv_core::Source`] into an
//! [`msv_core::InstallationResult`] on disk. One [`Installer`] per
//! [`msv_core::SourceKind`], dispatched by [`dispatch::for_source`].

pub mod context;
pub mod dispatch;
pub mod entrypoint;
pub mod error;
pub mod git;
pub mod installer;
pub mod js_pkg;
pub mod py_pkg;
pub mod validate;

pub use context::{InstallContext, InstallLogSink, NullLogSink};
pub use error::InstallError;
pub use git::GitInstaller;
pub use installer::Installer;
pub use js_pkg::JsPkgInstaller;
pub use py_pkg::PyPkgInstaller;
pub use validate::{suggest_slug, validate, ValidationReport};
