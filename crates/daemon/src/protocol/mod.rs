// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! IPC protocol between `msvd` and its clients.
//!
//! Wire format: 4-byte length prefix (big-endian) + JSON payload, one
//! [`Request`] in, one [`Response`] out, per connection.

mod request;
mod response;
mod wire;

pub use request::Request;
pub use response::{InstallLogsView, Response, ValidateView};
pub use wire::{read_message, write_message, ProtocolError};
