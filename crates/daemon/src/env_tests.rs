// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serial_test::serial;

use super::*;

#[test]
#[serial]
fn socket_path_defaults_under_the_data_root() {
    std::env::remove_var("MSV_SOCKET_PATH");
    let layout = PathLayout::at("/tmp/msv-env-test");
    assert_eq!(socket_path(&layout), PathBuf::from("/tmp/msv-env-test/msvd.sock"));
}

#[test]
#[serial]
fn socket_path_honors_the_override() {
    std::env::set_var("MSV_SOCKET_PATH", "/tmp/custom.sock");
    let layout = PathLayout::at("/tmp/msv-env-test");
    assert_eq!(socket_path(&layout), PathBuf::from("/tmp/custom.sock"));
    std::env::remove_var("MSV_SOCKET_PATH");
}

#[test]
#[serial]
fn shutdown_deadline_defaults_to_five_seconds() {
    std::env::remove_var("MSV_SHUTDOWN_DEADLINE_MS");
    assert_eq!(shutdown_deadline(), Duration::from_secs(5));
}
