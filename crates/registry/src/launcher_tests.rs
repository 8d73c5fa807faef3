// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use msv_core::TransportKind;

use super::*;

fn entry(command: &str, args: &[&str], env: &[(&str, &str)]) -> Entry {
    Entry {
        transport: TransportKind::Stdio,
        command: command.into(),
        args: args.iter().map(|s| s.to_string()).collect(),
        env: env.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        health_endpoint: None,
    }
}

#[test]
fn writes_an_executable_script_that_execs_the_entry_command() {
    let dir = tempfile::tempdir().unwrap();
    let layout = PathLayout::at(dir.path());
    let slug = Slug::new("demo").unwrap();

    write_launcher(&layout, &slug, &entry("/usr/bin/node", &["server.js"], &[("PORT", "4000")])).unwrap();

    let path = layout.bin_path(&slug);
    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("export PORT='4000'"));
    assert!(contents.contains("exec '/usr/bin/node' 'server.js' \"$@\""));

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }
}

#[test]
fn empty_entry_command_still_creates_a_script_that_errors() {
    let dir = tempfile::tempdir().unwrap();
    let layout = PathLayout::at(dir.path());
    let slug = Slug::new("demo").unwrap();

    write_launcher(&layout, &slug, &entry("", &[], &[])).unwrap();

    let contents = fs::read_to_string(layout.bin_path(&slug)).unwrap();
    assert!(contents.contains("exit 1"));
    assert!(!contents.contains("exec"));
}

#[test]
fn quotes_arguments_containing_single_quotes() {
    let dir = tempfile::tempdir().unwrap();
    let layout = PathLayout::at(dir.path());
    let slug = Slug::new("demo").unwrap();

    write_launcher(&layout, &slug, &entry("/bin/sh", &["it's"], &[])).unwrap();

    let contents = fs::read_to_string(layout.bin_path(&slug)).unwrap();
    assert!(contents.contains(r"'it'\''s'"));
}
