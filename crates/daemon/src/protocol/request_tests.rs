// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn install_start_round_trips_through_json() {
    let req = Request::InstallStart {
        source_kind: SourceKind::Git,
        uri: "https://example.test/repo.git".into(),
        slug: Slug::new("repo").unwrap(),
        name: Some("Repo".into()),
        runtime_hint: Some(RuntimeKind::Node),
        manager_hint: None,
    };
    let json = serde_json::to_string(&req).unwrap();
    let back: Request = serde_json::from_str(&json).unwrap();
    assert_eq!(req, back);
}

#[test]
fn tag_field_identifies_the_operation() {
    let json = serde_json::to_string(&Request::Ping).unwrap();
    assert!(json.contains("\"op\":\"Ping\""));
}

#[test]
fn server_set_env_carries_an_arbitrary_map() {
    let mut env = HashMap::new();
    env.insert("API_KEY".to_string(), "secret".to_string());
    let req = Request::ServerSetEnv { slug: Slug::new("svc").unwrap(), env };
    let json = serde_json::to_string(&req).unwrap();
    let back: Request = serde_json::from_str(&json).unwrap();
    assert_eq!(req, back);
}
