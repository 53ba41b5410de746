// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use fleet_core::CredentialConfig;

#[test]
fn resolves_from_host_environment_first() {
    let original = std::env::var("API_KEY_A").ok();
    std::env::set_var("API_KEY_A", "env-value");

    let config = Config::test_default();
    let cred = resolve(&config, AgentFamily::A).unwrap();
    assert_eq!(cred.env_var, "API_KEY_A");
    assert_eq!(cred.value, "env-value");

    match original {
        Some(v) => std::env::set_var("API_KEY_A", v),
        None => std::env::remove_var("API_KEY_A"),
    }
}

#[test]
fn falls_back_to_config_literal_when_env_unset() {
    let original = std::env::var("API_KEY_B").ok();
    std::env::remove_var("API_KEY_B");

    let mut config = Config::test_default();
    config.credentials.insert(
        AgentFamily::B,
        CredentialConfig { value: Some("configured-value".into()), export_required: true, endpoint_override: None },
    );
    let cred = resolve(&config, AgentFamily::B).unwrap();
    assert_eq!(cred.value, "configured-value");

    if let Some(v) = original {
        std::env::set_var("API_KEY_B", v);
    }
}

#[test]
fn returns_none_when_no_source_has_a_value() {
    let original = std::env::var("API_KEY_C").ok();
    std::env::remove_var("API_KEY_C");

    let config = Config::test_default();
    assert!(resolve(&config, AgentFamily::C).is_none());

    if let Some(v) = original {
        std::env::set_var("API_KEY_C", v);
    }
}
