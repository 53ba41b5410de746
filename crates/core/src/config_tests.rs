// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn rejects_inverted_task_bounds() {
    let mut c = Config::test_default();
    c.min_tasks = 10;
    c.max_tasks = 5;
    assert!(matches!(c.validate(), Err(ConfigError::TaskBoundsInverted { .. })));
}

#[test]
fn rejects_parallelism_over_cap() {
    let mut c = Config::test_default();
    c.max_parallel_containers = 10;
    c.max_containers = 4;
    assert!(matches!(c.validate(), Err(ConfigError::ParallelismExceedsCap { .. })));
}

#[test]
fn rejects_credential_without_export_required() {
    let mut c = Config::test_default();
    c.credentials.insert(
        AgentFamily::A,
        CredentialConfig { value: Some("secret".into()), export_required: false, endpoint_override: None },
    );
    assert!(matches!(c.validate(), Err(ConfigError::CredentialExportNotRequired { .. })));
}

#[test]
fn accepts_credential_with_export_required() {
    let mut c = Config::test_default();
    c.credentials.insert(
        AgentFamily::A,
        CredentialConfig { value: Some("secret".into()), export_required: true, endpoint_override: None },
    );
    assert!(c.validate().is_ok());
}

#[test]
fn accepts_no_credential_at_all() {
    assert!(Config::test_default().validate().is_ok());
}

#[test]
fn proxy_env_pairs_include_both_cases() {
    let proxy = ProxyConfig { http_proxy: Some("http://p:8080".into()), ..Default::default() };
    let pairs = proxy.env_pairs();
    assert!(pairs.contains(&("http_proxy".to_string(), "http://p:8080".to_string())));
    assert!(pairs.contains(&("HTTP_PROXY".to_string(), "http://p:8080".to_string())));
    assert_eq!(pairs.len(), 2);
}
