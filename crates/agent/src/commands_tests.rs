// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use fleet_core::{AgentFamily, CredentialConfig};

#[test]
fn analyzer_sequence_has_no_diff_harness() {
    let config = Config::test_default();
    let commands =
        build_command_sequence(&config, AgentRole::Analyzer, "git@host:repo.git", "/tmp/prompt.md");
    assert!(!commands.iter().any(|c| c.contains(DIFF_HARNESS_PATH)));
    assert!(commands[0].contains("git clone"));
    assert!(commands.last().unwrap().contains("--role analyzer"));
}

#[test]
fn solver_sequence_stages_diff_harness_before_final_command() {
    let config = Config::test_default();
    let commands =
        build_command_sequence(&config, AgentRole::Solver, "git@host:repo.git", "/tmp/prompt.md");
    let harness_index = commands.iter().position(|c| c.contains(DIFF_HARNESS_PATH)).unwrap();
    assert_eq!(harness_index, commands.len() - 2);
    assert!(commands.last().unwrap().contains("--role solver"));
}

#[test]
fn family_a_clears_proxy_and_sets_sandbox_env() {
    let mut config = Config::test_default();
    config.agent_family = AgentFamily::A;
    config.proxy.http_proxy = Some("http://proxy:8080".into());
    let commands =
        build_command_sequence(&config, AgentRole::Analyzer, "git@host:repo.git", "/tmp/prompt.md");
    let install = &commands[2];
    assert!(install.contains("unset http_proxy"));
    assert!(commands.last().unwrap().contains("SANDBOX=1"));
}

#[test]
fn family_b_appends_yolo_flag_without_proxy_clear() {
    let mut config = Config::test_default();
    config.agent_family = AgentFamily::B;
    config.proxy.http_proxy = Some("http://proxy:8080".into());
    let commands =
        build_command_sequence(&config, AgentRole::Analyzer, "git@host:repo.git", "/tmp/prompt.md");
    assert!(!commands[2].contains("unset"));
    assert!(commands.last().unwrap().contains("--yolo"));
}

#[test]
fn credential_exported_only_when_export_required() {
    let mut config = Config::test_default();
    config.agent_family = AgentFamily::A;
    config.credentials.insert(
        AgentFamily::A,
        CredentialConfig { value: Some("secret".into()), export_required: true, endpoint_override: None },
    );
    let commands =
        build_command_sequence(&config, AgentRole::Analyzer, "git@host:repo.git", "/tmp/prompt.md");
    assert!(commands.last().unwrap().contains("API_KEY_A=secret"));
}

#[test]
fn endpoint_override_only_applies_to_family_a() {
    let mut config = Config::test_default();
    config.agent_family = AgentFamily::A;
    config.credentials.insert(
        AgentFamily::A,
        CredentialConfig {
            value: None,
            export_required: false,
            endpoint_override: Some("https://alt.example".into()),
        },
    );
    let commands =
        build_command_sequence(&config, AgentRole::Analyzer, "git@host:repo.git", "/tmp/prompt.md");
    assert!(commands.last().unwrap().contains("BASE_URL_A=https://alt.example"));
}
