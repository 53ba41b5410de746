// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration loading (spec §6): a user-global file overlaid by a
//! per-project file overlaid by `FLEET_`-prefixed environment variables.
//! The merge itself is a handful of `Option`-overlay assignments — the
//! translation/prompting/issue-tracker machinery around it is out of
//! scope, not the struct.

use fleet_core::{
    AgentFamily, AgentInstallConfig, Config, ConfigError, CredentialConfig, ProxyConfig,
    RecoveryPolicy,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Every `Config` field as an `Option`, so a tier that doesn't mention a
/// field leaves the value from the tier below untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PartialConfig {
    pub agent_family: Option<AgentFamily>,
    pub base_image: Option<String>,
    pub max_containers: Option<u32>,
    pub max_parallel_containers: Option<u32>,
    pub container_timeout_seconds: Option<u64>,
    pub memory_mb: Option<u32>,
    pub cpu_cores: Option<f64>,
    pub min_tasks: Option<u32>,
    pub max_tasks: Option<u32>,
    pub work_style: Option<String>,
    pub coding_style: Option<String>,
    pub proxy: Option<ProxyConfig>,
    pub credentials: Option<HashMap<AgentFamily, CredentialConfig>>,
    pub agent_install: Option<HashMap<AgentFamily, AgentInstallConfig>>,
    pub use_ssh_remote: Option<bool>,
    pub recovery_policy: Option<RecoveryPolicy>,
}

impl PartialConfig {
    /// Sane defaults so a repo with no config files at all still starts.
    fn builtin_defaults() -> Self {
        Self {
            base_image: Some("fleet/base:latest".to_string()),
            max_containers: Some(4),
            max_parallel_containers: Some(2),
            container_timeout_seconds: Some(900),
            memory_mb: Some(2048),
            cpu_cores: Some(1.0),
            min_tasks: Some(1),
            max_tasks: Some(20),
            use_ssh_remote: Some(false),
            ..Self::default()
        }
    }

    /// `patch` overrides `self` field-by-field wherever it sets `Some`.
    fn overlay(self, patch: Self) -> Self {
        Self {
            agent_family: patch.agent_family.or(self.agent_family),
            base_image: patch.base_image.or(self.base_image),
            max_containers: patch.max_containers.or(self.max_containers),
            max_parallel_containers: patch.max_parallel_containers.or(self.max_parallel_containers),
            container_timeout_seconds: patch
                .container_timeout_seconds
                .or(self.container_timeout_seconds),
            memory_mb: patch.memory_mb.or(self.memory_mb),
            cpu_cores: patch.cpu_cores.or(self.cpu_cores),
            min_tasks: patch.min_tasks.or(self.min_tasks),
            max_tasks: patch.max_tasks.or(self.max_tasks),
            work_style: patch.work_style.or(self.work_style),
            coding_style: patch.coding_style.or(self.coding_style),
            proxy: patch.proxy.or(self.proxy),
            credentials: patch.credentials.or(self.credentials),
            agent_install: patch.agent_install.or(self.agent_install),
            use_ssh_remote: patch.use_ssh_remote.or(self.use_ssh_remote),
            recovery_policy: patch.recovery_policy.or(self.recovery_policy),
        }
    }

    fn finalize(self) -> Result<Config, ConfigError> {
        macro_rules! required {
            ($field:ident, $name:literal) => {
                self.$field.ok_or(ConfigError::MissingRequiredOption { option: $name })?
            };
        }
        Ok(Config {
            agent_family: required!(agent_family, "agent_family"),
            base_image: required!(base_image, "base_image"),
            max_containers: required!(max_containers, "max_containers"),
            max_parallel_containers: required!(max_parallel_containers, "max_parallel_containers"),
            container_timeout_seconds: required!(
                container_timeout_seconds,
                "container_timeout_seconds"
            ),
            memory_mb: required!(memory_mb, "memory_mb"),
            cpu_cores: required!(cpu_cores, "cpu_cores"),
            min_tasks: required!(min_tasks, "min_tasks"),
            max_tasks: required!(max_tasks, "max_tasks"),
            work_style: self.work_style,
            coding_style: self.coding_style,
            proxy: self.proxy.unwrap_or_default(),
            credentials: self.credentials.unwrap_or_default(),
            agent_install: self.agent_install.unwrap_or_default(),
            use_ssh_remote: self.use_ssh_remote.unwrap_or_default(),
            recovery_policy: self.recovery_policy.unwrap_or_default(),
        })
    }
}

fn read_file_tier(path: &Path) -> Result<PartialConfig, ConfigError> {
    if !path.exists() {
        return Ok(PartialConfig::default());
    }
    let text = std::fs::read_to_string(path)
        .map_err(|source| ConfigError::Io { path: path.display().to_string(), source })?;
    toml::from_str(&text)
        .map_err(|source| ConfigError::Parse { path: path.display().to_string(), source })
}

fn parse_agent_family(raw: &str) -> Option<AgentFamily> {
    match raw.to_ascii_lowercase().as_str() {
        "a" => Some(AgentFamily::A),
        "b" => Some(AgentFamily::B),
        "c" => Some(AgentFamily::C),
        "d" => Some(AgentFamily::D),
        _ => None,
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Overlay `FLEET_`-prefixed environment variables onto the file tiers.
/// Recognized names mirror the flat `Config` fields; proxy and recovery
/// policy settings use a `FLEET_<SECTION>_<FIELD>` shape.
fn env_tier() -> PartialConfig {
    let mut partial = PartialConfig::default();
    let mut proxy = ProxyConfig::default();
    let mut recovery = RecoveryPolicy::default();
    let mut saw_proxy = false;
    let mut saw_recovery = false;

    for (key, value) in std::env::vars() {
        let Some(name) = key.strip_prefix("FLEET_") else { continue };
        match name {
            "AGENT_FAMILY" => partial.agent_family = parse_agent_family(&value),
            "BASE_IMAGE" => partial.base_image = Some(value),
            "MAX_CONTAINERS" => partial.max_containers = value.parse().ok(),
            "MAX_PARALLEL_CONTAINERS" => partial.max_parallel_containers = value.parse().ok(),
            "CONTAINER_TIMEOUT_SECONDS" => partial.container_timeout_seconds = value.parse().ok(),
            "MEMORY_MB" => partial.memory_mb = value.parse().ok(),
            "CPU_CORES" => partial.cpu_cores = value.parse().ok(),
            "MIN_TASKS" => partial.min_tasks = value.parse().ok(),
            "MAX_TASKS" => partial.max_tasks = value.parse().ok(),
            "WORK_STYLE" => partial.work_style = Some(value),
            "CODING_STYLE" => partial.coding_style = Some(value),
            "USE_SSH_REMOTE" => partial.use_ssh_remote = parse_bool(&value),
            "HTTP_PROXY" => {
                proxy.http_proxy = Some(value);
                saw_proxy = true;
            }
            "HTTPS_PROXY" => {
                proxy.https_proxy = Some(value);
                saw_proxy = true;
            }
            "NO_PROXY" => {
                proxy.no_proxy = Some(value);
                saw_proxy = true;
            }
            "RECOVERY_AUTO_STASH" => {
                recovery.auto_stash = parse_bool(&value).unwrap_or_default();
                saw_recovery = true;
            }
            "RECOVERY_AUTO_COMMIT" => {
                recovery.auto_commit = parse_bool(&value).unwrap_or_default();
                saw_recovery = true;
            }
            "RECOVERY_IGNORE_UNTRACKED" => {
                recovery.ignore_untracked = parse_bool(&value).unwrap_or_default();
                saw_recovery = true;
            }
            "RECOVERY_BACKUP_BRANCH" => {
                recovery.backup_branch = parse_bool(&value).unwrap_or_default();
                saw_recovery = true;
            }
            _ => {}
        }
    }

    if saw_proxy {
        partial.proxy = Some(proxy);
    }
    if saw_recovery {
        partial.recovery_policy = Some(recovery);
    }
    partial
}

/// Load the effective configuration for a run against `repo_root`: the
/// user-global file, then `<repo_root>/.fleet.toml`, then `FLEET_*` env
/// vars, each overlaying the last.
pub fn load(repo_root: &Path) -> Result<Config, ConfigError> {
    let mut partial = PartialConfig::builtin_defaults();

    if let Some(config_dir) = dirs::config_dir() {
        partial = partial.overlay(read_file_tier(&config_dir.join("fleet").join("config.toml"))?);
    }

    partial = partial.overlay(read_file_tier(&repo_root.join(".fleet.toml"))?);
    partial = partial.overlay(env_tier());

    partial.finalize()
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
