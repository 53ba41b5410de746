// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effective configuration (spec §3, §6).
//!
//! Loading (user-global file → per-project file → `FLEET_`-prefixed env
//! vars) lives in `fleet-cli`, named a thin-glue concern out of scope for
//! the core per spec §1. This module owns the struct and its invariants.

use crate::agent_family::AgentFamily;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Proxy environment variables passed through to containers when
/// configured (spec §4.1, §6): lowercase and uppercase aliases of each.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_proxy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub https_proxy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_proxy: Option<String>,
}

impl ProxyConfig {
    /// Project into the env-var pairs a container should receive: both the
    /// lowercase and uppercase alias for each configured value.
    pub fn env_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        let mut push = |lower: &str, upper: &str, value: &Option<String>| {
            if let Some(v) = value {
                pairs.push((lower.to_string(), v.clone()));
                pairs.push((upper.to_string(), v.clone()));
            }
        };
        push("http_proxy", "HTTP_PROXY", &self.http_proxy);
        push("https_proxy", "HTTPS_PROXY", &self.https_proxy);
        push("no_proxy", "NO_PROXY", &self.no_proxy);
        pairs
    }
}

/// Per-family credential configuration (spec §3: "either the agent
/// requires no credentials, or a credential value is provided *and* the
/// export-required flag is true").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default)]
    pub export_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_override: Option<String>,
}

/// Per-family install source (spec §4.3: "the exact install URL, registry
/// override, and credential env var names are configuration data, not
/// code constants").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentInstallConfig {
    pub install_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_override: Option<String>,
}

/// Recovery policy for a dirty host working tree (spec §4.7). Modeled as
/// independent booleans composed with short-circuit priority: auto-stash
/// before auto-commit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryPolicy {
    #[serde(default)]
    pub auto_stash: bool,
    #[serde(default)]
    pub auto_commit: bool,
    #[serde(default)]
    pub ignore_untracked: bool,
    #[serde(default)]
    pub backup_branch: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub agent_family: AgentFamily,
    pub base_image: String,
    pub max_containers: u32,
    pub max_parallel_containers: u32,
    pub container_timeout_seconds: u64,
    pub memory_mb: u32,
    pub cpu_cores: f64,
    pub min_tasks: u32,
    pub max_tasks: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coding_style: Option<String>,
    #[serde(default)]
    pub proxy: ProxyConfig,
    #[serde(default)]
    pub credentials: HashMap<AgentFamily, CredentialConfig>,
    #[serde(default)]
    pub agent_install: HashMap<AgentFamily, AgentInstallConfig>,
    #[serde(default)]
    pub use_ssh_remote: bool,
    #[serde(default)]
    pub recovery_policy: RecoveryPolicy,
}

impl Config {
    /// Validate the cross-field invariants named in spec §3. Must be
    /// called before any container starts (spec §7: configuration errors
    /// are fatal before any container starts).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_tasks > self.max_tasks {
            return Err(ConfigError::TaskBoundsInverted { min: self.min_tasks, max: self.max_tasks });
        }
        if self.max_parallel_containers > self.max_containers {
            return Err(ConfigError::ParallelismExceedsCap {
                parallel: self.max_parallel_containers,
                max: self.max_containers,
            });
        }
        let family = self.agent_family;
        if let Some(cred) = self.credentials.get(&family) {
            if cred.value.is_some() && !cred.export_required {
                return Err(ConfigError::CredentialExportNotRequired {
                    family: family.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Resolve the credential config for the configured agent family,
    /// defaulting to "no credential" if unset.
    pub fn active_credential(&self) -> CredentialConfig {
        self.credentials.get(&self.agent_family).cloned().unwrap_or_default()
    }
}

#[cfg(any(test, feature = "test-support"))]
impl Config {
    /// A minimal, internally-consistent config for tests.
    pub fn test_default() -> Self {
        Self {
            agent_family: AgentFamily::A,
            base_image: "fleet/base:latest".to_string(),
            max_containers: 4,
            max_parallel_containers: 2,
            container_timeout_seconds: 600,
            memory_mb: 2048,
            cpu_cores: 1.0,
            min_tasks: 1,
            max_tasks: 20,
            work_style: None,
            coding_style: None,
            proxy: ProxyConfig::default(),
            credentials: HashMap::new(),
            agent_install: HashMap::new(),
            use_ssh_remote: false,
            recovery_policy: RecoveryPolicy::default(),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
