// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host-side credential resolution for containerized agents (spec §4.3).
//!
//! Containerized agents run in isolated environments without access to the
//! host's keychain or config files; the caller resolves a credential from
//! the host at spawn time and injects it as an environment variable.
//! Generalized from the teacher's Claude-Code-specific OAuth/API-key
//! fallback chain to a plain env-var-or-config-literal resolution, since
//! the spec's agent families are generic placeholders with no keychain or
//! on-disk credential file of their own.

use fleet_core::{AgentFamily, Config};

/// A resolved credential ready for injection as `KEY=value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCredential {
    pub env_var: String,
    pub value: String,
}

/// Resolve the credential for `family`, preferring the host environment
/// variable named by [`AgentFamily::credential_env_var`] and falling back
/// to the literal configured in `config.credentials`. Returns `None` if
/// neither source has a value — the caller logs this as best-effort, not
/// fatal, per spec §4.4/§4.6.
pub fn resolve(config: &Config, family: AgentFamily) -> Option<ResolvedCredential> {
    let env_var = family.credential_env_var();

    if let Ok(value) = std::env::var(env_var) {
        if !value.is_empty() {
            return Some(ResolvedCredential { env_var: env_var.to_string(), value });
        }
    }

    if let Some(configured) = config.credentials.get(&family) {
        if let Some(value) = configured.value.clone().filter(|v| !v.is_empty()) {
            return Some(ResolvedCredential { env_var: env_var.to_string(), value });
        }
    }

    tracing::debug!(%family, env_var, "no credential available from host env or config");
    None
}

#[cfg(test)]
#[path = "credential_tests.rs"]
mod tests;
