// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The closed enumeration of supported agent families and invocation
//! roles (spec §4.3). Handled with tagged variants and per-variant
//! functions in `fleet-agent`, not dynamic dispatch.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentFamily {
    A,
    B,
    C,
    D,
}

impl AgentFamily {
    pub const ALL: [AgentFamily; 4] =
        [AgentFamily::A, AgentFamily::B, AgentFamily::C, AgentFamily::D];

    /// Environment variable name the family's credential is exported as.
    pub fn credential_env_var(self) -> &'static str {
        match self {
            AgentFamily::A => "API_KEY_A",
            AgentFamily::B => "API_KEY_B",
            AgentFamily::C => "API_KEY_C",
            AgentFamily::D => "API_KEY_D",
        }
    }

    /// Environment variable name for an optional endpoint override, if the
    /// family supports one.
    pub fn endpoint_override_env_var(self) -> Option<&'static str> {
        match self {
            AgentFamily::A => Some("BASE_URL_A"),
            AgentFamily::B | AgentFamily::C | AgentFamily::D => None,
        }
    }
}

crate::simple_display! {
    AgentFamily {
        A => "a",
        B => "b",
        C => "c",
        D => "d",
    }
}

/// The role a Container Handle is invoked under (spec §4.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentRole {
    Analyzer,
    Solver,
}

crate::simple_display! {
    AgentRole {
        Analyzer => "analyzer",
        Solver => "solver",
    }
}

#[cfg(test)]
#[path = "agent_family_tests.rs"]
mod tests;
