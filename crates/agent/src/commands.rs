// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-family, per-role command sequence builder (spec §4.3).
//!
//! Mirrors the teacher's `docker_spawn` command-assembly shape (clone →
//! base tooling → binary install → final invocation), generalized from one
//! hardcoded agent to the configured [`AgentFamily`] and [`AgentRole`].

use crate::family_table::{ExtraHardening, FamilyTable};
use fleet_core::{AgentRole, Config};

/// Fixed path the source repository is cloned into inside the container.
pub const WORKSPACE_DIR: &str = "/workspace";

/// Path of the analyzer prompt file (external interface contract).
pub const ANALYZER_PROMPT_PATH: &str = "/app/codeAnalyzerPrompt.txt";
/// Path the analyzer is instructed to write its task array to.
pub const TASKS_OUTPUT_PATH: &str = "/app/tasks.json";
/// Path of the solver prompt file (external interface contract).
pub const SOLVER_PROMPT_PATH: &str = "/app/taskSolverPrompt.txt";
/// Path the solver is instructed to write its final report to.
pub const FINAL_REPORT_PATH: &str = "/app/finalReport.json";
/// Path the diff harness writes the patch to.
pub const GIT_DIFF_PATH: &str = "/app/git_diff.txt";

/// Path of the git-diff harness staged for the solver role. The solver
/// prompt instructs the agent to invoke this script once its changes are
/// complete; it captures the working tree as a unified diff for the
/// Patch Committer to apply later.
pub const DIFF_HARNESS_PATH: &str = "/usr/local/bin/fleet-diff-harness.sh";

const DIFF_HARNESS_SCRIPT_TEMPLATE: &str =
    "#!/bin/sh\nset -e\ncd {WORKSPACE_DIR}\ngit diff --no-color > {GIT_DIFF_PATH}\n";

fn diff_harness_script() -> String {
    DIFF_HARNESS_SCRIPT_TEMPLATE
        .replace("{WORKSPACE_DIR}", WORKSPACE_DIR)
        .replace("{GIT_DIFF_PATH}", GIT_DIFF_PATH)
}

/// Binary name the family's install step drops on `$PATH`. The spec treats
/// families A-D as generic placeholders, so the name is derived rather
/// than a product-specific constant.
fn binary_name(family: fleet_core::AgentFamily) -> String {
    format!("agent-{family}")
}

/// Build the full ordered command list for one container invocation:
/// clone, base tooling, family binary install, then the role-specific
/// final command.
pub fn build_command_sequence(
    config: &Config,
    role: AgentRole,
    repo_url: &str,
    prompt_container_path: &str,
) -> Vec<String> {
    let table = FamilyTable::for_family(config.agent_family);
    let mut commands = Vec::new();

    commands.push(clone_command(repo_url));
    commands.push(install_base_tooling_command());
    commands.extend(install_agent_command(config, &table));

    if role == AgentRole::Solver {
        commands.push(stage_diff_harness_command());
    }

    commands.push(final_command(config, &table, role, prompt_container_path));
    commands
}

fn clone_command(repo_url: &str) -> String {
    format!("git clone --depth 1 {repo_url} {WORKSPACE_DIR}")
}

fn install_base_tooling_command() -> String {
    "apt-get update -qq && apt-get install -y -qq curl ca-certificates git".to_string()
}

fn install_agent_command(config: &Config, table: &FamilyTable) -> Vec<String> {
    let install = config.agent_install.get(&config.agent_family);
    let install_url = install
        .map(|i| i.install_url.clone())
        .unwrap_or_else(|| format!("https://install.example/{}", config.agent_family));

    let mut env_clears = Vec::new();
    if table.clears_proxy_for_install {
        for (key, _) in config.proxy.env_pairs() {
            env_clears.push(format!("unset {key}"));
        }
    }
    let mut install_cmd = if let Some(registry) = install.and_then(|i| i.registry_override.as_ref())
    {
        format!("curl -fsSL {install_url} | REGISTRY={registry} sh")
    } else {
        format!("curl -fsSL {install_url} | sh")
    };
    if !env_clears.is_empty() {
        install_cmd = format!("{}; {}", env_clears.join("; "), install_cmd);
    }
    vec![install_cmd]
}

fn stage_diff_harness_command() -> String {
    format!(
        "cat <<'FLEET_HARNESS_EOF' > {DIFF_HARNESS_PATH}\n{}FLEET_HARNESS_EOF\nchmod +x {DIFF_HARNESS_PATH}",
        diff_harness_script()
    )
}

fn final_command(
    config: &Config,
    table: &FamilyTable,
    role: AgentRole,
    prompt_container_path: &str,
) -> String {
    let binary = binary_name(config.agent_family);
    let cred = config.active_credential();

    let mut env_assignments = Vec::new();
    if let Some(value) = cred.value.filter(|_| cred.export_required) {
        env_assignments.push(format!("{}={value}", config.agent_family.credential_env_var()));
    }
    if let (Some(endpoint), Some(var)) =
        (cred.endpoint_override, config.agent_family.endpoint_override_env_var())
    {
        env_assignments.push(format!("{var}={endpoint}"));
    }
    if table.extra_hardening == ExtraHardening::SandboxEnv {
        env_assignments.push("SANDBOX=1".to_string());
    }

    let env_prefix = if env_assignments.is_empty() { String::new() } else { format!("{} ", env_assignments.join(" ")) };

    let yolo_flag = if table.extra_hardening == ExtraHardening::YoloFlag { " --yolo" } else { "" };
    let role_flag = match role {
        AgentRole::Analyzer => "--role analyzer",
        AgentRole::Solver => "--role solver",
    };

    format!(
        "cd {WORKSPACE_DIR} && {env_prefix}{binary} {role_flag}{yolo_flag} --prompt-file {prompt_container_path}"
    )
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
