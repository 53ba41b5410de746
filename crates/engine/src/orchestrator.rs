// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Orchestrator (spec §4.8) — wires Analyzer → Task Scheduler → Patch
//! Committer and owns the run-wide lifecycle, including cancellation and
//! the run report.

use crate::{analyzer, scheduler, solver};
use fleet_committer::{BatchSummary, PatchCommitter};
use fleet_container::{ContainerHandle, ContainerStartOptions, DockerContainerHandle};
use fleet_core::{Clock, Config, TaskResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Everything the Orchestrator produced from one run, before the caller
/// writes it to the run log.
pub struct RunOutcome {
    pub results: Vec<TaskResult>,
    pub commit_summary: BatchSummary,
}

/// Linear driver: derive the host repo's remote URL → Analyzer → Scheduler
/// → Patch Committer. Returns without writing the run report — callers
/// (`fleet-cli`) own where that's persisted so the engine has no direct
/// filesystem-layout opinion beyond the container/git work itself.
pub async fn run<C: Clock>(
    config: Config,
    repo_root: PathBuf,
    analyzer_prompt: Vec<u8>,
    cancel: CancellationToken,
    clock: C,
) -> anyhow::Result<RunOutcome> {
    let repo_url = derive_repo_url(&repo_root, config.use_ssh_remote).await?;
    let config = Arc::new(config);

    let tasks = {
        let docker_config = Arc::clone(&config);
        analyzer::analyze(&config, &repo_url, &analyzer_prompt, move || {
            start_docker(docker_config, None)
        })
        .await?
    };
    tracing::info!(count = tasks.len(), "analyzer produced tasks");

    let solve_config = Arc::clone(&config);
    let solve_repo_url = repo_url.clone();
    let committer_clock = clock.clone();
    let results = scheduler::run(tasks, config.max_parallel_containers as usize, cancel, clock, {
        move |task, clock: C| {
            let config = Arc::clone(&solve_config);
            let repo_url = solve_repo_url.clone();
            async move {
                let task_id = task.id.clone();
                let docker_config = Arc::clone(&config);
                solver::solve(task, &config, &repo_url, &clock, move || {
                    start_docker(docker_config, Some(task_id.to_string()))
                })
                .await
            }
        }
    })
    .await;

    let committer = PatchCommitter::new(repo_root, config.recovery_policy, committer_clock)
        .await
        .map_err(|e| anyhow::anyhow!("failed to construct patch committer: {e}"))?;
    let commit_summary = committer.commit_batch(results.clone()).await;
    tracing::info!(
        successful = commit_summary.successful,
        failed = commit_summary.failed,
        "patch committer finished"
    );

    Ok(RunOutcome { results, commit_summary })
}

async fn start_docker(
    config: Arc<Config>,
    name: Option<String>,
) -> Result<DockerContainerHandle, fleet_core::ContainerError> {
    let options = ContainerStartOptions {
        env: config.proxy.env_pairs(),
        memory_mb: config.memory_mb,
        cpu_cores: config.cpu_cores,
    };
    DockerContainerHandle::start(&config.base_image, name.as_deref(), &options).await
}

/// Resolve the git remote URL of the host repository, rewriting it to an
/// SSH form when `use_ssh_remote` is set (spec §6: "flag selecting
/// whether to use SSH remote for git").
async fn derive_repo_url(repo_root: &Path, use_ssh_remote: bool) -> anyhow::Result<String> {
    let output = tokio::process::Command::new("git")
        .arg("-C")
        .arg(repo_root)
        .args(["remote", "get-url", "origin"])
        .env_remove("GIT_DIR")
        .env_remove("GIT_WORK_TREE")
        .output()
        .await?;

    if !output.status.success() {
        anyhow::bail!("failed to read origin remote url: {}", String::from_utf8_lossy(&output.stderr));
    }

    let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok(if use_ssh_remote { to_ssh_remote(&url) } else { url })
}

fn to_ssh_remote(url: &str) -> String {
    if let Some(rest) = url.strip_prefix("https://") {
        if let Some((host, path)) = rest.split_once('/') {
            return format!("git@{host}:{path}");
        }
    }
    url.to_string()
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
