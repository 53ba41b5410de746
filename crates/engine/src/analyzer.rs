// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Analyzer (spec §4.4) — runs a single container to turn a repository
//! into an ordered list of [`Task`]s.

use crate::host_credentials::stage_vcs_credentials;
use fleet_agent::{build_command_sequence, ANALYZER_PROMPT_PATH, TASKS_OUTPUT_PATH};
use fleet_container::{extract_array, ContainerHandle, ContainerStartOptions};
use fleet_core::{AgentRole, CommandStatus, Config, Task, TaskId, TaskValidationError};
use std::future::Future;

/// Run the Analyzer to completion: start a container, provision it,
/// invoke the agent, and parse+validate its task array. `start_container`
/// is a caller-supplied factory so production code can bind it to
/// [`fleet_container::DockerContainerHandle::start`] and tests can bind it
/// to a pre-scripted fake.
pub async fn analyze<H, F, Fut>(
    config: &Config,
    repo_url: &str,
    analyzer_prompt: &[u8],
    start_container: F,
) -> Result<Vec<Task>, fleet_core::AnalyzerError>
where
    H: ContainerHandle,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<H, fleet_core::ContainerError>>,
{
    let span = tracing::info_span!("analyzer.run");
    let _guard = span.enter();

    let mut handle = start_container().await?;

    stage_vcs_credentials(&handle).await;

    if let Err(e) = handle.copy_in_file(analyzer_prompt, ANALYZER_PROMPT_PATH).await {
        handle.shutdown().await;
        return Err(e.into());
    }

    let commands = build_command_sequence(config, AgentRole::Analyzer, repo_url, ANALYZER_PROMPT_PATH);
    let result = handle.exec_blocking(&commands, config.container_timeout_seconds).await;

    if result.status == Some(CommandStatus::Timeout) {
        handle.shutdown().await;
        return Err(fleet_core::AnalyzerError::AgentTimeout(config.container_timeout_seconds));
    }

    let raw_tasks = match handle.copy_out_file(TASKS_OUTPUT_PATH).await {
        Ok(contents) => contents,
        Err(_) => result.output.clone(),
    };

    handle.shutdown().await;

    let value = extract_array(&raw_tasks)?;
    let tasks = parse_and_validate(value, config)?;
    Ok(tasks)
}

fn parse_and_validate(
    value: serde_json::Value,
    config: &Config,
) -> Result<Vec<Task>, TaskValidationError> {
    let entries = value.as_array().cloned().unwrap_or_default();

    if entries.len() < config.min_tasks as usize || entries.len() > config.max_tasks as usize {
        return Err(TaskValidationError::CountOutOfBounds {
            count: entries.len(),
            min: config.min_tasks,
            max: config.max_tasks,
        });
    }

    let mut tasks = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let title = entry
            .get("title")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .ok_or(TaskValidationError::MissingField { index, field: "title" })?
            .to_string();
        let description = entry
            .get("description")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .ok_or(TaskValidationError::MissingField { index, field: "description" })?
            .to_string();
        let priority = entry
            .get("priority")
            .and_then(|v| v.as_u64())
            .ok_or(TaskValidationError::MissingField { index, field: "priority" })?
            as u8;
        let id = entry
            .get("id")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(TaskId::from)
            .unwrap_or_else(|| TaskId::from(format!("task-{index}")));
        let following_tasks = entry.get("followingTasks").and_then(|v| v.as_array()).map(|arr| {
            arr.iter().filter_map(|v| v.as_str()).map(TaskId::from).collect::<Vec<_>>()
        });

        tasks.push(Task { id, title, description, priority, following_tasks });
    }

    Ok(tasks)
}

#[cfg(test)]
#[path = "analyzer_tests.rs"]
mod tests;
