// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task Solver (spec §4.6) — owns one Container Handle for the lifetime of
//! a single task and produces its [`TaskResult`].

use crate::host_credentials::stage_vcs_credentials;
use fleet_agent::{build_command_sequence, FINAL_REPORT_PATH, GIT_DIFF_PATH, SOLVER_PROMPT_PATH};
use fleet_container::{extract_object, ContainerHandle};
use fleet_core::{AgentRole, Clock, CommandStatus, Config, Task, TaskResult, TaskStatus};
use std::future::Future;

/// Render the solver prompt for `task`, generated from the task's own
/// fields (spec §4.6 step 3: "task-specific, generated from the Task").
pub fn render_solver_prompt(task: &Task) -> Vec<u8> {
    format!(
        "Task {}: {}\n\n{}\n\nWrite your final report to {FINAL_REPORT_PATH} and invoke the \
         staged diff harness before exiting.\n",
        task.id, task.title, task.description
    )
    .into_bytes()
}

/// Solve one task end to end: start a container named after the task,
/// provision it, invoke the agent in solver role, parse its final report,
/// and shut the container down on every exit path. Never propagates an
/// error — any failure becomes a failed [`TaskResult`] (spec §4.5
/// "failure isolation").
pub async fn solve<H, F, Fut, C>(
    task: Task,
    config: &Config,
    repo_url: &str,
    clock: &C,
    start_container: F,
) -> TaskResult
where
    H: ContainerHandle,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<H, fleet_core::ContainerError>>,
    C: Clock,
{
    let span = tracing::info_span!("solver.run", task_id = %task.id);
    let _guard = span.enter();

    let pending = TaskResult::pending(task.clone());

    let mut handle = match start_container().await {
        Ok(h) => h,
        Err(e) => return failed(pending, e.to_string(), clock),
    };

    let outcome = run_provisioned(&mut handle, &task, config, repo_url, clock).await;
    handle.shutdown().await;

    match outcome {
        Ok(result) => result,
        Err(e) => failed(pending, e, clock),
    }
}

async fn run_provisioned<H: ContainerHandle, C: Clock>(
    handle: &mut H,
    task: &Task,
    config: &Config,
    repo_url: &str,
    clock: &C,
) -> Result<TaskResult, String> {
    stage_vcs_credentials(handle).await;

    let prompt = render_solver_prompt(task);
    handle
        .copy_in_file(&prompt, SOLVER_PROMPT_PATH)
        .await
        .map_err(|e| format!("solver environment setup failed: {e}"))?;

    let commands = build_command_sequence(config, AgentRole::Solver, repo_url, SOLVER_PROMPT_PATH);
    let (provisioning, final_command) = commands.split_at(commands.len() - 1);

    for command in provisioning {
        let result = handle.exec_streaming(command, 0).await;
        if !result.is_success() {
            return Err(format!("solver environment setup failed: {}", result.error_detail));
        }
    }

    let final_result =
        handle.exec_streaming(&final_command[0], config.container_timeout_seconds).await;
    if final_result.status == Some(CommandStatus::Timeout) {
        return Err(format!("solver container timeout after {}s", config.container_timeout_seconds));
    }

    let report_raw = match handle.copy_out_file(FINAL_REPORT_PATH).await {
        Ok(contents) => contents,
        Err(_) => final_result.output.clone(),
    };
    let report = extract_object(&report_raw).map_err(|e| e.to_string())?;

    let status = match report.get("status").and_then(|v| v.as_str()) {
        Some("success") => TaskStatus::Success,
        Some("skipped") => TaskStatus::Skipped,
        _ => TaskStatus::Failure,
    };
    let report_text = report.get("report").and_then(|v| v.as_str()).unwrap_or_default().to_string();

    let patch = if status == TaskStatus::Success {
        handle.copy_out_file(GIT_DIFF_PATH).await.unwrap_or_default()
    } else {
        String::new()
    };

    Ok(TaskResult {
        id: task.id.clone(),
        title: task.title.clone(),
        description: task.description.clone(),
        priority: task.priority,
        following_tasks: task.following_tasks.clone(),
        status,
        report: report_text,
        completed_at: clock.epoch_ms(),
        patch,
    })
}

fn failed<C: Clock>(mut pending: TaskResult, reason: String, clock: &C) -> TaskResult {
    pending.status = TaskStatus::Failure;
    pending.report = reason;
    pending.completed_at = clock.epoch_ms();
    pending
}

#[cfg(test)]
#[path = "solver_tests.rs"]
mod tests;
