// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use fleet_container::{FakeContainerHandle, FakeScript};
use fleet_core::{CommandResult, FakeClock, TaskBuilder};

fn push_success_n(script: &FakeScript, n: usize) {
    for _ in 0..n {
        script.push_response(CommandResult::success(String::new()));
    }
}

#[tokio::test]
async fn successful_solve_carries_patch_and_completed_at() {
    let task = TaskBuilder::default().id("t-1").title("fix bug").build();
    let config = Config::test_default();
    let clock = FakeClock::new(42_000);

    let script = FakeScript::default();
    script.push_response(CommandResult::success(String::new())); // credential cleanup
    push_success_n(&script, 4); // clone, base tooling, install, diff harness
    script.push_response(CommandResult::success(String::new())); // final invocation
    script.push_response(CommandResult::success(
        r#"{"taskId":"t-1","title":"fix bug","description":"d","status":"success","report":"done"}"#
            .to_string(),
    )); // final report copy-out
    script.push_response(CommandResult::success("diff --git a/x b/x\n".to_string())); // patch copy-out

    let result = solve(task, &config, "git@host:repo.git", &clock, || async {
        Ok::<_, fleet_core::ContainerError>(FakeContainerHandle::with_script(script.clone()))
    })
    .await;

    assert_eq!(result.status, TaskStatus::Success);
    assert!(result.has_patch());
    assert_eq!(result.completed_at, 42_000);
}

#[tokio::test]
async fn skipped_status_has_no_patch() {
    let task = TaskBuilder::default().id("t-2").build();
    let config = Config::test_default();
    let clock = FakeClock::new(1);

    let script = FakeScript::default();
    script.push_response(CommandResult::success(String::new()));
    push_success_n(&script, 4);
    script.push_response(CommandResult::success(String::new()));
    script.push_response(CommandResult::success(
        r#"{"taskId":"t-2","title":"t","description":"d","status":"skipped","report":"nothing to do"}"#
            .to_string(),
    ));

    let result = solve(task, &config, "git@host:repo.git", &clock, || async {
        Ok::<_, fleet_core::ContainerError>(FakeContainerHandle::with_script(script.clone()))
    })
    .await;

    assert_eq!(result.status, TaskStatus::Skipped);
    assert!(!result.has_patch());
}

#[tokio::test]
async fn provisioning_failure_aborts_as_failure() {
    let task = TaskBuilder::default().id("t-3").build();
    let config = Config::test_default();
    let clock = FakeClock::new(1);

    let script = FakeScript::default();
    script.push_response(CommandResult::success(String::new())); // credential cleanup
    script.push_response(CommandResult::success(String::new())); // clone ok
    script.push_response(CommandResult::failure(String::new(), "apt-get: network unreachable")); // base tooling fails

    let result = solve(task, &config, "git@host:repo.git", &clock, || async {
        Ok::<_, fleet_core::ContainerError>(FakeContainerHandle::with_script(script.clone()))
    })
    .await;

    assert_eq!(result.status, TaskStatus::Failure);
    assert!(result.report.contains("solver environment setup failed"));
}

#[tokio::test]
async fn malformed_final_report_is_a_failure() {
    let task = TaskBuilder::default().id("t-4").build();
    let config = Config::test_default();
    let clock = FakeClock::new(1);

    let script = FakeScript::default();
    script.push_response(CommandResult::success(String::new()));
    push_success_n(&script, 4);
    script.push_response(CommandResult::success(String::new()));
    script.push_response(CommandResult::success("not json at all".to_string()));

    let result = solve(task, &config, "git@host:repo.git", &clock, || async {
        Ok::<_, fleet_core::ContainerError>(FakeContainerHandle::with_script(script.clone()))
    })
    .await;

    assert_eq!(result.status, TaskStatus::Failure);
}

#[tokio::test]
async fn container_start_failure_becomes_failed_result_without_panicking() {
    let task = TaskBuilder::default().id("t-5").build();
    let config = Config::test_default();
    let clock = FakeClock::new(7);

    let result = solve(task, &config, "git@host:repo.git", &clock, || async {
        Err::<FakeContainerHandle, _>(fleet_core::ContainerError::ContainerStartError(
            "name collision".to_string(),
        ))
    })
    .await;

    assert_eq!(result.status, TaskStatus::Failure);
    assert_eq!(result.completed_at, 7);
}
