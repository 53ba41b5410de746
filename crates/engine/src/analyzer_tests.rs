// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use fleet_container::{FakeContainerHandle, FakeScript};
use fleet_core::CommandResult;

fn tasks_json(n: usize) -> String {
    let entries: Vec<String> = (0..n)
        .map(|i| format!(r#"{{"id":"t-{i}","title":"do {i}","description":"desc {i}","priority":3}}"#))
        .collect();
    format!("[{}]", entries.join(","))
}

#[tokio::test]
async fn parses_valid_task_array_from_copy_out() {
    let config = Config::test_default();
    let script = FakeScript::default();
    script.push_response(CommandResult::success(String::new())); // credential cleanup
    script.push_response(CommandResult::success(String::new())); // agent invocation
    script.push_response(CommandResult::success(tasks_json(2))); // copy-out

    let tasks = analyze(&config, "git@host:repo.git", b"prompt", || async {
        Ok::<_, fleet_core::ContainerError>(FakeContainerHandle::with_script(script.clone()))
    })
    .await
    .unwrap();

    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].id.as_str(), "t-0");
}

#[tokio::test]
async fn rejects_task_count_outside_bounds() {
    let mut config = Config::test_default();
    config.min_tasks = 5;
    config.max_tasks = 10;
    let script = FakeScript::default();
    script.push_response(CommandResult::success(String::new())); // credential cleanup
    script.push_response(CommandResult::success(String::new())); // agent invocation
    script.push_response(CommandResult::success(tasks_json(2))); // copy-out

    let err = analyze(&config, "git@host:repo.git", b"prompt", || async {
        Ok::<_, fleet_core::ContainerError>(FakeContainerHandle::with_script(script.clone()))
    })
    .await
    .unwrap_err();

    assert!(matches!(err, fleet_core::AnalyzerError::Validation(_)));
}

#[tokio::test]
async fn assigns_deterministic_id_when_agent_omits_it() {
    let config = Config::test_default();
    let script = FakeScript::default();
    script.push_response(CommandResult::success(String::new())); // credential cleanup
    script.push_response(CommandResult::success(String::new())); // agent invocation
    script.push_response(CommandResult::success(
        r#"[{"title":"t","description":"d","priority":2}]"#.to_string(),
    ));

    let tasks = analyze(&config, "git@host:repo.git", b"prompt", || async {
        Ok::<_, fleet_core::ContainerError>(FakeContainerHandle::with_script(script.clone()))
    })
    .await
    .unwrap();

    assert_eq!(tasks[0].id.as_str(), "task-0");
}

#[tokio::test]
async fn container_start_failure_is_fatal() {
    let config = Config::test_default();

    let err = analyze(&config, "git@host:repo.git", b"prompt", || async {
        Err::<FakeContainerHandle, _>(fleet_core::ContainerError::ContainerStartError(
            "daemon unreachable".to_string(),
        ))
    })
    .await
    .unwrap_err();

    assert!(matches!(err, fleet_core::AnalyzerError::ContainerStart(_)));
}
