// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use fleet_core::{TaskResultBuilder, TaskStatus};
use serial_test::serial;

#[test]
fn write_to_serializes_results_as_pretty_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    let results = vec![TaskResultBuilder::default().id("t-1").status(TaskStatus::Success).build()];

    write_to(&path, &results).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    let parsed: Vec<TaskResult> = serde_json::from_str(&written).unwrap();
    assert_eq!(parsed, results);
}

#[test]
#[serial]
fn write_run_report_creates_logs_directory_and_names_file_by_epoch() {
    let dir = tempfile::tempdir().unwrap();
    std::env::set_var("XDG_DATA_HOME", dir.path());

    let results = vec![TaskResultBuilder::default().id("t-2").status(TaskStatus::Failure).build()];
    let path = write_run_report(&results, 1_700_000_000_000);

    std::env::remove_var("XDG_DATA_HOME");

    let path = path.unwrap();
    assert_eq!(path.file_name().unwrap().to_str().unwrap(), "1700000000000.json");
    assert!(path.starts_with(dir.path()));
    assert!(path.to_string_lossy().contains("fleet/logs"));
}
