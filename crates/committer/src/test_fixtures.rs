// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared git-repo fixture for committer tests: a real temp repository
//! driven with the actual `git` binary, matching the teacher's own
//! integration-style workspace tests rather than a mocked git layer.

use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

pub fn init_repo() -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    run(dir.path(), &["init"]);
    run(dir.path(), &["config", "user.email", "fleet-test@example.com"]);
    run(dir.path(), &["config", "user.name", "fleet-test"]);
    std::fs::write(dir.path().join("README.md"), "hello\n").expect("write README");
    run(dir.path(), &["add", "-A"]);
    run(dir.path(), &["commit", "-m", "initial commit"]);
    dir
}

pub fn run(repo_root: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .arg("-C")
        .arg(repo_root)
        .args(args)
        .env_remove("GIT_DIR")
        .env_remove("GIT_WORK_TREE")
        .output()
        .expect("spawn git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}
