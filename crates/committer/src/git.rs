// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Thin `git` CLI wrapper, shelled out to with `tokio::process::Command` —
//! the same idiom the teacher uses for worktree management rather than a
//! libgit2 binding, since the committer needs only a handful of porcelain
//! operations.

use std::path::Path;
use tokio::process::Command;

/// Run `git <args>` in `repo_root`, returning trimmed stdout on success.
pub async fn run(repo_root: &Path, args: &[&str]) -> Result<String, String> {
    let output = Command::new("git")
        .arg("-C")
        .arg(repo_root)
        .args(args)
        .env_remove("GIT_DIR")
        .env_remove("GIT_WORK_TREE")
        .output()
        .await
        .map_err(|e| format!("failed to exec git {}: {e}", args.join(" ")))?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(format!("git {} failed: {}", args.join(" "), stderr.trim()))
    }
}

pub async fn head(repo_root: &Path) -> Result<String, String> {
    run(repo_root, &["rev-parse", "HEAD"]).await
}

/// True if the working tree has no tracked changes. Untracked files are
/// ignored here; callers decide whether `ignore_untracked` applies.
pub async fn is_clean(repo_root: &Path) -> Result<bool, String> {
    let status = run(repo_root, &["status", "--porcelain", "--untracked-files=no"]).await?;
    Ok(status.is_empty())
}

pub async fn has_untracked(repo_root: &Path) -> Result<bool, String> {
    let status = run(repo_root, &["status", "--porcelain", "--untracked-files=all"]).await?;
    Ok(status.lines().any(|line| line.starts_with("??")))
}

pub async fn stash_push(repo_root: &Path, include_untracked: bool) -> Result<(), String> {
    let mut args = vec!["stash", "push"];
    if include_untracked {
        args.push("--include-untracked");
    }
    run(repo_root, &args).await.map(|_| ())
}

pub async fn stash_pop(repo_root: &Path) -> Result<(), String> {
    run(repo_root, &["stash", "pop"]).await.map(|_| ())
}

pub async fn commit_all(repo_root: &Path, message: &str) -> Result<(), String> {
    run(repo_root, &["add", "-A"]).await?;
    run(repo_root, &["commit", "-m", message]).await.map(|_| ())
}

pub async fn checkout_detached(repo_root: &Path, commit: &str) -> Result<(), String> {
    run(repo_root, &["checkout", "--detach", commit]).await.map(|_| ())
}

pub async fn create_branch(repo_root: &Path, branch: &str) -> Result<(), String> {
    run(repo_root, &["checkout", "-b", branch]).await.map(|_| ())
}

pub async fn apply_patch(repo_root: &Path, patch_path: &Path) -> Result<(), String> {
    run(repo_root, &["apply", "--whitespace=fix", &patch_path.display().to_string()]).await.map(|_| ())
}

pub async fn stage_and_commit(repo_root: &Path, message: &str) -> Result<(), String> {
    run(repo_root, &["add", "-A"]).await?;
    run(repo_root, &["commit", "-m", message]).await.map(|_| ())
}

pub async fn reset_hard(repo_root: &Path, commit: &str) -> Result<(), String> {
    run(repo_root, &["reset", "--hard", commit]).await.map(|_| ())
}

pub async fn clean_untracked(repo_root: &Path) -> Result<(), String> {
    run(repo_root, &["clean", "-fd"]).await.map(|_| ())
}

pub async fn create_backup_branch(repo_root: &Path, branch: &str, at: &str) -> Result<(), String> {
    run(repo_root, &["branch", branch, at]).await.map(|_| ())
}

pub async fn delete_branch(repo_root: &Path, branch: &str) -> Result<(), String> {
    run(repo_root, &["branch", "-D", branch]).await.map(|_| ())
}

#[cfg(test)]
#[path = "git_tests.rs"]
mod tests;
