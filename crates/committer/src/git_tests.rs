// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_fixtures::{init_repo, run as git};

#[tokio::test]
async fn head_reports_initial_commit() {
    let repo = init_repo();
    let expected = git(repo.path(), &["rev-parse", "HEAD"]);
    assert_eq!(head(repo.path()).await.unwrap(), expected);
}

#[tokio::test]
async fn is_clean_true_on_fresh_checkout() {
    let repo = init_repo();
    assert!(is_clean(repo.path()).await.unwrap());
}

#[tokio::test]
async fn is_clean_false_with_tracked_modification() {
    let repo = init_repo();
    std::fs::write(repo.path().join("README.md"), "changed\n").unwrap();
    assert!(!is_clean(repo.path()).await.unwrap());
}

#[tokio::test]
async fn has_untracked_detects_new_file() {
    let repo = init_repo();
    std::fs::write(repo.path().join("new.txt"), "x\n").unwrap();
    assert!(has_untracked(repo.path()).await.unwrap());
}

#[tokio::test]
async fn stash_push_then_pop_restores_modification() {
    let repo = init_repo();
    std::fs::write(repo.path().join("README.md"), "changed\n").unwrap();
    stash_push(repo.path(), false).await.unwrap();
    assert!(is_clean(repo.path()).await.unwrap());
    stash_pop(repo.path()).await.unwrap();
    assert!(!is_clean(repo.path()).await.unwrap());
}

#[tokio::test]
async fn checkout_detach_then_create_branch_and_apply_patch() {
    let repo = init_repo();
    let anchor = head(repo.path()).await.unwrap();

    checkout_detached(repo.path(), &anchor).await.unwrap();
    create_branch(repo.path(), "task-t1-1").await.unwrap();

    std::fs::write(repo.path().join("README.md"), "before\n").unwrap();
    git(repo.path(), &["add", "-A"]);
    git(repo.path(), &["commit", "-m", "baseline for diff"]);
    let patch = git(repo.path(), &["diff", "HEAD~1", "HEAD"]);

    // Reset to anchor, re-apply as a patch on a fresh branch.
    reset_hard(repo.path(), &anchor).await.unwrap();
    create_branch(repo.path(), "task-t1-2").await.unwrap();
    std::fs::write(repo.path().join("patch.diff"), patch).unwrap();
    apply_patch(repo.path(), &repo.path().join("patch.diff")).await.unwrap();

    let contents = std::fs::read_to_string(repo.path().join("README.md")).unwrap();
    assert_eq!(contents, "before\n");
}

#[tokio::test]
async fn clean_untracked_removes_new_files() {
    let repo = init_repo();
    std::fs::write(repo.path().join("scratch.txt"), "x\n").unwrap();
    clean_untracked(repo.path()).await.unwrap();
    assert!(!repo.path().join("scratch.txt").exists());
}
