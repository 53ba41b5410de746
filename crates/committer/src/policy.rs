// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dirty-working-tree recovery policy (spec §4.7, §9 "Partial-failure
//! recovery in Committer"). Modeled as independent booleans composed with
//! short-circuit priority: auto-stash before auto-commit.

use crate::git;
use fleet_core::{CommitError, RecoveryPolicy};
use std::path::Path;

/// What, if anything, was done to make the working tree processable.
/// `Stashed` must be undone (stash pop) once the whole batch is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    None,
    Stashed,
    AutoCommitted,
}

/// Make the working tree processable per `policy`, or fail with
/// `DirtyWorkingTree` if it's dirty and no policy applies.
pub async fn prepare_working_tree(
    repo_root: &Path,
    policy: RecoveryPolicy,
) -> Result<RecoveryAction, CommitError> {
    let tracked_dirty = !git::is_clean(repo_root).await.map_err(CommitError::GitCommandFailed)?;
    let untracked_dirty = !policy.ignore_untracked
        && git::has_untracked(repo_root).await.map_err(CommitError::GitCommandFailed)?;

    if !tracked_dirty && !untracked_dirty {
        return Ok(RecoveryAction::None);
    }

    if policy.auto_stash {
        git::stash_push(repo_root, untracked_dirty).await.map_err(CommitError::GitCommandFailed)?;
        return Ok(RecoveryAction::Stashed);
    }

    if tracked_dirty && policy.auto_commit {
        git::commit_all(repo_root, "fleet: auto-commit before patch batch")
            .await
            .map_err(CommitError::GitCommandFailed)?;
        return Ok(RecoveryAction::AutoCommitted);
    }

    if !tracked_dirty && untracked_dirty {
        // Untracked-only dirt with neither auto-stash nor ignore_untracked
        // set is still a legitimate pass: nothing tracked needs recovery.
        return Ok(RecoveryAction::None);
    }

    Err(CommitError::DirtyWorkingTree)
}

/// Undo a `RecoveryAction` after the batch finishes. Stash-pop failure is
/// logged, not fatal (spec §4.7).
pub async fn restore_working_tree(repo_root: &Path, action: RecoveryAction) {
    if action == RecoveryAction::Stashed {
        if let Err(e) = git::stash_pop(repo_root).await {
            tracing::warn!(error = %e, "failed to pop stash after patch batch");
        }
    }
}

#[cfg(test)]
#[path = "policy_tests.rs"]
mod tests;
