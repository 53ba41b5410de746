// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Patch Committer (spec §4.7) — turns a batch of successful `TaskResult`s
//! into one branch per task off a stable anchor commit.

use crate::git;
use crate::policy::{prepare_working_tree, restore_working_tree, RecoveryAction};
use fleet_core::{Clock, CommitError, RecoveryPolicy, TaskResult};
use std::path::PathBuf;

/// One task's outcome from a commit batch.
#[derive(Debug, Clone)]
pub struct TaskRecord {
    pub id: String,
    pub title: String,
    pub branch: Option<String>,
    pub success: bool,
    pub error: Option<String>,
}

/// Summary returned after a batch completes (spec §4.7 "Output").
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub records: Vec<TaskRecord>,
}

impl BatchSummary {
    fn push(&mut self, record: TaskRecord) {
        self.total += 1;
        if record.success {
            self.successful += 1;
        } else {
            self.failed += 1;
        }
        self.records.push(record);
    }
}

/// Owns the anchor commit and recovery policy for one batch run. The
/// anchor is captured at construction, matching spec §4.7's "repository
/// HEAD at Patch Committer construction".
pub struct PatchCommitter<C: Clock> {
    repo_root: PathBuf,
    anchor: String,
    policy: RecoveryPolicy,
    clock: C,
}

impl<C: Clock> PatchCommitter<C> {
    pub async fn new(
        repo_root: PathBuf,
        policy: RecoveryPolicy,
        clock: C,
    ) -> Result<Self, CommitError> {
        let anchor = git::head(&repo_root).await.map_err(CommitError::GitCommandFailed)?;

        if policy.backup_branch {
            let backup = format!("fleet-backup-{}", clock.epoch_ms());
            git::create_backup_branch(&repo_root, &backup, &anchor)
                .await
                .map_err(CommitError::GitCommandFailed)?;
        }

        Ok(Self { repo_root, anchor, policy, clock })
    }

    /// Process every result in `results`, in submission order (spec §5).
    /// Never aborts partway: a failure for one task is recorded and
    /// processing continues with the next.
    pub async fn commit_batch(&self, results: Vec<TaskResult>) -> BatchSummary {
        let recovery = match prepare_working_tree(&self.repo_root, self.policy).await {
            Ok(action) => action,
            Err(e) => {
                let mut summary = BatchSummary::default();
                for result in results {
                    summary.push(TaskRecord {
                        id: result.id.to_string(),
                        title: result.title,
                        branch: None,
                        success: false,
                        error: Some(e.to_string()),
                    });
                }
                return summary;
            }
        };

        let mut summary = BatchSummary::default();
        for result in results {
            summary.push(self.commit_one(result).await);
        }

        restore_working_tree(&self.repo_root, recovery).await;
        summary
    }

    async fn commit_one(&self, result: TaskResult) -> TaskRecord {
        let id = result.id.to_string();
        let title = result.title.clone();

        if id.is_empty() || title.is_empty() {
            return TaskRecord {
                id,
                title,
                branch: None,
                success: false,
                error: Some(CommitError::InvalidResult("missing id or title".to_string()).to_string()),
            };
        }

        if result.patch.is_empty() {
            return TaskRecord { id, title, branch: None, success: true, error: None };
        }

        match self.apply_and_commit(&result).await {
            Ok(branch) => {
                self.leave_on_anchor(None).await;
                TaskRecord { id, title, branch: Some(branch), success: true, error: None }
            }
            Err((e, branch)) => {
                self.leave_on_anchor(branch.as_deref()).await;
                TaskRecord { id, title, branch: None, success: false, error: Some(e.to_string()) }
            }
        }
    }

    /// Apply `result`'s patch on a fresh branch off the anchor and commit
    /// it (spec §4.7 steps 4-7). On failure, returns the branch name (if
    /// one was created) so the caller can discard it.
    async fn apply_and_commit(
        &self,
        result: &TaskResult,
    ) -> Result<String, (CommitError, Option<String>)> {
        git::checkout_detached(&self.repo_root, &self.anchor)
            .await
            .map_err(|e| (CommitError::GitCommandFailed(e), None))?;

        let branch = format!("task-{}-{}", result.id, self.clock.epoch_ms());
        git::create_branch(&self.repo_root, &branch)
            .await
            .map_err(|e| (CommitError::GitCommandFailed(e), None))?;

        let patch_path = std::env::temp_dir().join(format!("fleet-patch-{}.diff", result.id));
        tokio::fs::write(&patch_path, &result.patch)
            .await
            .map_err(|e| (CommitError::ApplyFailed(e.to_string()), Some(branch.clone())))?;
        let apply_result = git::apply_patch(&self.repo_root, &patch_path).await;
        let _ = tokio::fs::remove_file(&patch_path).await;
        apply_result.map_err(|e| (CommitError::ApplyFailed(e), Some(branch.clone())))?;

        let message = commit_message(result);
        git::stage_and_commit(&self.repo_root, &message)
            .await
            .map_err(|e| (CommitError::GitCommandFailed(e), Some(branch.clone())))?;

        Ok(branch)
    }

    /// Leave the working tree detached at the anchor, discarding
    /// `stray_branch` if the task failed before producing a real commit
    /// (spec §4.7 step 8, "between tasks the working tree is reset hard
    /// to the anchor and untracked files are removed").
    async fn leave_on_anchor(&self, stray_branch: Option<&str>) {
        if let Err(e) = git::checkout_detached(&self.repo_root, &self.anchor).await {
            tracing::warn!(error = %e, "failed to return to anchor after task");
        }
        if let Err(e) = git::reset_hard(&self.repo_root, &self.anchor).await {
            tracing::warn!(error = %e, "failed to reset working tree to anchor between tasks");
        }
        if !self.policy.ignore_untracked {
            if let Err(e) = git::clean_untracked(&self.repo_root).await {
                tracing::warn!(error = %e, "failed to clean untracked files between tasks");
            }
        }
        if let Some(branch) = stray_branch {
            if let Err(e) = git::delete_branch(&self.repo_root, branch).await {
                tracing::warn!(error = %e, branch, "failed to discard branch from a failed task");
            }
        }
    }
}

fn commit_message(result: &TaskResult) -> String {
    let glyph = result.status.glyph();
    let completed =
        if result.completed_at > 0 { format_timestamp(result.completed_at) } else { "N/A".to_string() };

    format!(
        "{glyph} Task {}: {}\n\nTask Description: {}\n\nReport: {}\n\nStatus: {}\nCompleted: {completed}\n",
        result.id, result.title, result.description, result.report, result.status,
    )
}

fn format_timestamp(epoch_ms: u64) -> String {
    chrono::DateTime::<chrono::Utc>::from_timestamp_millis(epoch_ms as i64)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| "N/A".to_string())
}

#[cfg(test)]
#[path = "committer_tests.rs"]
mod tests;
