// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! TaskResult — the outcome of solving one [`crate::Task`].

use crate::task::{Task, TaskId};
use serde::{Deserialize, Serialize};

/// Terminal or pre-terminal status of a task's solve attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    NotStarted,
    Success,
    Skipped,
    Failure,
}

crate::simple_display! {
    TaskStatus {
        NotStarted => "not_started",
        Success => "success",
        Skipped => "skipped",
        Failure => "failure",
    }
}

impl TaskStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, TaskStatus::NotStarted)
    }

    /// Commit-message glyph (spec §6): ✓ on success, ✗ otherwise.
    pub fn glyph(self) -> char {
        if self == TaskStatus::Success {
            '✓'
        } else {
            '✗'
        }
    }
}

/// Outcome of solving one task, created in `NotStarted` by the Scheduler
/// and mutated only by the owning Task Solver until terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResult {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub priority: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub following_tasks: Option<Vec<TaskId>>,

    pub status: TaskStatus,
    /// Natural-language summary produced by the agent; empty until terminal.
    #[serde(default)]
    pub report: String,
    /// Wall-clock timestamp (ms since epoch) at transition to terminal
    /// state; 0 otherwise.
    #[serde(default)]
    pub completed_at: u64,
    /// Unified-diff text; present iff `status = Success` and the task
    /// produced file changes. May be empty for no-op successes.
    #[serde(default)]
    pub patch: String,
}

impl TaskResult {
    /// Start a `NotStarted` result from a freshly-dequeued task.
    pub fn pending(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            priority: task.priority,
            following_tasks: task.following_tasks,
            status: TaskStatus::NotStarted,
            report: String::new(),
            completed_at: 0,
            patch: String::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.id.is_empty() && !self.title.is_empty()
    }

    pub fn has_patch(&self) -> bool {
        self.status == TaskStatus::Success && !self.patch.is_empty()
    }
}

#[cfg(any(test, feature = "test-support"))]
crate::builder! {
    pub struct TaskResultBuilder => TaskResult {
        into { id: TaskId = "t-1" }
        into { title: String = "do the thing" }
        into { description: String = "do the thing, carefully" }
        set { priority: u8 = 3 }
        option { following_tasks: Vec<TaskId> = None }
        set { status: TaskStatus = TaskStatus::NotStarted }
        into { report: String = "" }
        set { completed_at: u64 = 0 }
        into { patch: String = "" }
    }
}

#[cfg(test)]
#[path = "task_result_tests.rs"]
mod tests;
