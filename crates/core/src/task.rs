// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task — an atomic instruction for a solving agent.

use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Unique identifier for a task, scoped to one run.
    pub struct TaskId;
}

/// An atomic instruction produced by the Analyzer and consumed exactly
/// once by the Task Scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    /// 1..5, higher = more urgent.
    pub priority: u8,
    /// Ordered successor task ids. A weak ordering hint, not an ownership
    /// edge — see [`crate::error::TaskValidationError`] for validation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub following_tasks: Option<Vec<TaskId>>,
}

impl Task {
    pub fn is_valid(&self) -> bool {
        !self.id.is_empty()
            && !self.title.is_empty()
            && !self.description.is_empty()
            && (1..=5).contains(&self.priority)
    }
}

#[cfg(any(test, feature = "test-support"))]
crate::builder! {
    pub struct TaskBuilder => Task {
        into { id: TaskId = "t-1" }
        into { title: String = "do the thing" }
        into { description: String = "do the thing, carefully" }
        set { priority: u8 = 3 }
        option { following_tasks: Vec<TaskId> = None }
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
