// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CommandResult — the outcome of one command (or command batch) run
//! inside a container.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandStatus {
    Success,
    Failure,
    Timeout,
}

crate::simple_display! {
    CommandStatus {
        Success => "success",
        Failure => "failure",
        Timeout => "timeout",
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommandResult {
    pub status: Option<CommandStatus>,
    /// Captured standard output, prefixed by a line `$ <command>` per
    /// invocation to preserve provenance.
    pub output: String,
    /// Captured standard error plus a reason string; populated on
    /// non-success.
    pub error_detail: String,
}

impl CommandResult {
    pub fn success(output: String) -> Self {
        Self { status: Some(CommandStatus::Success), output, error_detail: String::new() }
    }

    pub fn failure(output: String, error_detail: impl Into<String>) -> Self {
        Self { status: Some(CommandStatus::Failure), output, error_detail: error_detail.into() }
    }

    pub fn timeout(output: String, seconds: u64) -> Self {
        Self {
            status: Some(CommandStatus::Timeout),
            output,
            error_detail: format!("timed out after {seconds}s"),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Some(CommandStatus::Success)
    }

    /// Append one command's provenance-prefixed output to this result.
    pub fn push_command_output(&mut self, command: &str, output: &str) {
        self.output.push_str(&format!("$ {command}\n"));
        self.output.push_str(output);
        if !output.ends_with('\n') {
            self.output.push('\n');
        }
    }
}

#[cfg(test)]
#[path = "command_result_tests.rs"]
mod tests;
