// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake Container Handle for Scheduler/Solver tests that do not require a
//! live Docker daemon (mirrors the teacher's `oj-adapters` `test-support`
//! feature, which exposes a `FakeAdapter` to dependent crates).

use crate::handle::{ContainerHandle, ContainerStartOptions};
use async_trait::async_trait;
use fleet_core::{CommandResult, CommandStatus, ContainerError};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;

/// Scripted responses a [`FakeContainerHandle`] returns from `exec_*`, in
/// order. Defaults to an immediate success with empty output.
#[derive(Clone, Default)]
pub struct FakeScript {
    responses: Arc<Mutex<VecDeque<CommandResult>>>,
    pub start_should_fail: bool,
    pub copy_in_should_fail: bool,
    pub local_path_missing: bool,
}

impl FakeScript {
    pub fn push_response(&self, result: CommandResult) {
        self.responses.lock().push_back(result);
    }

    fn next_response(&self) -> CommandResult {
        self.responses.lock().pop_front().unwrap_or_else(|| CommandResult::success(String::new()))
    }
}

pub struct FakeContainerHandle {
    container_id: String,
    pub script: FakeScript,
    pub copied_in: Arc<Mutex<Vec<String>>>,
    pub shutdown_called: Arc<Mutex<bool>>,
}

impl FakeContainerHandle {
    pub fn with_script(script: FakeScript) -> Self {
        Self {
            container_id: "fake-container".to_string(),
            script,
            copied_in: Arc::new(Mutex::new(Vec::new())),
            shutdown_called: Arc::new(Mutex::new(false)),
        }
    }
}

#[async_trait]
impl ContainerHandle for FakeContainerHandle {
    // `start` is an associated function with no access to a caller-built
    // `FakeScript`, so `start_should_fail` can only be honored by callers
    // that construct a `FakeContainerHandle` directly via `with_script`
    // rather than through this trait method.
    async fn start(
        _image: &str,
        name: Option<&str>,
        _options: &ContainerStartOptions,
    ) -> Result<Self, ContainerError> {
        Ok(Self {
            container_id: name.unwrap_or("fake-container").to_string(),
            script: FakeScript::default(),
            copied_in: Arc::new(Mutex::new(Vec::new())),
            shutdown_called: Arc::new(Mutex::new(false)),
        })
    }

    fn container_id(&self) -> &str {
        &self.container_id
    }

    async fn exec_blocking(&self, commands: &[String], _timeout_seconds: u64) -> CommandResult {
        let mut result = self.script.next_response();
        for command in commands {
            result.output = format!("$ {command}\n{}", result.output);
            if result.status != Some(CommandStatus::Success) {
                break;
            }
        }
        result
    }

    async fn exec_streaming(&self, command: &str, _timeout_seconds: u64) -> CommandResult {
        let mut result = self.script.next_response();
        result.output = format!("$ {command}\n{}", result.output);
        result
    }

    async fn copy_in_file(
        &self,
        _contents: &[u8],
        container_path: &str,
    ) -> Result<(), ContainerError> {
        if self.script.copy_in_should_fail {
            return Err(ContainerError::CopyInFailed("scripted failure".to_string()));
        }
        self.copied_in.lock().push(container_path.to_string());
        Ok(())
    }

    async fn copy_in_tree(
        &self,
        local_path: &Path,
        container_dest_dir: &str,
    ) -> Result<(), ContainerError> {
        if self.script.local_path_missing {
            return Err(ContainerError::LocalPathMissing(local_path.display().to_string()));
        }
        self.copied_in.lock().push(container_dest_dir.to_string());
        Ok(())
    }

    async fn copy_out_file(&self, _container_path: &str) -> Result<String, ContainerError> {
        Ok(self.script.next_response().output)
    }

    async fn shutdown(&mut self) {
        *self.shutdown_called.lock() = true;
    }
}
