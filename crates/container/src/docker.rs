// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Docker-backed Container Handle.
//!
//! Shells out to the `docker` CLI with `tokio::process::Command`, the same
//! idiom the teacher uses for container and git-worktree lifecycle
//! (`run_docker` in the Docker agent adapter) rather than a Docker Engine
//! API client — the spec only needs process-level container lifecycle and
//! `exec`, not the wider Engine API surface.

use crate::backoff;
use crate::handle::{ContainerHandle, ContainerStartOptions};
use async_trait::async_trait;
use fleet_core::{CommandResult, ContainerError};
use std::path::Path;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use uuid::Uuid;

/// A running Docker container, owned exclusively by its creator for the
/// handle's lifetime.
pub struct DockerContainerHandle {
    container_id: String,
    name: String,
}

impl DockerContainerHandle {
    fn random_suffix() -> String {
        Uuid::new_v4().simple().to_string()[..8].to_string()
    }
}

#[async_trait]
impl ContainerHandle for DockerContainerHandle {
    async fn start(
        image: &str,
        name: Option<&str>,
        options: &ContainerStartOptions,
    ) -> Result<Self, ContainerError> {
        let base_name = name.map(str::to_string).unwrap_or_else(|| format!("fleet-{}", Self::random_suffix()));

        let span = tracing::info_span!("docker.start", image, name = %base_name);
        let _guard = span.enter();

        for attempt in 0..2 {
            let candidate =
                if attempt == 0 { base_name.clone() } else { format!("{base_name}-{}", Self::random_suffix()) };

            let mem_arg = format!("{}m", options.memory_mb);
            let cpu_arg = format!("{}", options.cpu_cores);
            let mut args: Vec<String> = vec![
                "run".into(),
                "-d".into(),
                "--name".into(),
                candidate.clone(),
                "--memory".into(),
                mem_arg,
                "--cpus".into(),
                cpu_arg,
            ];
            for (key, value) in &options.env {
                args.push("-e".into());
                args.push(format!("{key}={value}"));
            }
            args.push(image.to_string());
            args.extend(["sleep".into(), "infinity".into()]);

            match run_docker(&args).await {
                Ok(stdout) => {
                    let container_id = stdout.trim().to_string();
                    tracing::info!(container_id, name = %candidate, "container started");
                    return Ok(Self { container_id, name: candidate });
                }
                Err(e) if attempt == 0 && e.contains("already in use") => {
                    tracing::warn!(name = %candidate, "name collision, retrying with suffix");
                    continue;
                }
                Err(e) => return Err(ContainerError::ContainerStartError(e)),
            }
        }

        unreachable!("loop always returns within two attempts")
    }

    fn container_id(&self) -> &str {
        &self.container_id
    }

    async fn exec_blocking(&self, commands: &[String], timeout_seconds: u64) -> CommandResult {
        let run = async {
            let mut result = CommandResult::success(String::new());
            for command in commands {
                backoff::jittered_delay().await;

                match exec_one(&self.name, command).await {
                    Ok((exit_ok, stdout, stderr)) => {
                        result.push_command_output(command, &stdout);
                        if !exit_ok {
                            result.status = Some(fleet_core::CommandStatus::Failure);
                            result.error_detail = stderr;
                            return result;
                        }
                    }
                    Err(e) => {
                        result.status = Some(fleet_core::CommandStatus::Failure);
                        result.error_detail = e;
                        return result;
                    }
                }
            }
            result
        };

        if timeout_seconds == 0 {
            return run.await;
        }

        match tokio::time::timeout(std::time::Duration::from_secs(timeout_seconds), run).await {
            Ok(result) => result,
            Err(_) => CommandResult::timeout(String::new(), timeout_seconds),
        }
    }

    async fn exec_streaming(&self, command: &str, timeout_seconds: u64) -> CommandResult {
        backoff::jittered_delay().await;

        let run = async {
            match exec_one(&self.name, command).await {
                Ok((true, stdout, _stderr)) => CommandResult::success(with_provenance(command, &stdout)),
                Ok((false, stdout, stderr)) => {
                    CommandResult::failure(with_provenance(command, &stdout), stderr)
                }
                Err(e) => CommandResult::failure(with_provenance(command, ""), e),
            }
        };

        if timeout_seconds == 0 {
            return run.await;
        }

        match tokio::time::timeout(std::time::Duration::from_secs(timeout_seconds), run).await {
            Ok(result) => result,
            Err(_) => CommandResult::timeout(with_provenance(command, ""), timeout_seconds),
        }
    }

    async fn copy_in_file(
        &self,
        contents: &[u8],
        container_path: &str,
    ) -> Result<(), ContainerError> {
        let parent = Path::new(container_path).parent().map(|p| p.display().to_string());
        if let Some(parent) = parent.filter(|p| !p.is_empty()) {
            let mkdir = format!("mkdir -p {}", shell_quote(&parent));
            exec_one(&self.name, &mkdir)
                .await
                .map_err(ContainerError::CopyInFailed)?;
        }

        let staging = tempfile::NamedTempFile::new()
            .map_err(|e| ContainerError::CopyInFailed(e.to_string()))?;
        tokio::fs::write(staging.path(), contents)
            .await
            .map_err(|e| ContainerError::CopyInFailed(e.to_string()))?;

        let tmp_container_path = format!("{container_path}.tmp-{}", Self::random_suffix());
        let dest = format!("{}:{}", self.name, tmp_container_path);
        run_docker(&["cp".into(), staging.path().display().to_string(), dest])
            .await
            .map_err(ContainerError::CopyInFailed)?;

        let mv = format!(
            "mv {} {}",
            shell_quote(&tmp_container_path),
            shell_quote(container_path)
        );
        let (ok, _out, err) = exec_one(&self.name, &mv).await.map_err(ContainerError::CopyInFailed)?;
        if !ok {
            return Err(ContainerError::CopyInFailed(err));
        }
        Ok(())
    }

    async fn copy_in_tree(
        &self,
        local_path: &Path,
        container_dest_dir: &str,
    ) -> Result<(), ContainerError> {
        if !local_path.exists() {
            return Err(ContainerError::LocalPathMissing(local_path.display().to_string()));
        }

        let mkdir = format!("mkdir -p {}", shell_quote(container_dest_dir));
        exec_one(&self.name, &mkdir).await.map_err(ContainerError::CopyInFailed)?;

        let dest = format!("{}:{}", self.name, container_dest_dir);
        // Trailing "/." copies the directory's contents rather than the
        // directory itself, matching `cp -a src/. dst/` semantics.
        let src = if local_path.is_dir() {
            local_path.join(".").display().to_string()
        } else {
            local_path.display().to_string()
        };
        run_docker(&["cp".into(), src, dest]).await.map_err(ContainerError::CopyInFailed)?;
        Ok(())
    }

    async fn copy_out_file(&self, container_path: &str) -> Result<String, ContainerError> {
        let staging = tempfile::NamedTempFile::new()
            .map_err(|e| ContainerError::CopyOutFailed(e.to_string()))?;
        let src = format!("{}:{}", self.name, container_path);
        let result = run_docker(&["cp".into(), src, staging.path().display().to_string()]).await;

        let read_result = match result {
            Ok(_) => tokio::fs::read_to_string(staging.path())
                .await
                .map_err(|e| ContainerError::CopyOutFailed(e.to_string())),
            Err(e) => Err(ContainerError::CopyOutFailed(e)),
        };

        // `staging` is a NamedTempFile; dropping it here removes the host
        // staging file regardless of which branch above ran.
        drop(staging);
        read_result
    }

    async fn shutdown(&mut self) {
        if self.name.is_empty() {
            return;
        }
        tracing::info!(container_id = %self.container_id, name = %self.name, "shutting down container");
        if let Err(e) = run_docker(&["rm".into(), "-f".into(), self.name.clone()]).await {
            tracing::warn!(name = %self.name, error = %e, "container shutdown failed (treated as idempotent no-op)");
        }
        self.name.clear();
    }
}

fn with_provenance(command: &str, output: &str) -> String {
    let mut s = format!("$ {command}\n");
    s.push_str(output);
    if !output.ends_with('\n') {
        s.push('\n');
    }
    s
}

fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

/// Run `docker exec <name> bash -c <command>`, draining stdout and stderr
/// concurrently so multi-megabyte output is never truncated by a blocked
/// pipe — do not serialize reading stdout then stderr, that deadlocks.
async fn exec_one(name: &str, command: &str) -> Result<(bool, String, String), String> {
    let mut child = Command::new("docker")
        .args(["exec", name, "bash", "-c", command])
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .spawn()
        .map_err(|e| format!("failed to exec docker: {e}"))?;

    // Both pipes were requested above, so `spawn` always populates them.
    #[allow(clippy::expect_used)]
    let mut stdout_pipe = child.stdout.take().expect("stdout piped at spawn");
    #[allow(clippy::expect_used)]
    let mut stderr_pipe = child.stderr.take().expect("stderr piped at spawn");

    let stdout_task = async move {
        let mut buf = Vec::new();
        let _ = stdout_pipe.read_to_end(&mut buf).await;
        buf
    };
    let stderr_task = async move {
        let mut buf = Vec::new();
        let _ = stderr_pipe.read_to_end(&mut buf).await;
        buf
    };

    let (stdout_buf, stderr_buf) = tokio::join!(stdout_task, stderr_task);

    let status = child.wait().await.map_err(|e| format!("failed to wait on docker exec: {e}"))?;

    Ok((
        status.success(),
        String::from_utf8_lossy(&stdout_buf).to_string(),
        String::from_utf8_lossy(&stderr_buf).to_string(),
    ))
}

/// Run a `docker` CLI command and return stdout on success.
async fn run_docker(args: &[String]) -> Result<String, String> {
    let output = Command::new("docker")
        .args(args)
        .output()
        .await
        .map_err(|e| format!("failed to exec docker: {e}"))?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(format!("docker {} failed: {}", args.first().map(String::as_str).unwrap_or(""), stderr.trim()))
    }
}

#[cfg(test)]
#[path = "docker_tests.rs"]
mod tests;
