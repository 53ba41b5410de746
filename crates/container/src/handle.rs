// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Container Handle (spec §4.1) — owns exactly one running container and
//! makes its filesystem and shell reachable.
//!
//! Modeled as a trait so the Analyzer/Scheduler/Solver are generic over
//! the container runtime and can be driven by a fake in tests (mirroring
//! the teacher's `test-support` feature pattern that exposes fake
//! adapters to dependent crates), rather than as a `dyn` trait object —
//! there is exactly one production implementation (Docker) and no runtime
//! switch between implementations.

use async_trait::async_trait;
use fleet_core::{CommandResult, ContainerError};
use std::path::Path;

/// Options a Container Handle is started with.
#[derive(Debug, Clone, Default)]
pub struct ContainerStartOptions {
    /// Environment variables passed at container creation (proxy pairs;
    /// per-family credential/endpoint env vars are injected at
    /// command-construction time instead, per spec §6).
    pub env: Vec<(String, String)>,
    pub memory_mb: u32,
    pub cpu_cores: f64,
}

/// Owns exactly one running container; exclusively owned by at most one
/// Task Solver (or the Analyzer) for its lifetime. Two concurrent
/// `exec_*` calls on the same handle have unspecified interleaving and are
/// forbidden by convention — callers must serialize their own use of a
/// handle.
#[async_trait]
pub trait ContainerHandle: Send + Sync + Sized {
    /// Create a detached container running a sleep-forever process.
    /// Tolerates duplicate-name collisions by generating a random suffix.
    async fn start(
        image: &str,
        name: Option<&str>,
        options: &ContainerStartOptions,
    ) -> Result<Self, ContainerError>;

    /// Opaque runtime-assigned container identifier (for logging/tests).
    fn container_id(&self) -> &str;

    /// Execute `commands` in order, accumulating output. The first command
    /// whose exit code is non-zero terminates the batch with `Failure`
    /// (remaining commands unexecuted). A per-batch wall-clock timeout of
    /// 0 means "no timeout" (spec §8 boundary behavior).
    async fn exec_blocking(&self, commands: &[String], timeout_seconds: u64) -> CommandResult;

    /// Execute a single long-running command with concurrent capture of
    /// stdout and stderr — both streams are drained to completion before
    /// the exit code is read, so megabyte-scale output is never truncated.
    async fn exec_streaming(&self, command: &str, timeout_seconds: u64) -> CommandResult;

    /// Materialize `contents` inside the container at `container_path`,
    /// creating intermediate directories. Atomic with respect to the
    /// destination (staged at a temporary path, then moved).
    async fn copy_in_file(&self, contents: &[u8], container_path: &str)
        -> Result<(), ContainerError>;

    /// Recursively copy a host directory (or single file) into the
    /// container, creating `container_dest_dir` first. Fails with
    /// `LocalPathMissing` if the host source does not exist, before
    /// issuing any container-side command.
    async fn copy_in_tree(
        &self,
        local_path: &Path,
        container_dest_dir: &str,
    ) -> Result<(), ContainerError>;

    /// Read a container file into host memory, deleting any temporary host
    /// staging file before returning (success or failure).
    async fn copy_out_file(&self, container_path: &str) -> Result<String, ContainerError>;

    /// Forcibly remove the container. Idempotent; safe to call after a
    /// failed `start`.
    async fn shutdown(&mut self);
}
