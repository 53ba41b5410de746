// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy shared across the workspace (spec §7).
//!
//! Each fatal class named in the error handling design gets its own
//! `thiserror` variant rather than a single stringly-typed error, so
//! callers can match on the failing stage.

use thiserror::Error;

/// Configuration errors — invalid option values or constraint violations.
/// Fatal before any container starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("minTasks ({min}) must be <= maxTasks ({max})")]
    TaskBoundsInverted { min: u32, max: u32 },
    #[error("maxParallelContainers ({parallel}) must be <= maxContainers ({max})")]
    ParallelismExceedsCap { parallel: u32, max: u32 },
    #[error("agent family {family} requires a credential but export_required is false")]
    CredentialExportNotRequired { family: String },
    #[error("agent family {family} requires a credential but none was provided")]
    MissingCredential { family: String },
    #[error("failed to read config file {path}: {source}")]
    Io { path: String, #[source] source: std::io::Error },
    #[error("failed to parse config file {path}: {source}")]
    Parse { path: String, #[source] source: toml::de::Error },
    #[error("required configuration option {option} was never set by any tier")]
    MissingRequiredOption { option: &'static str },
}

/// Environment errors — surfaced by the Container Handle. Fatal to the
/// owning component, never to siblings.
#[derive(Debug, Error, Clone)]
pub enum ContainerError {
    #[error("container start failed: {0}")]
    ContainerStartError(String),
    #[error("local path missing: {0}")]
    LocalPathMissing(String),
    #[error("copy-in failed: {0}")]
    CopyInFailed(String),
    #[error("copy-out failed: {0}")]
    CopyOutFailed(String),
    #[error("shutdown failed: {0}")]
    ShutdownFailed(String),
}

/// Output Parser errors — malformed or absent JSON in captured output.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("no balanced JSON {kind} found in output")]
    NoBalancedDelimiters { kind: &'static str },
    #[error("balanced substring failed strict JSON parse: {0}")]
    InvalidJson(String),
}

/// Analyzer-side task validation failure (spec §4.4 step 6).
#[derive(Debug, Error, Clone)]
pub enum TaskValidationError {
    #[error("analyzer returned {count} tasks, outside configured bounds [{min}, {max}]")]
    CountOutOfBounds { count: usize, min: u32, max: u32 },
    #[error("task at index {index} is missing a required field: {field}")]
    MissingField { index: usize, field: &'static str },
}

/// Fatal Analyzer failure — aborts the whole run (spec §4.4, §7).
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error(transparent)]
    ContainerStart(#[from] ContainerError),
    #[error("analyzer container timed out after {0}s")]
    AgentTimeout(u64),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Validation(#[from] TaskValidationError),
}

/// Solver-scoped failure — captured at the Scheduler boundary and turned
/// into a failed `TaskResult`; never propagates to sibling solvers.
#[derive(Debug, Error, Clone)]
pub enum SolverError {
    #[error(transparent)]
    ContainerStart(#[from] ContainerError),
    #[error("agent environment setup failed: {0}")]
    SolverEnvironmentError(String),
    #[error("solver container timed out after {0}s")]
    Timeout(u64),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("task was cancelled before completion")]
    Cancelled,
}

/// Patch Committer per-task failure — recorded in the batch summary;
/// other tasks proceed.
#[derive(Debug, Error, Clone)]
pub enum CommitError {
    #[error("task result missing required field: {0}")]
    InvalidResult(String),
    #[error("working tree is dirty and no recovery policy applies")]
    DirtyWorkingTree,
    #[error("git command failed: {0}")]
    GitCommandFailed(String),
    #[error("patch failed to apply: {0}")]
    ApplyFailed(String),
}
