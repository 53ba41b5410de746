// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host version-control credential staging, shared by the Analyzer and
//! Task Solver (spec §4.4 step 2, §4.6 step 2).
//!
//! Grounded in the teacher's Docker agent adapter, which mounts the host
//! `~/.ssh` directory into the container for git clone auth
//! (`crates/daemon/src/adapters/agent/docker/mod.rs`); generalized here
//! from a bind-mount to a `copyInTree`/`copyInFile` push since Container
//! Handle exposes no volume-mount primitive.

use fleet_container::ContainerHandle;

const CONTAINER_SSH_DIR: &str = "/root/.ssh";
const CONTAINER_GITCONFIG_PATH: &str = "/root/.gitconfig";

/// Remove any credential config baked into the base image, then push the
/// host user's `~/.ssh` and `~/.gitconfig` (whichever exist) into the
/// container. Best-effort throughout: a missing host credential is
/// logged, never fatal (spec §4.4).
pub async fn stage_vcs_credentials<H: ContainerHandle>(handle: &H) {
    let cleanup = vec![format!("rm -rf {CONTAINER_SSH_DIR} {CONTAINER_GITCONFIG_PATH}")];
    let result = handle.exec_blocking(&cleanup, 30).await;
    if !result.is_success() {
        tracing::warn!(
            error = %result.error_detail,
            "failed to clear pre-existing container credential config"
        );
    }

    let Some(home) = dirs::home_dir() else {
        tracing::info!("no host HOME directory resolvable, skipping credential staging");
        return;
    };

    let ssh_dir = home.join(".ssh");
    if ssh_dir.exists() {
        if let Err(e) = handle.copy_in_tree(&ssh_dir, CONTAINER_SSH_DIR).await {
            tracing::warn!(error = %e, "failed to copy host ~/.ssh into container");
        }
    } else {
        tracing::info!("host ~/.ssh absent, skipping SSH credential staging");
    }

    let gitconfig = home.join(".gitconfig");
    match tokio::fs::read(&gitconfig).await {
        Ok(contents) => {
            if let Err(e) = handle.copy_in_file(&contents, CONTAINER_GITCONFIG_PATH).await {
                tracing::warn!(error = %e, "failed to copy host ~/.gitconfig into container");
            }
        }
        Err(_) => tracing::info!("host ~/.gitconfig absent, skipping"),
    }
}

#[cfg(test)]
#[path = "host_credentials_tests.rs"]
mod tests;
