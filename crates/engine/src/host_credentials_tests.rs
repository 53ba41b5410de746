// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use fleet_container::{FakeContainerHandle, FakeScript};

#[tokio::test]
async fn copies_existing_ssh_dir_and_gitconfig() {
    let original_home = std::env::var("HOME").ok();
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join(".ssh")).unwrap();
    std::fs::write(dir.path().join(".ssh").join("id_rsa"), b"fake-key").unwrap();
    std::fs::write(dir.path().join(".gitconfig"), b"[user]\nname = test\n").unwrap();
    std::env::set_var("HOME", dir.path());

    let handle = FakeContainerHandle::with_script(FakeScript::default());
    stage_vcs_credentials(&handle).await;

    let copied = handle.copied_in.lock().clone();
    assert!(copied.contains(&CONTAINER_SSH_DIR.to_string()));
    assert!(copied.contains(&CONTAINER_GITCONFIG_PATH.to_string()));

    match original_home {
        Some(h) => std::env::set_var("HOME", h),
        None => std::env::remove_var("HOME"),
    }
}

#[tokio::test]
async fn tolerates_missing_host_credentials() {
    let original_home = std::env::var("HOME").ok();
    let dir = tempfile::tempdir().unwrap();
    std::env::set_var("HOME", dir.path());

    let handle = FakeContainerHandle::with_script(FakeScript::default());
    stage_vcs_credentials(&handle).await;

    assert!(handle.copied_in.lock().is_empty());

    match original_home {
        Some(h) => std::env::set_var("HOME", h),
        None => std::env::remove_var("HOME"),
    }
}
