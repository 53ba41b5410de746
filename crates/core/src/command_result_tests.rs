// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn push_command_output_prefixes_provenance() {
    let mut r = CommandResult::success(String::new());
    r.push_command_output("echo hi", "hi\n");
    assert_eq!(r.output, "$ echo hi\nhi\n");
}

#[test]
fn only_success_status_is_success() {
    assert!(CommandResult::success(String::new()).is_success());
    assert!(!CommandResult::failure(String::new(), "boom").is_success());
    assert!(!CommandResult::timeout(String::new(), 5).is_success());
}
