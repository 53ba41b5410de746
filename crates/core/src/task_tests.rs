// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn rejects_empty_fields() {
    let mut t = Task::builder().build();
    assert!(t.is_valid());
    t.title.clear();
    assert!(!t.is_valid());
}

#[test]
fn rejects_out_of_range_priority() {
    let t = Task::builder().priority(0).build();
    assert!(!t.is_valid());
    let t = Task::builder().priority(6).build();
    assert!(!t.is_valid());
}
