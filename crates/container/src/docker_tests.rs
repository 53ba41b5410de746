// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn shell_quote_escapes_single_quotes() {
    assert_eq!(shell_quote("plain"), "'plain'");
    assert_eq!(shell_quote("a'b"), "'a'\\''b'");
}

#[test]
fn with_provenance_prefixes_command_and_ensures_trailing_newline() {
    assert_eq!(with_provenance("echo hi", "hi"), "$ echo hi\nhi\n");
    assert_eq!(with_provenance("echo hi", "hi\n"), "$ echo hi\nhi\n");
}
