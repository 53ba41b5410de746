// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;
use serde_json::json;

#[test]
fn extracts_object_wrapped_in_narration() {
    let text = r#"Here is your answer: {"taskId":"A","title":"t","description":"d","status":"success","report":"done"} thanks!"#;
    let value = extract_object(text).unwrap();
    assert_eq!(value["taskId"], "A");
    assert_eq!(value["status"], "success");
}

#[test]
fn extracts_array_wrapped_in_shell_echoes() {
    let text = "$ cat tasks.json\n[{\"id\":\"1\",\"title\":\"t\",\"description\":\"d\",\"priority\":3}]\ndone";
    let value = extract_array(text).unwrap();
    assert!(value.is_array());
    assert_eq!(value[0]["id"], "1");
}

#[test]
fn ignores_braces_inside_string_literals() {
    let text = r#"{"note": "use { and } for blocks", "ok": true}"#;
    let value = extract_object(text).unwrap();
    assert_eq!(value["ok"], true);
}

#[test]
fn honors_backslash_escapes_in_strings() {
    let text = r#"{"path": "a\"b}c", "ok": true}"#;
    let value = extract_object(text).unwrap();
    assert_eq!(value["ok"], true);
}

#[test]
fn no_balanced_pair_is_parse_error() {
    let err = extract_object("no json here").unwrap_err();
    assert!(matches!(err, ParseError::NoBalancedDelimiters { kind: "object" }));
}

#[test]
fn malformed_json_within_balanced_pair_is_parse_error() {
    // Balanced braces, but not valid JSON within them.
    let err = extract_object("{not json, just braces}").unwrap_err();
    assert!(matches!(err, ParseError::InvalidJson(_)));
}

#[test]
fn takes_outermost_pair_not_first_nested_close() {
    let text = r#"{"outer": {"inner": 1}, "done": true}"#;
    let value = extract_object(text).unwrap();
    assert_eq!(value["done"], true);
}

proptest! {
    #[test]
    fn roundtrips_object_with_arbitrary_prefix_suffix(
        prefix in "[a-zA-Z0-9 .!]{0,20}",
        suffix in "[a-zA-Z0-9 .!]{0,20}",
        key in "[a-z]{1,8}",
        val in "[a-z0-9]{0,12}",
    ) {
        let obj = json!({ key.clone(): val.clone() });
        let serialized = serde_json::to_string(&obj).unwrap();
        let wrapped = format!("{prefix}{serialized}{suffix}");
        let extracted = extract_object(&wrapped).unwrap();
        prop_assert_eq!(extracted, obj);
    }

    #[test]
    fn roundtrips_array_with_arbitrary_prefix_suffix(
        prefix in "[a-zA-Z0-9 .!]{0,20}",
        suffix in "[a-zA-Z0-9 .!]{0,20}",
        n in 0usize..5,
    ) {
        let arr = json!((0..n).collect::<Vec<_>>());
        let serialized = serde_json::to_string(&arr).unwrap();
        let wrapped = format!("{prefix}{serialized}{suffix}");
        let extracted = extract_array(&wrapped).unwrap();
        prop_assert_eq!(extracted, arr);
    }
}
