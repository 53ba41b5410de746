// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output Parser (spec §4.2) — extracts the first top-level JSON object or
//! array embedded anywhere in a command's captured standard output.
//!
//! Deliberately does *not* run a streaming JSON parser over the whole
//! blob: agents wrap their JSON in human prose ("Here is your answer: {...}
//! thanks!") that would poison a streaming parser. Instead this scans for
//! the outermost balanced delimiter pair, tracking string-literal and
//! escape state, then hands the balanced substring to `serde_json` for a
//! strict parse. Text before and after the JSON block is tolerated; any
//! malformation *within* it is not.

use fleet_core::ParseError;
use serde_json::Value;

/// Extract the first top-level JSON object (`{...}`) from `text`.
pub fn extract_object(text: &str) -> Result<Value, ParseError> {
    extract_balanced(text, '{', '}')
}

/// Extract the first top-level JSON array (`[...]`) from `text`.
pub fn extract_array(text: &str) -> Result<Value, ParseError> {
    extract_balanced(text, '[', ']')
}

fn extract_balanced(text: &str, open: char, close: char) -> Result<Value, ParseError> {
    let kind = if open == '{' { "object" } else { "array" };
    let span = find_balanced_span(text, open, close)
        .ok_or(ParseError::NoBalancedDelimiters { kind })?;
    serde_json::from_str(span).map_err(|e| ParseError::InvalidJson(e.to_string()))
}

/// Find the byte span of the first top-level balanced `open`/`close` pair
/// in `text`, ignoring delimiters that occur inside string literals
/// (honoring backslash-escape rules). Returns `None` if no balanced pair
/// is found before the input ends.
fn find_balanced_span(text: &str, open: char, close: char) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut start = None;
    let mut depth: i64 = 0;
    let mut in_string = false;
    let mut escaped = false;
    let mut i = 0;

    // Byte-indexed scan is safe here: `open`, `close`, `"`, and `\` are all
    // single-byte ASCII, so they can never appear as a continuation byte
    // of a multi-byte UTF-8 sequence.
    while i < bytes.len() {
        let b = bytes[i] as char;

        if in_string {
            if escaped {
                escaped = false;
            } else if b == '\\' {
                escaped = true;
            } else if b == '"' {
                in_string = false;
            }
            i += 1;
            continue;
        }

        match b {
            '"' => in_string = true,
            c if c == open => {
                if depth == 0 {
                    start = Some(i);
                }
                depth += 1;
            }
            c if c == close && depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    if let Some(s) = start {
                        return Some(&text[s..=i]);
                    }
                }
            }
            _ => {}
        }
        i += 1;
    }

    None
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
