// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! fleet-agent: per-family agent invocation command sequences and
//! host-side credential resolution.

pub mod commands;
pub mod credential;
pub mod family_table;

pub use commands::{
    build_command_sequence, ANALYZER_PROMPT_PATH, DIFF_HARNESS_PATH, FINAL_REPORT_PATH,
    GIT_DIFF_PATH, SOLVER_PROMPT_PATH, TASKS_OUTPUT_PATH, WORKSPACE_DIR,
};
pub use credential::{resolve, ResolvedCredential};
pub use family_table::{ExtraHardening, FamilyTable};
