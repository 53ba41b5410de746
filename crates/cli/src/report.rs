// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run report (spec §6, "Run log"): the JSON-serialized list of every
//! `TaskResult` from a run, written to a timestamped file under the
//! user's OS-conventional logs directory so it survives the process.

use fleet_core::TaskResult;
use std::path::{Path, PathBuf};

/// Write `results` to `dirs::data_local_dir()/fleet/logs/<epoch_ms>.json`,
/// creating the `logs` directory if needed. Returns the path written.
pub fn write_run_report(results: &[TaskResult], epoch_ms: u64) -> anyhow::Result<PathBuf> {
    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("could not resolve the user's local data directory"))?;
    let logs_dir = data_dir.join("fleet").join("logs");
    std::fs::create_dir_all(&logs_dir)?;

    let path = logs_dir.join(format!("{epoch_ms}.json"));
    write_to(&path, results)?;
    Ok(path)
}

fn write_to(path: &Path, results: &[TaskResult]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(results)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
