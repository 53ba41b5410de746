// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Container-readiness backoff (spec §4.1, §9).
//!
//! There is an observed race between a container entering the "running"
//! state and the container runtime accepting `exec` requests against it.
//! This is a true race with the runtime, not a code smell: we preserve a
//! small randomized delay before every invocation rather than retrying on
//! failure, so tests can assert on the contract directly instead of
//! tolerating flaky retries.

use rand::Rng;
use std::time::Duration;

const MIN_BACKOFF_MS: u64 = 100;
const MAX_BACKOFF_MS: u64 = 2000;

/// Sleep a random duration in `[100ms, 2s)` before an exec invocation.
pub async fn jittered_delay() {
    tokio::time::sleep(sample()).await;
}

fn sample() -> Duration {
    let ms = rand::thread_rng().gen_range(MIN_BACKOFF_MS..MAX_BACKOFF_MS);
    Duration::from_millis(ms)
}

#[cfg(test)]
#[path = "backoff_tests.rs"]
mod tests;
